//! Shared HTTP client used by the provider.
//!
//! One call is one request: there is no retry or backoff here.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::LlmError;

/// Callback receiving a raw JSON request or response body.
pub type Inspector = Arc<dyn Fn(&Value) + Send + Sync>;

/// Optional debugging hooks around each request.
#[derive(Clone, Default)]
pub struct InspectorConfig {
    pub request_inspector: Option<Inspector>,
    pub response_inspector: Option<Inspector>,
}

impl fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("request_inspector", &self.request_inspector.is_some())
            .field("response_inspector", &self.response_inspector.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Total request timeout. `None` leaves reqwest's default in place.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    pub inspector: InspectorConfig,
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_request_inspector<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.inspector.request_inspector = Some(Arc::new(inspector));
        self
    }

    pub fn with_response_inspector<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.inspector.response_inspector = Some(Arc::new(inspector));
        self
    }
}

/// Reusable HTTP client. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    inspector: InspectorConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, LlmError> {
        let default_ua = format!("textgen/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder().user_agent(ua);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
        })?;

        Ok(Self {
            client,
            inspector: config.inspector,
        })
    }

    /// Make a single POST request with a JSON body.
    ///
    /// Any non-2xx status fails immediately with [`LlmError::Api`].
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let body_value = serde_json::to_value(body).map_err(|e| LlmError::Parse {
            message: "Failed to serialize request body".to_string(),
            source: Box::new(e),
        })?;

        if let Some(ref inspector) = self.inspector.request_inspector {
            inspector(&body_value);
        }

        let mut req_builder = self.client.post(url).json(&body_value);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| LlmError::Network {
            message: "Request failed".to_string(),
            source: Box::new(e),
        })?;

        let status = res.status();
        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            warn!(status = %status, "API returned error status");

            if let Some(ref inspector) = self.inspector.response_inspector {
                let error_value = serde_json::from_str(&response_text).unwrap_or_else(|_| {
                    serde_json::json!({
                        "error": response_text,
                        "status_code": status.as_u16()
                    })
                });
                inspector(&error_value);
            }

            return Err(LlmError::Api {
                message: format!("{status}: {}", error_detail(&response_text)),
                status_code: Some(status.as_u16()),
            });
        }

        debug!(status = %status, "HTTP request successful");

        let response_value: Value =
            serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
                message: "Failed to parse response as JSON".to_string(),
                source: Box::new(e),
            })?;

        if let Some(ref inspector) = self.inspector.response_inspector {
            inspector(&response_value);
        }

        serde_json::from_value(response_value).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        })
}
