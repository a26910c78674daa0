//! Client configuration, resolved once at startup.

use std::fmt;

use crate::provider::constants::openai;

use super::error::LlmError;
use super::http::HttpClientConfig;

/// Where the API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read from `OPENAI_API_KEY`.
    Default,
    Custom(String),
}

impl ApiKey {
    pub fn resolve(&self) -> Result<String, LlmError> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    fn resolve_with<F>(&self, lookup: F) -> Result<String, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            ApiKey::Default => lookup(openai::API_KEY_ENV_VAR)
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    LlmError::ProviderConfiguration(format!(
                        "{} not set.",
                        openai::API_KEY_ENV_VAR
                    ))
                }),
            ApiKey::Custom(key) if key.trim().is_empty() => Err(
                LlmError::ProviderConfiguration("API key must not be empty.".to_string()),
            ),
            ApiKey::Custom(key) => Ok(key.clone()),
        }
    }
}

/// Everything the client needs before it can send a request.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    pub http_config: HttpClientConfig,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = ApiKey::Custom(api_key.into()).resolve()?;
        Ok(Self::with_resolved_key(api_key))
    }

    pub fn from_api_key(api_key: ApiKey) -> Result<Self, LlmError> {
        Ok(Self::with_resolved_key(api_key.resolve()?))
    }

    /// Load `.env` if present, then read `OPENAI_API_KEY` and `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, LlmError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration against an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = ApiKey::Default.resolve_with(&lookup)?;
        let mut config = Self::with_resolved_key(api_key);

        if let Some(base_url) = lookup(openai::BASE_URL_ENV_VAR).filter(|url| !url.is_empty()) {
            config = config.with_base_url(base_url);
        }

        Ok(config)
    }

    fn with_resolved_key(api_key: String) -> Self {
        Self {
            api_key,
            base_url: openai::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("http_config", &self.http_config)
            .finish()
    }
}
