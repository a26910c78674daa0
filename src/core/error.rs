use thiserror::Error;

/// Broad category of an [`LlmError`].
///
/// Configuration errors happen before any request leaves the process.
/// Provider errors come from the remote call or its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Provider,
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

impl LlmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::ProviderConfiguration(_) => ErrorKind::Configuration,
            LlmError::Network { .. }
            | LlmError::Api { .. }
            | LlmError::Parse { .. }
            | LlmError::EmptyResponse(_) => ErrorKind::Provider,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub fn is_provider(&self) -> bool {
        self.kind() == ErrorKind::Provider
    }

    /// HTTP status returned by the provider, if the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
