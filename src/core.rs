pub mod config;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use config::{ApiKey, ClientConfig};
pub use error::{ErrorKind, LlmError};
pub use http::{HttpClient, HttpClientConfig, Inspector, InspectorConfig};
pub use traits::TextGenerator;
pub use types::{GenerationConfig, LanguageModelUsage, ResponseMetadata, TextCompletion};
