//! # textgen
//!
//! Send a prompt to a chat-completion API and get the generated text back.
//!
//! Every request uses the same fixed generation parameters (see
//! [`GenerationConfig`]). There is no retry, streaming or caching: one call is
//! one HTTP request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use textgen::{ClientConfig, OpenAiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new(ClientConfig::from_env()?)?;
//!     let text = client.generate("Say hello").await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod provider;

pub use crate::core::{
    ApiKey, ClientConfig, ErrorKind, GenerationConfig, HttpClientConfig, InspectorConfig,
    LanguageModelUsage, LlmError, ResponseMetadata, TextCompletion, TextGenerator,
};
pub use provider::OpenAiClient;

/// Resolve configuration from the environment, build a client and generate once.
///
/// Long-lived callers should build an [`OpenAiClient`] once and reuse it.
pub async fn generate_text(prompt: &str) -> Result<String, LlmError> {
    let client = OpenAiClient::from_env()?;
    client.generate(prompt).await
}
