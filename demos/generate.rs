//! Generate text for a prompt passed on the command line.
//!
//! Run with: RUST_LOG=textgen=debug cargo run --example generate -- "Say hello"
use textgen::{ClientConfig, OpenAiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let prompt = if prompt.is_empty() {
        "Share a fun fact about Rust programming.".to_string()
    } else {
        prompt
    };

    let client = OpenAiClient::new(ClientConfig::from_env()?)?;
    let completion = client.complete(&prompt).await?;

    println!("Assistant:\n{}", completion.text);
    if let Some(usage) = completion.usage {
        println!(
            "\n[{} prompt + {} completion = {} tokens]",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(())
}
