//! OpenAI chat-completions provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    ClientConfig, GenerationConfig, HttpClient, LanguageModelUsage, LlmError, ResponseMetadata,
    TextCompletion, TextGenerator,
};
use crate::provider::constants::openai;

/// Client for the chat-completions endpoint.
///
/// Build it once and share it; each call to [`OpenAiClient::generate`] makes
/// exactly one request.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: ClientConfig,
    http: HttpClient,
    generation_config: GenerationConfig,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(config.http_config.clone())?;

        Ok(Self {
            config,
            http,
            generation_config: GenerationConfig::default(),
        })
    }

    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation_config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Generate text for `prompt` and return the first choice's content.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt).await.map(|completion| completion.text)
    }

    /// Like [`OpenAiClient::generate`], but keeps usage and response metadata.
    #[tracing::instrument(
        name = "chat_completion",
        skip(self, prompt),
        fields(model = %self.generation_config.model, prompt_len = prompt.len()),
        err
    )]
    pub async fn complete(&self, prompt: &str) -> Result<TextCompletion, LlmError> {
        let request = create_chat_request(&self.generation_config, prompt);
        let url = format!("{}{}", self.config.base_url(), openai::CHAT_COMPLETIONS_ENDPOINT);
        let headers = [(
            "Authorization".to_string(),
            format!("Bearer {}", self.config.api_key()),
        )];

        let response: ChatCompletionResponse =
            self.http.post_json(&url, &headers, &request).await?;

        create_text_completion(response)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        OpenAiClient::generate(self, prompt).await
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    /// Sent as `null` when unset.
    stop: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum ChatRole {
    User,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: ChatRole,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    /// Null when the model answered with something other than text.
    content: Option<String>,
}

/// Compatible servers sometimes omit some of these counts.
#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

fn create_chat_request<'a>(
    config: &'a GenerationConfig,
    prompt: &'a str,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: &config.model,
        messages: vec![ChatMessage {
            role: ChatRole::User,
            content: prompt,
        }],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        top_p: config.top_p,
        stop: config.stop.as_deref(),
    }
}

fn create_text_completion(res: ChatCompletionResponse) -> Result<TextCompletion, LlmError> {
    let choice = res
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyResponse("No choices in response".to_string()))?;

    let text = choice
        .message
        .content
        .ok_or_else(|| LlmError::EmptyResponse("First choice has no content".to_string()))?;

    Ok(TextCompletion {
        text,
        finish_reason: choice.finish_reason,
        usage: res.usage.map(|usage| LanguageModelUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }),
        metadata: ResponseMetadata {
            model: res.model,
            id: res.id,
        },
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_serializes_fixed_parameters() {
        let config = GenerationConfig::default();
        let request = create_chat_request(&config, "Say hello");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(
            body["messages"],
            json!([{ "role": "user", "content": "Say hello" }])
        );
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["temperature"].as_f64(), Some(0.0));
        assert_eq!(body["top_p"].as_f64(), Some(0.9));
        assert!(body["stop"].is_null());
        assert!(body.as_object().unwrap().contains_key("stop"));
    }

    #[test]
    fn test_first_choice_content_is_returned() {
        let res: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-123",
            "model": "gpt-3.5-turbo-0125",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Hello!" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "Hi!" }, "finish_reason": "stop" }
            ],
            "usage": { "prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11 }
        }))
        .unwrap();

        let completion = create_text_completion(res).unwrap();

        assert_eq!(completion.text, "Hello!");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.unwrap().total_tokens, 11);
        assert_eq!(completion.metadata.id, "chatcmpl-123");
        assert_eq!(completion.metadata.model, "gpt-3.5-turbo-0125");
    }

    #[test]
    fn test_partial_usage_does_not_fail_the_completion() {
        let res: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Hello!" }, "finish_reason": "stop" }],
            "usage": { "prompt_tokens": 5, "total_tokens": 5 }
        }))
        .unwrap();

        let completion = create_text_completion(res).unwrap();
        let usage = completion.usage.unwrap();

        assert_eq!(completion.text, "Hello!");
        assert_eq!(usage.prompt_tokens, 5);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(usage.total_tokens, 5);
    }

    #[test]
    fn test_empty_choices_is_provider_error() {
        let res: ChatCompletionResponse =
            serde_json::from_value(json!({ "id": "x", "model": "m", "choices": [] })).unwrap();

        let err = create_text_completion(res).unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse(_)));
        assert!(err.is_provider());
    }

    #[test]
    fn test_null_content_is_provider_error() {
        let res: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null }, "finish_reason": "tool_calls" }]
        }))
        .unwrap();

        let err = create_text_completion(res).unwrap_err();
        assert!(err.is_provider());
    }
}
