use crate::provider::constants::openai;

/// Configuration for text generation parameters.
///
/// Every request is sent with [`GenerationConfig::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub model: String,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature. 0 selects greedily.
    pub temperature: f64,

    /// Nucleus sampling parameter (0.0 to 1.0)
    pub top_p: f64,

    pub stop: Option<Vec<String>>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: openai::DEFAULT_MODEL.to_string(),
            max_tokens: openai::DEFAULT_MAX_TOKENS,
            temperature: openai::DEFAULT_TEMPERATURE,
            top_p: openai::DEFAULT_TOP_P,
            stop: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCompletion {
    pub text: String,
    pub finish_reason: Option<String>,
    pub usage: Option<LanguageModelUsage>,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageModelUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMetadata {
    pub model: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generation_config_is_fixed() {
        let config = GenerationConfig::default();

        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.top_p, 0.9);
        assert!(config.stop.is_none());
    }
}
