//! Text Generation Layer
//!
//! The [`TextGenerator`] trait is the contract for the external completion
//! model (Ollama or the Hugging Face Inference API). [`GenerationAdapter`] sits
//! on top of it and owns everything the pipeline cares about: picking the
//! decoding parameters for the question or statement branch and removing the
//! prompt when a provider echoes it back.

use async_trait::async_trait;
use sdk::{EngineError, GenerationParams};
use std::sync::Arc;

use crate::config::LLMConfig;

pub mod huggingface;
pub mod ollama;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<LLMError> for EngineError {
    fn from(err: LLMError) -> Self {
        EngineError::Generation(err.to_string())
    }
}

/// Rough characters-per-token ratio used to size completion budgets
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of a prompt
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Completion budget for providers that cap new tokens rather than total length.
///
/// `max_length` counts prompt and completion together, so a long prompt leaves
/// little room. Never returns less than one token.
pub fn completion_budget(params: &GenerationParams, prompt: &str) -> usize {
    params
        .max_length
        .saturating_sub(estimate_tokens(prompt))
        .max(1)
}

/// External text-generation capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the name of the provider (e.g., "ollama", "huggingface")
    fn name(&self) -> &str;

    /// Returns the model identifier in use
    fn model(&self) -> &str;

    /// Complete `prompt` under the given decoding parameters
    ///
    /// The returned text may or may not start with the prompt itself,
    /// depending on the provider.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    /// Check if the provider is currently healthy and available
    /// Default implementation returns true.
    async fn check_health(&self) -> bool {
        true
    }
}

/// Remove an echoed prompt from the front of a completion.
///
/// Output that does not start with the prompt is returned untouched.
pub fn strip_echo(output: &str, prompt: &str) -> String {
    match output.strip_prefix(prompt) {
        Some(rest) => rest.trim().to_string(),
        None => output.to_string(),
    }
}

/// Branch-aware wrapper around a [`TextGenerator`]
#[derive(Clone)]
pub struct GenerationAdapter {
    generator: Arc<dyn TextGenerator>,
}

impl GenerationAdapter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Decoding parameters for a branch
    pub fn params_for(is_question: bool) -> GenerationParams {
        if is_question {
            GenerationParams::question()
        } else {
            GenerationParams::statement()
        }
    }

    /// Generate an answer for `prompt` with the branch's decoding parameters.
    ///
    /// Provider failures are returned as-is.
    pub async fn generate(&self, prompt: &str, is_question: bool) -> Result<String> {
        let params = Self::params_for(is_question);

        tracing::debug!(
            "Generating with {} ({}): max_length={}, temperature={}, prompt_chars={}",
            self.generator.name(),
            self.generator.model(),
            params.max_length,
            params.temperature,
            prompt.len()
        );

        let output = self.generator.generate(prompt, &params).await?;
        Ok(strip_echo(&output, prompt))
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }
}

/// Build the generator selected by `config.provider`
pub fn build_generator(config: &LLMConfig) -> Result<Arc<dyn TextGenerator>> {
    match config.provider.as_str() {
        "ollama" => Ok(Arc::new(ollama::OllamaProvider::from_config(&config.ollama))),
        "huggingface" => Ok(Arc::new(huggingface::HuggingFaceProvider::from_config(
            &config.huggingface,
        ))),
        other => Err(LLMError::InvalidRequest(format!(
            "Unknown generation provider '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the parameters it was called with and replies with a canned text
    struct Recorder {
        reply: String,
        seen: Mutex<Vec<GenerationParams>>,
    }

    #[async_trait]
    impl TextGenerator for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn model(&self) -> &str {
            "test"
        }

        async fn generate(&self, _prompt: &str, params: &GenerationParams) -> Result<String> {
            self.seen.lock().unwrap().push(*params);
            Ok(self.reply.clone())
        }
    }

    struct Broken;

    #[async_trait]
    impl TextGenerator for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn model(&self) -> &str {
            "none"
        }

        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String> {
            Err(LLMError::ProviderUnavailable("down".to_string()))
        }
    }

    #[test]
    fn test_strip_echo() {
        assert_eq!(strip_echo("prompt:  answer here ", "prompt:"), "answer here");
        assert_eq!(strip_echo("no echo ", "prompt:"), "no echo ");
        assert_eq!(strip_echo("prompt:", "prompt:"), "");
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn test_completion_budget() {
        let params = GenerationParams::question();
        assert_eq!(completion_budget(&params, "abcd"), 59);
        assert_eq!(completion_budget(&params, &"x".repeat(1000)), 1);
    }

    #[tokio::test]
    async fn test_adapter_picks_branch_params_and_strips_echo() {
        let recorder = Arc::new(Recorder {
            reply: "the prompt  Paris is the capital.".to_string(),
            seen: Mutex::new(Vec::new()),
        });
        let adapter = GenerationAdapter::new(Arc::clone(&recorder) as Arc<dyn TextGenerator>);

        let answer = adapter.generate("the prompt", true).await.unwrap();
        assert_eq!(answer, "Paris is the capital.");

        adapter.generate("the prompt", false).await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0], GenerationParams::question());
        assert_eq!(seen[1], GenerationParams::statement());
    }

    #[tokio::test]
    async fn test_adapter_propagates_failure() {
        let adapter = GenerationAdapter::new(Arc::new(Broken));
        let err = adapter.generate("p", true).await.unwrap_err();
        assert!(matches!(err, LLMError::ProviderUnavailable(_)));

        let engine_err: EngineError = err.into();
        assert!(matches!(engine_err, EngineError::Generation(_)));
    }

    #[test]
    fn test_build_generator() {
        let mut config = LLMConfig::default();
        assert_eq!(build_generator(&config).unwrap().name(), "ollama");

        config.provider = "huggingface".to_string();
        assert_eq!(build_generator(&config).unwrap().name(), "huggingface");

        config.provider = "gpt-9000".to_string();
        assert!(build_generator(&config).is_err());
    }
}
