//! Ollama LLM Provider
//!
//! This module implements the TextGenerator trait for Ollama, a local model
//! server, typically at http://localhost:11434.
//!
//! Key features:
//! - Local execution (no API keys required)
//! - Raw completion via `/api/generate` so no chat template is applied
//! - Decoding options mapped from GenerationParams
//! - Error mapping to LLMError

use async_trait::async_trait;
use reqwest::Client;
use sdk::GenerationParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{completion_budget, LLMError, Result, TextGenerator};
use crate::config::OllamaConfig;

/// Ollama provider configuration
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    /// Base URL for Ollama API (typically http://localhost:11434)
    base_url: String,

    /// Model name to use (e.g., "llama3.2:1b")
    model: String,

    /// HTTP client for API requests
    client: Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider with a 300 second request timeout
    ///
    /// # Arguments
    /// * `base_url` - Base URL for Ollama API (e.g., "http://localhost:11434")
    /// * `model` - Model name to use (e.g., "llama3.2:1b")
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(base_url, model, Duration::from_secs(300))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        }
    }

    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::with_timeout(
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Build the request body for a prompt
    fn build_request(&self, prompt: &str, params: &GenerationParams) -> OllamaRequest {
        OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            raw: true,
            stream: false,
            options: OllamaOptions {
                temperature: params.temperature,
                top_k: params.top_k,
                top_p: params.top_p,
                num_predict: completion_budget(params, prompt),
            },
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let request = self.build_request(prompt, params);

        tracing::debug!(
            "Ollama request: model={}, prompt_chars={}, num_predict={}",
            self.model,
            prompt.len(),
            request.options.num_predict
        );

        let url = format!("{}/api/generate", self.base_url);
        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout
                } else if e.is_connect() {
                    LLMError::ProviderUnavailable(format!(
                        "Cannot connect to Ollama at {}. Is Ollama running?",
                        self.base_url
                    ))
                } else {
                    LLMError::NetworkError(e.to_string())
                }
            })?;

        tracing::info!(
            "Ollama response received in {:.1}s",
            start.elapsed().as_secs_f64()
        );

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::ProviderUnavailable(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(ollama_response.response)
    }

    async fn check_health(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Ollama generate request format
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    raw: bool,
    stream: bool,
    options: OllamaOptions,
}

/// Ollama decoding options
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    num_predict: usize,
}

/// Ollama generate response format
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_properties() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama3.2:1b");

        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.model(), "llama3.2:1b");
        assert_eq!(provider.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_request_mapping() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama3.2:1b");
        let request = provider.build_request("abcdefgh", &GenerationParams::question());

        assert!(request.raw);
        assert!(!request.stream);
        assert_eq!(request.prompt, "abcdefgh");
        assert_eq!(request.options.temperature, 0.6);
        assert_eq!(request.options.top_k, 30);
        assert_eq!(request.options.top_p, 0.9);
        assert_eq!(request.options.num_predict, 58);
    }

    #[test]
    fn test_request_serialization() {
        let provider = OllamaProvider::new("http://localhost:11434", "m");
        let request = provider.build_request("hi", &GenerationParams::statement());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["options"]["num_predict"], 49);
        assert_eq!(json["raw"], true);
    }

    #[test]
    fn test_from_config() {
        let provider = OllamaProvider::from_config(&OllamaConfig::default());
        assert_eq!(provider.model(), OllamaConfig::default().model);
    }
}
