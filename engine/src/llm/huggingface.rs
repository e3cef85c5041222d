//! Hugging Face Inference API provider
//!
//! Serves causal language models such as `EleutherAI/gpt-neo-125M` through the
//! hosted text-generation task. The API is asked to return the full text, so
//! completions come back with the prompt in front of them.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use sdk::GenerationParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{completion_budget, LLMError, Result, TextGenerator};
use crate::config::HuggingFaceConfig;

pub struct HuggingFaceProvider {
    base_url: String,
    model: String,
    api_token: Option<String>,
    client: Client,
}

impl HuggingFaceProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_token: api_token.filter(|t| !t.is_empty()),
            client,
        }
    }

    pub fn from_config(config: &HuggingFaceConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.model,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    fn build_request<'a>(&self, prompt: &'a str, params: &GenerationParams) -> HfRequest<'a> {
        HfRequest {
            inputs: prompt,
            parameters: HfParameters {
                max_new_tokens: completion_budget(params, prompt),
                temperature: params.temperature,
                top_k: params.top_k,
                top_p: params.top_p,
                do_sample: params.do_sample,
                num_return_sequences: params.num_return_sequences,
                return_full_text: true,
            },
            options: HfOptions {
                wait_for_model: true,
                use_cache: false,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let request = self.build_request(prompt, params);

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LLMError::Timeout
            } else if e.is_connect() {
                LLMError::ProviderUnavailable(format!(
                    "Cannot connect to Hugging Face at {}",
                    self.base_url
                ))
            } else {
                LLMError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LLMError::AuthenticationFailed(text)
                }
                StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimitExceeded,
                StatusCode::SERVICE_UNAVAILABLE => LLMError::ProviderUnavailable(format!(
                    "Model {} is not ready: {}",
                    self.model, text
                )),
                _ => LLMError::InvalidRequest(format!("({}) {}", status, text)),
            });
        }

        let generations: Vec<HfGeneration> = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(format!("Failed to parse Hugging Face response: {}", e)))?;

        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| LLMError::ParseError("No generations in response".to_string()))
    }

    async fn check_health(&self) -> bool {
        let mut builder = self.client.get(self.endpoint());
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        match builder.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
    options: HfOptions,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: usize,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    do_sample: bool,
    num_return_sequences: u32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct HfOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(token: Option<&str>) -> HuggingFaceProvider {
        HuggingFaceProvider::new(
            "https://api-inference.huggingface.co/",
            "EleutherAI/gpt-neo-125M",
            token.map(String::from),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            provider(None).endpoint(),
            "https://api-inference.huggingface.co/models/EleutherAI/gpt-neo-125M"
        );
    }

    #[test]
    fn test_empty_token_is_ignored() {
        assert!(provider(Some("")).api_token.is_none());
        assert!(provider(Some("hf_abc")).api_token.is_some());
    }

    #[test]
    fn test_request_mapping() {
        let p = provider(None);
        let request = p.build_request("abcd", &GenerationParams::statement());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["inputs"], "abcd");
        assert_eq!(json["parameters"]["max_new_tokens"], 49);
        assert_eq!(json["parameters"]["top_k"], 30);
        assert_eq!(json["parameters"]["do_sample"], true);
        assert_eq!(json["parameters"]["num_return_sequences"], 1);
        assert_eq!(json["parameters"]["return_full_text"], true);
        assert_eq!(json["options"]["wait_for_model"], true);
    }
}
