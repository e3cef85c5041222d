//! Google Custom Search JSON API provider

use async_trait::async_trait;
use reqwest::Client;
use sdk::SearchResponse;
use std::time::Duration;

use super::{SearchError, SearchProvider};
use crate::config::SearchConfig;

pub struct GoogleSearch {
    base_url: String,
    api_key: String,
    engine_id: String,
    client: Client,
}

impl GoogleSearch {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            client,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.api_key,
            &config.engine_id,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Whether both credentials are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.engine_id.is_empty()
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    fn name(&self) -> &str {
        "google"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        tracing::debug!("Google search: {:?}", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SearchResponse>()
                .await
                .map_err(|e| SearchError::Parse(e.without_url().to_string()));
        }

        // Quota and key errors still come back as JSON; they carry no items
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<SearchResponse>(&body) {
            Ok(parsed) => {
                tracing::warn!("Google search returned {}: {}", status, body);
                Ok(parsed)
            }
            Err(_) => Err(SearchError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
