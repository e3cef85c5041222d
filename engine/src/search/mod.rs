//! Web search fallback
//!
//! [`SearchProvider`] is the external search capability. [`SearchFallback`]
//! turns whatever it returns, including failures, into a reply the user can
//! read. Nothing in this module ever fails past `SearchFallback::reply`.

use async_trait::async_trait;
use sdk::{EngineError, SearchResponse};
use std::sync::Arc;

pub mod google;

/// Reply when the search returned no items
pub const NOTHING_FOUND: &str = "Sara says: Not much online—let me think it over!";

/// Reply when the search itself failed
pub const WEB_HICCUP: &str = "Sara says: Web hiccup—here's my best guess instead!";

/// Errors from a search provider
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(String),

    #[error("Search API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed search response: {0}")]
    Parse(String),
}

impl From<SearchError> for EngineError {
    fn from(err: SearchError) -> Self {
        EngineError::Search(err.to_string())
    }
}

/// External web-search capability
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Run one query
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError>;
}

/// Turns search outcomes into replies
#[derive(Clone)]
pub struct SearchFallback {
    provider: Arc<dyn SearchProvider>,
}

impl SearchFallback {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Search for `query` and describe the top hit
    pub async fn reply(&self, query: &str) -> String {
        match self.provider.search(query).await {
            Ok(response) => match response.first_snippet() {
                Ok(Some(snippet)) => format!("Sara says: Here's the latest—{}", snippet),
                Ok(None) => {
                    tracing::info!("Search for {:?} returned no items", query);
                    NOTHING_FOUND.to_string()
                }
                Err(e) => {
                    tracing::warn!("Search via {} for {:?}: {}", self.provider.name(), query, e);
                    WEB_HICCUP.to_string()
                }
            },
            Err(e) => {
                tracing::warn!("Search via {} failed: {}", self.provider.name(), e);
                WEB_HICCUP.to_string()
            }
        }
    }

    pub fn provider(&self) -> &Arc<dyn SearchProvider> {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk::SearchItem;

    enum Canned {
        Items(Vec<Option<&'static str>>),
        Fail,
    }

    #[async_trait]
    impl SearchProvider for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn search(&self, _query: &str) -> Result<SearchResponse, SearchError> {
            match self {
                Canned::Items(snippets) => Ok(SearchResponse {
                    items: snippets
                        .iter()
                        .map(|s| SearchItem {
                            title: None,
                            link: None,
                            snippet: s.map(String::from),
                        })
                        .collect(),
                }),
                Canned::Fail => Err(SearchError::Request("connection reset".to_string())),
            }
        }
    }

    fn fallback(canned: Canned) -> SearchFallback {
        SearchFallback::new(Arc::new(canned))
    }

    #[tokio::test]
    async fn test_first_snippet_wins() {
        let reply = fallback(Canned::Items(vec![Some("Sunny, 21C"), Some("Rainy")]))
            .reply("weather in Paris")
            .await;
        assert_eq!(reply, "Sara says: Here's the latest—Sunny, 21C");
    }

    #[tokio::test]
    async fn test_later_item_without_snippet_is_ignored() {
        let reply = fallback(Canned::Items(vec![Some("Sunny, 21C"), None]))
            .reply("weather in Paris")
            .await;
        assert_eq!(reply, "Sara says: Here's the latest—Sunny, 21C");
    }

    #[tokio::test]
    async fn test_top_item_without_snippet() {
        let reply = fallback(Canned::Items(vec![None, Some("Rainy")]))
            .reply("weather in Paris")
            .await;
        assert_eq!(reply, WEB_HICCUP);
    }

    #[tokio::test]
    async fn test_no_items() {
        let reply = fallback(Canned::Items(vec![])).reply("xyzzy").await;
        assert_eq!(reply, NOTHING_FOUND);
    }

    #[tokio::test]
    async fn test_failure_is_absorbed() {
        let reply = fallback(Canned::Fail).reply("anything").await;
        assert_eq!(reply, WEB_HICCUP);
    }

    #[test]
    fn test_error_conversion() {
        let err: EngineError = SearchError::Status {
            status: 403,
            body: "forbidden".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::Search(_)));
    }
}
