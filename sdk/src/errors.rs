//! Error types and handling
//!
//! This module provides the error types used throughout the Sara engine.
//! All errors implement the `SaraErrorExt` trait which provides user-friendly
//! hints and indicates whether errors are recoverable.
//!
//! # Security
//!
//! Hints never include API keys, search engine identifiers or provider URLs,
//! so they are safe to return as an HTTP response body.

use thiserror::Error;

/// Trait for Sara error extensions
///
/// This trait provides additional context for errors, including user-friendly
/// hints and recoverability information. All engine errors implement this trait.
pub trait SaraErrorExt {
    /// Returns a user-friendly hint for the error
    ///
    /// The hint is safe to display to end users and does not contain
    /// secrets or internal implementation details.
    fn user_hint(&self) -> &str;

    /// Returns whether the error is recoverable
    ///
    /// Recoverable errors may succeed on a later request without operator
    /// intervention (a provider that was briefly down, a flaky network).
    fn is_recoverable(&self) -> bool;
}

/// Main engine error type
///
/// # Error Categories
///
/// - **Configuration**: Invalid or missing configuration
/// - **Generation**: The text-generation provider failed; the pipeline never
///   recovers from these, callers decide how to present them
/// - **Search**: The web-search provider failed (normally absorbed by the
///   search fallback, surfaced only by diagnostics)
/// - **Network**: Binding or serving the HTTP endpoint failed
///
/// # Examples
///
/// ```
/// use sdk::errors::{EngineError, SaraErrorExt};
///
/// let error = EngineError::Generation("model not loaded".to_string());
/// println!("Hint: {}", error.user_hint());
/// assert!(error.is_recoverable());
///
/// let fatal_error = EngineError::Config("bad port".to_string());
/// assert!(!fatal_error.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Text generation errors
    #[error("Generation failed: {0}")]
    Generation(String),

    // Web search errors
    #[error("Search failed: {0}")]
    Search(String),

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    // Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SaraErrorExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Config(_) => "Check your config.toml file for errors",
            Self::Generation(_) => {
                "Sara says: My thinking cap slipped—give me a moment and ask again!"
            }
            Self::Search(_) => "Web search is unavailable. Check the search API key and engine id",
            Self::Network(_) => "Network operation failed. Check your connection",
            Self::Io(_) => "File system operation failed",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_hint_is_speaker_tagged() {
        let err = EngineError::Generation("connection refused".to_string());
        assert!(err.user_hint().starts_with("Sara says: "));
        assert!(!err.user_hint().contains("connection refused"));
    }

    #[test]
    fn test_recoverability() {
        assert!(!EngineError::Config("x".into()).is_recoverable());
        assert!(EngineError::Generation("x".into()).is_recoverable());
        assert!(EngineError::Search("x".into()).is_recoverable());
        assert!(EngineError::Network("x".into()).is_recoverable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io(_)));
        assert_eq!(err.user_hint(), "File system operation failed");
    }
}
