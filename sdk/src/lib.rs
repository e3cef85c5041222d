//! Sara SDK
//!
//! Shared error and wire types used by the engine and by anything that talks
//! to it.

/// Error types and handling
pub mod errors;

/// Generation and search wire types
pub mod types;

// Re-export commonly used types
pub use errors::{EngineError, SaraErrorExt};
pub use types::{GenerationParams, MissingSnippet, SearchItem, SearchResponse};
