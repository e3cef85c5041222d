//! Sara Engine Library
//!
//! Core of the Sara responder. It is used by both the main binary and
//! integration tests.

/// Configuration management module
pub mod config;

/// Telemetry and Observability
pub mod telemetry;

/// Bounded memory of recent utterances
pub mod memory;

/// Keyword intent classification
pub mod intent;

/// Persona traits
pub mod persona;

/// Prompt templates
pub mod prompt;

/// Answer quality gate
pub mod quality;

/// Time-of-day replies
pub mod clock;

/// Text generation layer
pub mod llm;

/// Web search fallback
pub mod search;

/// Response pipeline
pub mod pipeline;

/// HTTP endpoint
pub mod server;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
