//! Short-term conversational memory
//!
//! Holds the last few raw utterances in arrival order. Each call to
//! [`MemoryBuffer::record`] appends the current utterance, evicts the oldest
//! entries once the capacity is exceeded, and hands back the [`Context`] made of
//! every entry that came before the current one.

use std::collections::VecDeque;
use std::fmt;

/// Default number of utterances remembered
pub const DEFAULT_CAPACITY: usize = 5;

/// Rendered context when there is no prior turn
pub const NO_HISTORY: &str = "No chat history yet.";

/// Fixed-capacity FIFO of recent utterances
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl MemoryBuffer {
    /// Create a buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a buffer holding at most `capacity` utterances (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record the current utterance and return the context of prior turns
    pub fn record(&mut self, utterance: impl Into<String>) -> Context {
        self.entries.push_back(utterance.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }

        let prior = self.entries.len() - 1;
        Context {
            entries: self.entries.iter().take(prior).cloned().collect(),
        }
    }

    /// Remembered utterances, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Prior turns as seen by the current one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    entries: Vec<String>,
}

impl Context {
    /// Prior utterances, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            f.write_str(NO_HISTORY)
        } else {
            f.write_str(&self.entries.join(" "))
        }
    }
}
