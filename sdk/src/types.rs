//! Wire types shared between the engine and its external capabilities

use serde::{Deserialize, Serialize};

/// Decoding configuration handed to a text-generation provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Total length cap in tokens, prompt included
    pub max_length: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Top-k sampling cutoff
    pub top_k: u32,

    /// Nucleus sampling probability mass
    pub top_p: f32,

    /// Sample instead of greedy decoding
    pub do_sample: bool,

    /// Number of sequences to return
    pub num_return_sequences: u32,

    /// Pad using the model's end-of-sequence token
    pub pad_with_eos: bool,
}

impl GenerationParams {
    /// Parameters for question-style utterances
    pub const fn question() -> Self {
        Self {
            max_length: 60,
            temperature: 0.6,
            top_k: 30,
            top_p: 0.9,
            do_sample: true,
            num_return_sequences: 1,
            pad_with_eos: true,
        }
    }

    /// Parameters for statement-style utterances
    pub const fn statement() -> Self {
        Self {
            max_length: 50,
            temperature: 0.7,
            ..Self::question()
        }
    }
}

/// Response body of a web-search provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Result items, most relevant first. Absent when nothing matched.
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

impl SearchResponse {
    /// Snippet of the top result.
    ///
    /// `Ok(None)` when there are no items. Only the top item has to carry a
    /// snippet; later items are never looked at.
    pub fn first_snippet(&self) -> Result<Option<&str>, MissingSnippet> {
        match self.items.first() {
            None => Ok(None),
            Some(item) => item.snippet.as_deref().map(Some).ok_or(MissingSnippet),
        }
    }
}

/// The top search result came back without a snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Top search result has no snippet")]
pub struct MissingSnippet;

/// A single search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Short excerpt of the page. Google leaves it out for some results
    /// (PDFs, bare links).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}
