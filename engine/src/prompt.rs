//! Generation prompt construction

use crate::memory::Context;
use crate::persona::Trait;

/// Words whose presence marks an utterance as a question.
///
/// Matched as plain substrings of the lowercased utterance, so "is" also hits
/// "this" and "island".
pub const QUESTION_WORDS: [&str; 8] = ["what", "why", "how", "when", "where", "who", "is", "are"];

/// Whether the utterance should take the question branch
pub fn is_question(utterance: &str) -> bool {
    let lower = utterance.to_lowercase();
    QUESTION_WORDS.iter().any(|w| lower.contains(w))
}

/// Compose the prompt for the language model
pub fn build(context: &Context, persona: Trait, utterance: &str, is_question: bool) -> String {
    if is_question {
        format!(
            "With chat history ({}), answer clearly as a {} assistant: {}",
            context, persona, utterance
        )
    } else {
        format!(
            "Using history ({}), respond as a {} assistant: {}",
            context, persona, utterance
        )
    }
}
