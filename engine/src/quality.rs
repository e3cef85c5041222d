//! Acceptance check for generated answers to questions
//!
//! Small models like to answer a question with another question, hedge, or
//! trail off after a couple of words. Any of those sends the turn to web search
//! instead.

use regex::Regex;
use std::sync::OnceLock;

/// Answers shorter than this many characters are rejected
pub const MIN_ANSWER_CHARS: usize = 10;

static HEDGE: OnceLock<Regex> = OnceLock::new();

fn hedge() -> &'static Regex {
    HEDGE.get_or_init(|| Regex::new(r"(?i)don['’]t").expect("Invalid hedge pattern"))
}

/// Why an answer was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    AsksBack,
    Hedges,
}

/// Check a generated answer
pub fn check(answer: &str) -> Result<(), Rejection> {
    if answer.chars().count() < MIN_ANSWER_CHARS {
        return Err(Rejection::TooShort);
    }
    if answer.contains('?') {
        return Err(Rejection::AsksBack);
    }
    if hedge().is_match(answer) {
        return Err(Rejection::Hedges);
    }
    Ok(())
}

/// Whether a generated answer is good enough to return
pub fn accept(answer: &str) -> bool {
    check(answer).is_ok()
}
