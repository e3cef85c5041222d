//! Keyword intent classification
//!
//! Routes an utterance to one of a handful of fixed strategies using
//! case-insensitive substring checks. Rules are evaluated in priority order and
//! the first match wins, so "what time is the weather report" is a
//! [`Strategy::TimeQuery`].

use crate::memory::Context;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Handling path chosen for an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// "who are you" style questions
    IdentityQuery,

    /// The user asks Sara to recall their name
    NameGuess,

    /// Current time, optionally in Dubai
    TimeQuery,

    /// Weather, answered from web search
    WeatherQuery,

    /// Everything else goes to the language model
    Generate,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::IdentityQuery => write!(f, "identity"),
            Strategy::NameGuess => write!(f, "name_guess"),
            Strategy::TimeQuery => write!(f, "time"),
            Strategy::WeatherQuery => write!(f, "weather"),
            Strategy::Generate => write!(f, "generate"),
        }
    }
}

/// Ordered keyword rules; the first rule with a matching keyword wins
const RULES: &[(&[&str], Strategy)] = &[
    (&["your name", "who are you"], Strategy::IdentityQuery),
    (&["my name"], Strategy::NameGuess),
    (&["time"], Strategy::TimeQuery),
    (&["weather"], Strategy::WeatherQuery),
];

/// Classify an utterance
pub fn classify(utterance: &str) -> Strategy {
    let lower = utterance.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, strategy)| *strategy)
        .unwrap_or(Strategy::Generate)
}

/// `i'm` followed by the next word. Accepts both the ASCII and the typographic
/// apostrophe.
static SELF_INTRO: OnceLock<Regex> = OnceLock::new();

fn self_intro() -> &'static Regex {
    SELF_INTRO
        .get_or_init(|| Regex::new(r"(?i)i['’]m\s*(\S+)").expect("Invalid self-intro pattern"))
}

/// Find the name the user gave in an earlier turn.
///
/// Scans prior entries oldest first and returns the word right after the first
/// `i'm` in the first entry that has one.
pub fn guess_name(context: &Context) -> Option<&str> {
    context.entries().iter().find_map(|entry| {
        self_intro()
            .captures(entry)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    })
}
