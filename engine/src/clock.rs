//! Wall clock and time-of-day replies

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Dubai;

/// Reply timestamp layout, e.g. `09:05, March 04, 2025`
pub const TIME_FORMAT: &str = "%H:%M, %B %d, %Y";

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Answer a time question for the given instant.
///
/// Mentioning Dubai anywhere in the utterance switches to Gulf Standard Time.
pub fn time_reply(now: DateTime<Utc>, utterance: &str) -> String {
    if utterance.to_lowercase().contains("dubai") {
        let local = now.with_timezone(&Dubai).format(TIME_FORMAT);
        format!("Sara says: It's {} in Dubai—right on the dot!", local)
    } else {
        format!("Sara says: It's {} UTC—where you at?", now.format(TIME_FORMAT))
    }
}
