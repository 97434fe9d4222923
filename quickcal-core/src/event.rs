//! The event value produced by the resolver.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{QuickcalError, QuickcalResult};

/// A resolved calendar event.
///
/// Times are floating wall-clock instants (no timezone attached), the same
/// representation a user means when typing "tomorrow at noon".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Event {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Event {
            title: title.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check the `end >= start` contract.
    ///
    /// The resolver never rejects an inverted span on its own; callers that
    /// persist events are expected to call this first.
    pub fn validate(&self) -> QuickcalResult<()> {
        if self.end < self.start {
            return Err(QuickcalError::InvertedInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}
