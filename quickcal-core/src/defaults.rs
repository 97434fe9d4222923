//! Fallback values for whatever a phrase leaves out.

use chrono::{Duration, NaiveDateTime};

use crate::clock::Clock;
use crate::event::Event;

/// Title used when nothing else is left to name the event.
pub const DEFAULT_TITLE: &str = "Event";

/// Length, in minutes, of an event whose end was not given.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Longest default duration a configuration may ask for, in days.
pub const MAX_DEFAULT_DURATION_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPolicy {
    pub title: String,
    pub duration: Duration,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        DefaultPolicy {
            title: DEFAULT_TITLE.to_string(),
            duration: Duration::minutes(DEFAULT_DURATION_MINUTES),
        }
    }
}

impl DefaultPolicy {
    /// The event you get from no input at all: starting now, lasting the
    /// default duration. Reads the clock on every call.
    pub fn default_event(&self, clock: &impl Clock) -> Event {
        self.event_at(clock.now())
    }

    pub fn event_at(&self, now: NaiveDateTime) -> Event {
        Event::new(self.title.clone(), now, self.end_for(now))
    }

    /// End for a start with no explicit end. Saturates at the latest
    /// representable instant.
    pub fn end_for(&self, start: NaiveDateTime) -> NaiveDateTime {
        start
            .checked_add_signed(self.duration)
            .unwrap_or(NaiveDateTime::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn default_event_starts_now_and_lasts_an_hour() {
        let now = datetime(2024, 3, 1, 9, 0);
        let event = DefaultPolicy::default().default_event(&FixedClock(now));
        assert_eq!(event.title, "Event");
        assert_eq!(event.start, now);
        assert_eq!(event.end, datetime(2024, 3, 1, 10, 0));
    }

    #[test]
    fn default_end_crosses_midnight() {
        let policy = DefaultPolicy::default();
        assert_eq!(
            policy.end_for(datetime(2024, 3, 1, 23, 30)),
            datetime(2024, 3, 2, 0, 30)
        );
    }

    #[test]
    fn default_end_crosses_year_boundary() {
        let policy = DefaultPolicy::default();
        assert_eq!(
            policy.end_for(datetime(2024, 12, 31, 23, 15)),
            datetime(2025, 1, 1, 0, 15)
        );
    }

    #[test]
    fn default_end_saturates_at_the_end_of_time() {
        let policy = DefaultPolicy {
            title: DEFAULT_TITLE.to_string(),
            duration: Duration::weeks(52 * 1_000_000),
        };
        let start = datetime(2024, 3, 1, 9, 0);
        assert_eq!(policy.end_for(start), NaiveDateTime::MAX);
        assert_eq!(DefaultPolicy::default().end_for(NaiveDateTime::MAX), NaiveDateTime::MAX);
    }

    #[test]
    fn custom_policy_is_honoured() {
        let policy = DefaultPolicy {
            title: "Busy".to_string(),
            duration: Duration::minutes(30),
        };
        let event = policy.event_at(datetime(2024, 3, 1, 9, 0));
        assert_eq!(event.title, "Busy");
        assert_eq!(event.end, datetime(2024, 3, 1, 9, 30));
    }
}
