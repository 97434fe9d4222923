//! Display helpers for event times.
//!
//! Hours, days and months are not zero-padded; minutes always are
//! ("9:05", "1/3 14:00").

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::event::Event;

/// True when both instants fall on the same calendar day.
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// `H:MM`
pub fn format_time(dt: NaiveDateTime) -> String {
    format!("{}:{:02}", dt.hour(), dt.minute())
}

/// `D/M`
pub fn format_day_month(dt: NaiveDateTime) -> String {
    format!("{}/{}", dt.day(), dt.month())
}

/// `H:MM - H:MM` on a single day, `D/M H:MM - D/M H:MM` otherwise.
pub fn format_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if same_day(start, end) {
        format!("{} - {}", format_time(start), format_time(end))
    } else {
        format!(
            "{} {} - {} {}",
            format_day_month(start),
            format_time(start),
            format_day_month(end),
            format_time(end)
        )
    }
}

impl Event {
    /// Starts and ends on the same calendar day.
    pub fn is_single_day(&self) -> bool {
        same_day(self.start, self.end)
    }

    /// The event's time range as shown to the user.
    pub fn render_range(&self) -> String {
        format_range(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    // --- same_day ---

    #[test]
    fn same_day_is_reflexive_and_symmetric() {
        let a = datetime(2024, 3, 1, 8, 0, 0);
        let b = datetime(2024, 3, 1, 22, 45, 10);
        assert!(same_day(a, a));
        assert!(same_day(a, b));
        assert!(same_day(b, a));
    }

    #[test]
    fn same_day_across_midnight_is_false() {
        let before = datetime(2024, 3, 1, 23, 59, 59);
        let after = datetime(2024, 3, 2, 0, 0, 1);
        assert!(!same_day(before, after));
        assert!(!same_day(after, before));
    }

    #[test]
    fn same_day_compares_year_and_month_too() {
        assert!(!same_day(datetime(2024, 3, 1, 9, 0, 0), datetime(2025, 3, 1, 9, 0, 0)));
        assert!(!same_day(datetime(2024, 3, 1, 9, 0, 0), datetime(2024, 4, 1, 9, 0, 0)));
    }

    // --- formatting ---

    #[test]
    fn time_pads_minutes_not_hours() {
        assert_eq!(format_time(datetime(2024, 3, 1, 9, 5, 0)), "9:05");
        assert_eq!(format_time(datetime(2024, 3, 1, 14, 30, 0)), "14:30");
        assert_eq!(format_time(datetime(2024, 3, 1, 0, 0, 0)), "0:00");
    }

    #[test]
    fn single_day_range() {
        let range = format_range(datetime(2024, 3, 1, 14, 0, 0), datetime(2024, 3, 1, 16, 0, 0));
        assert_eq!(range, "14:00 - 16:00");
    }

    #[test]
    fn multi_day_range() {
        let range = format_range(datetime(2024, 3, 2, 12, 0, 0), datetime(2024, 3, 8, 12, 0, 0));
        assert_eq!(range, "2/3 12:00 - 8/3 12:00");
    }

    #[test]
    fn range_over_midnight_shows_days() {
        let range = format_range(datetime(2024, 12, 31, 23, 30, 0), datetime(2025, 1, 1, 0, 30, 0));
        assert_eq!(range, "31/12 23:30 - 1/1 0:30");
    }

    #[test]
    fn event_render_range() {
        let event = Event::new(
            "x",
            datetime(2024, 3, 1, 9, 0, 0),
            datetime(2024, 3, 1, 10, 0, 0),
        );
        assert!(event.is_single_day());
        assert_eq!(event.render_range(), "9:00 - 10:00");
    }
}
