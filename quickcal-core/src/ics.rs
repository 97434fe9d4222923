//! ICS generation for the calendar hand-off.
//!
//! Events cross into the calendar as structured iCalendar properties built
//! with the `icalendar` crate; the title is never spliced into a command or
//! raw line by hand.

use chrono::{DateTime, NaiveDateTime, Utc};
use icalendar::{Calendar, Component, EventLike};
use uuid::Uuid;

use crate::event::Event;

/// A fresh globally unique UID for a new event.
pub fn new_uid() -> String {
    format!("{}@quickcal", Uuid::new_v4())
}

/// Generate .ics content for a single event.
pub fn generate_ics(event: &Event, uid: &str, stamp: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(uid);
    ics_event.summary(&sanitize_text(&event.title));
    ics_event.add_property("DTSTAMP", stamp.format("%Y%m%dT%H%M%SZ").to_string());

    // Floating times: no Z, no TZID
    ics_event.add_property("DTSTART", floating(event.start));
    ics_event.add_property("DTEND", floating(event.end));

    cal.push(ics_event.done());
    strip_ics_bloat(&cal.done().to_string())
}

fn floating(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Replace control characters (line breaks in particular) with spaces so a
/// title can never start a property line of its own.
fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with QUICKCAL
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:QUICKCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
