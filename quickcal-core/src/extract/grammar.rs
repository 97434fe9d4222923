//! Built-in English date/time phrase grammar.
//!
//! Recognises phrases like:
//! - Times: `14:00`, `9:30pm`, `9 am`, `noon`, `midnight`, `at 15`
//! - Days: `today`, `tomorrow`, `yesterday`, `friday`, `next fri`, `last monday`
//! - Calendar dates: `march 5`, `5th of march 2025`, `2024-03-05`, `5/3`
//! - Offsets: `in 20 minutes`, `in 2 weeks`
//! - Ranges: `9am to 5pm`, `tomorrow until friday`, `between 2pm and 4pm`
//! - Durations: `tomorrow at 3pm for 45m`
//!
//! A date without a time is placed at noon, and a time without a date falls on
//! the reference day.

use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;

use super::lexer::{Token, tokenize};
use super::{DateTimeSpan, PhraseParser};
use crate::error::QuickcalResult;

/// Time given to a span that only names a day.
const IMPLIED_HOUR: u32 = 12;

const RANGE_SEPARATORS: &[&str] = &[
    "to", "until", "till", "til", "through", "thru", "-", "\u{2013}", "\u{2014}",
];

/// The grammar shipped with quickcal. Stateless and infallible.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishGrammar;

impl PhraseParser for EnglishGrammar {
    fn parse(&self, text: &str, now: NaiveDateTime) -> QuickcalResult<Vec<DateTimeSpan>> {
        Ok(find_spans(text, now))
    }
}

/// Find every date/time span in `text`, in the order they appear.
pub fn find_spans(text: &str, now: NaiveDateTime) -> Vec<DateTimeSpan> {
    let tokens = tokenize(text);
    let cursor = Cursor {
        tokens: &tokens,
        now,
    };

    let mut spans = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match cursor.span_at(i) {
            Some((parsed, next)) => {
                let range = tokens[i].start..tokens[next - 1].end;
                spans.push(DateTimeSpan {
                    matched_text: text[range.clone()].to_string(),
                    range,
                    start: parsed.start,
                    end: parsed.end,
                });
                i = next;
            }
            None => i += 1,
        }
    }
    spans
}

// =============================================================================
// Internal: Moments and spans
// =============================================================================

/// A point in time as written, before defaults are filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Moment {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

impl Moment {
    fn exact(datetime: NaiveDateTime) -> Self {
        Moment {
            date: Some(datetime.date()),
            time: Some(datetime.time()),
        }
    }

    fn resolve(&self, fallback_date: NaiveDate) -> NaiveDateTime {
        let time = self.time.unwrap_or_else(implied_time);
        self.date.unwrap_or(fallback_date).and_time(time)
    }
}

enum Tail {
    Moment(Moment),
    Duration(Duration),
}

struct ParsedSpan {
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
}

fn implied_time() -> NaiveTime {
    NaiveTime::from_hms_opt(IMPLIED_HOUR, 0, 0).unwrap_or_default()
}

/// `None` when the end would fall outside the representable range.
fn build_span(first: Moment, tail: Option<Tail>, today: NaiveDate) -> Option<ParsedSpan> {
    let span = match tail {
        None => ParsedSpan {
            start: first.resolve(today),
            end: None,
        },
        Some(Tail::Duration(duration)) => {
            let start = first.resolve(today);
            ParsedSpan {
                start,
                end: Some(start.checked_add_signed(duration)?),
            }
        }
        Some(Tail::Moment(second)) => {
            // "9am to 5pm tomorrow": the end's date carries back to the start.
            let start_date = first.date.or(second.date).unwrap_or(today);
            let start = first.resolve(start_date);
            let mut end = second.resolve(start_date);
            if second.date.is_none() && end < start {
                // "22:00 to 01:00" runs past midnight.
                end = end.checked_add_signed(Duration::days(1))?;
            }
            ParsedSpan {
                start,
                end: Some(end),
            }
        }
    };
    Some(span)
}

// =============================================================================
// Internal: Recursive descent over tokens
// =============================================================================

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    now: NaiveDateTime,
}

impl Cursor<'_, '_> {
    fn word(&self, i: usize) -> Option<&str> {
        self.tokens.get(i).map(|t| t.lower.as_str())
    }

    fn is(&self, i: usize, words: &[&str]) -> bool {
        self.word(i).is_some_and(|w| words.contains(&w))
    }

    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// A complete span starting at token `i`, and the index just past it.
    fn span_at(&self, i: usize) -> Option<(ParsedSpan, usize)> {
        if self.is(i, &["between"]) {
            if let Some((first, j)) = self.moment(i + 1) {
                if self.is(j, &["and"]) {
                    if let Some((second, k)) = self.moment(j + 1) {
                        let span = build_span(first, Some(Tail::Moment(second)), self.today());
                        return span.map(|span| (span, k));
                    }
                }
            }
            return None;
        }

        let (first, j) = self.moment(i)?;

        if self.is(j, RANGE_SEPARATORS) {
            if let Some((second, k)) = self.moment(j + 1) {
                if let Some(span) = build_span(first, Some(Tail::Moment(second)), self.today()) {
                    return Some((span, k));
                }
            }
        }

        if self.is(j, &["for"]) {
            if let Some((duration, k)) = self.duration(j + 1) {
                // A duration running past the end of time is left out of the span.
                let span = build_span(first, Some(Tail::Duration(duration)), self.today());
                if let Some(span) = span {
                    return Some((span, k));
                }
            }
        }

        build_span(first, None, self.today()).map(|span| (span, j))
    }

    /// A single point in time: an offset, a date with an optional time, or a
    /// time with an optional date.
    fn moment(&self, i: usize) -> Option<(Moment, usize)> {
        if let Some((datetime, j)) = self.offset(i) {
            return Some((Moment::exact(datetime), j));
        }

        let lead = self.word(i);
        let after_at = lead == Some("at");
        let after_on = lead == Some("on");
        let k = if after_at || after_on { i + 1 } else { i };

        if let Some((date, j)) = self.date(k, after_on) {
            let mut moment = Moment {
                date: Some(date),
                time: None,
            };
            let mut end = j;
            let joined = if self.is(j, &["at", "on", ","]) { j + 1 } else { j };
            let bare_hour = self.is(j, &["at"]);
            if let Some((time, t)) = self.time(joined, bare_hour) {
                moment.time = Some(time);
                end = t;
            }
            return Some((moment, end));
        }

        if let Some((time, j)) = self.time(k, after_at) {
            let mut moment = Moment {
                date: None,
                time: Some(time),
            };
            let mut end = j;
            let on = self.is(j, &["on"]);
            let joined = if on || self.is(j, &[","]) { j + 1 } else { j };
            if let Some((date, d)) = self.date(joined, on) {
                moment.date = Some(date);
                end = d;
            }
            return Some((moment, end));
        }

        None
    }

    /// `in 20 minutes`, `in an hour`, `in 3 weeks`.
    fn offset(&self, i: usize) -> Option<(NaiveDateTime, usize)> {
        if !self.is(i, &["in"]) {
            return None;
        }
        let amount = self.count(i + 1)?;
        let unit = self.word(i + 2)?;
        let delta = match unit {
            "minute" | "minutes" | "min" | "mins" => Duration::try_minutes(amount)?,
            "hour" | "hours" | "hr" | "hrs" => Duration::try_hours(amount)?,
            "day" | "days" => Duration::try_days(amount)?,
            "week" | "weeks" => Duration::try_weeks(amount)?,
            _ => return None,
        };
        Some((self.now.checked_add_signed(delta)?, i + 3))
    }

    fn count(&self, i: usize) -> Option<i64> {
        match self.word(i)? {
            "a" | "an" | "one" => Some(1),
            w => w.parse().ok().filter(|n| *n > 0),
        }
    }

    /// A calendar day. Weekday abbreviations only count when qualified
    /// (`next fri`, `on sat`), so "I sat down" is not a date.
    fn date(&self, i: usize, after_on: bool) -> Option<(NaiveDate, usize)> {
        let word = self.word(i)?;
        let today = self.today();

        match word {
            "today" => return Some((today, i + 1)),
            "tomorrow" | "tmrw" => return Some((today.succ_opt()?, i + 1)),
            "yesterday" => return Some((today.pred_opt()?, i + 1)),
            "next" | "this" | "last" => {
                let weekday = parse_weekday(self.word(i + 1)?, true)?;
                let date = match word {
                    "next" => next_week(today, weekday)?,
                    "this" => upcoming(today, weekday)?,
                    _ => previous(today, weekday)?,
                };
                return Some((date, i + 2));
            }
            _ => {}
        }

        if let Some(weekday) = parse_weekday(word, after_on) {
            return upcoming(today, weekday).map(|date| (date, i + 1));
        }

        if let Some(month) = parse_month(word) {
            let day = parse_day(self.word(i + 1)?)?;
            return self.with_year(month, day, i + 2);
        }

        if let Some(day) = parse_day(word) {
            let m = if self.is(i + 1, &["of"]) { i + 2 } else { i + 1 };
            if let Some(month) = self.word(m).and_then(parse_month) {
                return self.with_year(month, day, m + 1);
            }
        }

        numeric_date(word, today.year()).map(|date| (date, i + 1))
    }

    /// Finish a month/day date with an optional trailing year.
    fn with_year(&self, month: u32, day: u32, i: usize) -> Option<(NaiveDate, usize)> {
        let y = if self.is(i, &[","]) { i + 1 } else { i };
        if let Some(year) = self.word(y).and_then(parse_year) {
            return NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, y + 1));
        }
        NaiveDate::from_ymd_opt(self.today().year(), month, day).map(|d| (d, i))
    }

    /// A time of day. A bare hour such as `15` is only accepted right after
    /// `at`; everywhere else a number needs minutes or am/pm to be a time.
    fn time(&self, i: usize, bare_hour: bool) -> Option<(NaiveTime, usize)> {
        let word = self.word(i)?;
        match word {
            "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0).map(|t| (t, i + 1)),
            "midnight" => return NaiveTime::from_hms_opt(0, 0, 0).map(|t| (t, i + 1)),
            _ => {}
        }

        let caps = clock_regex().captures(word)?;
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };

        let (meridiem, next) = match caps.get(3) {
            Some(m) => (Some(m.as_str().to_string()), i + 1),
            None => match self.word(i + 1).filter(|w| is_meridiem(w)) {
                Some(w) => (Some(w.to_string()), i + 2),
                None => (None, i + 1),
            },
        };

        let hour = match meridiem {
            Some(m) => to_24_hour(hour, m.starts_with('p'))?,
            None if caps.get(2).is_some() || bare_hour => hour,
            None => return None,
        };

        NaiveTime::from_hms_opt(hour, minute, 0).map(|t| (t, next))
    }

    /// `for 45m`, `for 2 hours`, `for an hour`.
    fn duration(&self, i: usize) -> Option<(Duration, usize)> {
        let word = self.word(i)?;
        let (text, next) = match (self.count(i), self.word(i + 1)) {
            (Some(n), Some(unit)) if unit.chars().all(char::is_alphabetic) => {
                (format!("{n}{unit}"), i + 2)
            }
            _ => (word.to_string(), i + 1),
        };
        let std_duration = humantime::parse_duration(&text).ok()?;
        let duration = Duration::from_std(std_duration).ok()?;
        (duration > Duration::zero()).then_some((duration, next))
    }
}

// =============================================================================
// Internal: Word helpers
// =============================================================================

fn clock_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})(?::(\d{2}))?(am|pm|a\.m|p\.m)?$").expect("clock pattern is valid")
    })
}

fn numeric_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:(\d{4})-(\d{1,2})-(\d{1,2})|(\d{1,2})/(\d{1,2})(?:/(\d{2}|\d{4}))?)$")
            .expect("numeric date pattern is valid")
    })
}

fn is_meridiem(word: &str) -> bool {
    matches!(word, "am" | "pm" | "a.m" | "p.m")
}

fn to_24_hour(hour: u32, pm: bool) -> Option<u32> {
    match (hour, pm) {
        (1..=11, false) => Some(hour),
        (12, false) => Some(0),
        (1..=11, true) => Some(hour + 12),
        (12, true) => Some(12),
        _ => None,
    }
}

/// ISO `2024-03-05`, or day-first `5/3` and `5/3/2024`.
fn numeric_date(word: &str, current_year: i32) -> Option<NaiveDate> {
    let caps = numeric_date_regex().captures(word)?;
    let num = |n: usize| caps.get(n).and_then(|m| m.as_str().parse::<u32>().ok());

    if let Some(year) = caps.get(1) {
        let year: i32 = year.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, num(2)?, num(3)?);
    }

    let year = match caps.get(6) {
        Some(y) if y.as_str().len() == 2 => 2000 + y.as_str().parse::<i32>().ok()?,
        Some(y) => y.as_str().parse().ok()?,
        None => current_year,
    };
    NaiveDate::from_ymd_opt(year, num(5)?, num(4)?)
}

fn parse_weekday(word: &str, allow_abbreviation: bool) -> Option<Weekday> {
    let full = match word {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    };
    if full.is_some() || !allow_abbreviation {
        return full;
    }
    match word {
        "mon" => Some(Weekday::Mon),
        "tue" | "tues" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month(word: &str) -> Option<u32> {
    let month = match word {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Day of month, with or without an ordinal suffix (`5`, `5th`, `21st`).
fn parse_day(word: &str) -> Option<u32> {
    let digits = word
        .strip_suffix("st")
        .or_else(|| word.strip_suffix("nd"))
        .or_else(|| word.strip_suffix("rd"))
        .or_else(|| word.strip_suffix("th"))
        .unwrap_or(word);
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|d| (1..=31).contains(d))
}

fn parse_year(word: &str) -> Option<i32> {
    if word.len() != 4 || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse().ok()
}

/// The next `weekday` on or after `today`.
fn upcoming(today: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today.checked_add_signed(Duration::days(ahead.into()))
}

/// `weekday` in the Monday-based week after this one.
fn next_week(today: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let since_monday = i64::from(today.weekday().num_days_from_monday());
    let ahead = 7 + i64::from(weekday.num_days_from_monday()) - since_monday;
    today.checked_add_signed(Duration::days(ahead))
}

/// The most recent `weekday` strictly before `today`.
fn previous(today: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let today_index = today.weekday().num_days_from_monday();
    let back = match (7 + today_index - weekday.num_days_from_monday()) % 7 {
        0 => 7,
        n => n,
    };
    today.checked_sub_signed(Duration::days(back.into()))
}
