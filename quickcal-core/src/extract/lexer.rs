//! Word tokenizer that remembers where each token came from.

use std::sync::OnceLock;

use regex::Regex;

/// A word of the input together with its byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub lower: String,
    pub start: usize,
    pub end: usize,
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Words keep inner separators so "14:00", "2024-03-05", "5/3" and
    // "o'clock" stay whole. Commas and free-standing dashes are tokens of
    // their own because the grammar uses them as connectives.
    RE.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:[:/.\-'][\p{L}\p{N}]+)*|[,\-\u{2013}\u{2014}]")
            .expect("token pattern is valid")
    })
}

fn clock_side_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\d{1,2}(?::\d{2})?(am|pm)?$").expect("clock side pattern is valid")
    })
}

/// Byte offset of the dash in an unspaced time range such as `9am-5pm` or
/// `12:00-13:00`. Bare numbers (`5-7`) and ISO dates are left whole.
fn clock_range_dash(word: &str) -> Option<usize> {
    let (left, right) = word.split_once('-')?;
    let explicit = |side: &str| {
        clock_side_regex()
            .captures(side)
            .is_some_and(|caps| side.contains(':') || caps.get(1).is_some())
    };
    let clock = |side: &str| clock_side_regex().is_match(side);

    (clock(left) && clock(right) && (explicit(left) || explicit(right))).then_some(left.len())
}

fn token(text: &str, start: usize, end: usize) -> Token<'_> {
    let word = &text[start..end];
    Token {
        text: word,
        lower: word.to_lowercase(),
        start,
        end,
    }
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for m in token_regex().find_iter(text) {
        match clock_range_dash(m.as_str()) {
            Some(offset) => {
                let dash = m.start() + offset;
                tokens.push(token(text, m.start(), dash));
                tokens.push(token(text, dash, dash + 1));
                tokens.push(token(text, dash + 1, m.end()));
            }
            None => tokens.push(token(text, m.start(), m.end())),
        }
    }
    tokens
}
