//! Date/time span extraction.
//!
//! The phrase parser sits behind [`PhraseParser`] so the resolver does not care
//! which grammar finds the spans. [`EnglishGrammar`] is the built-in one.

pub mod grammar;
mod lexer;

use std::ops::Range;

use chrono::NaiveDateTime;
use tracing::trace;

use crate::error::QuickcalResult;

pub use grammar::EnglishGrammar;

/// A date/time expression found inside free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeSpan {
    /// The exact substring of the input the span was read from.
    pub matched_text: String,
    /// Byte offsets of `matched_text` within the input.
    pub range: Range<usize>,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

/// Anything that can find date/time spans in text.
///
/// Implementations return spans in priority order. `now` is the reference for
/// relative expressions like "tomorrow". Returning `Ok(vec![])` means "no date
/// here", which is not an error.
pub trait PhraseParser {
    fn parse(&self, text: &str, now: NaiveDateTime) -> QuickcalResult<Vec<DateTimeSpan>>;
}

impl<P: PhraseParser + ?Sized> PhraseParser for &P {
    fn parse(&self, text: &str, now: NaiveDateTime) -> QuickcalResult<Vec<DateTimeSpan>> {
        (**self).parse(text, now)
    }
}

impl<P: PhraseParser + ?Sized> PhraseParser for Box<P> {
    fn parse(&self, text: &str, now: NaiveDateTime) -> QuickcalResult<Vec<DateTimeSpan>> {
        (**self).parse(text, now)
    }
}

/// Picks the single span the resolver works with.
#[derive(Debug, Clone, Default)]
pub struct DateTimeExtractor<P> {
    parser: P,
}

impl<P: PhraseParser> DateTimeExtractor<P> {
    pub fn new(parser: P) -> Self {
        DateTimeExtractor { parser }
    }

    /// The first span the parser reports, or `None` if there is none.
    pub fn extract(&self, text: &str, now: NaiveDateTime) -> QuickcalResult<Option<DateTimeSpan>> {
        if text.is_empty() {
            return Ok(None);
        }

        let spans = self.parser.parse(text, now)?;
        trace!(count = spans.len(), "phrase parser returned spans");

        Ok(spans.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuickcalError;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn span(text: &str, hour: u32) -> DateTimeSpan {
        DateTimeSpan {
            matched_text: text.to_string(),
            range: 0..text.len(),
            start: now().date().and_hms_opt(hour, 0, 0).unwrap(),
            end: None,
        }
    }

    struct Canned(Vec<DateTimeSpan>);

    impl PhraseParser for Canned {
        fn parse(&self, _text: &str, _now: NaiveDateTime) -> QuickcalResult<Vec<DateTimeSpan>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl PhraseParser for Broken {
        fn parse(&self, _text: &str, _now: NaiveDateTime) -> QuickcalResult<Vec<DateTimeSpan>> {
            Err(QuickcalError::Parser("grammar exploded".into()))
        }
    }

    #[test]
    fn picks_first_span() {
        let extractor = DateTimeExtractor::new(Canned(vec![span("at 9", 9), span("at 10", 10)]));
        let found = extractor.extract("x at 9 and at 10", now()).unwrap().unwrap();
        assert_eq!(found.matched_text, "at 9");
    }

    #[test]
    fn no_spans_is_none() {
        let extractor = DateTimeExtractor::new(Canned(Vec::new()));
        assert!(extractor.extract("hello", now()).unwrap().is_none());
    }

    #[test]
    fn empty_text_skips_parser() {
        let extractor = DateTimeExtractor::new(Broken);
        assert!(extractor.extract("", now()).unwrap().is_none());
    }

    #[test]
    fn parser_fault_propagates() {
        let extractor = DateTimeExtractor::new(Broken);
        let err = extractor.extract("tomorrow", now()).unwrap_err();
        assert!(matches!(err, QuickcalError::Parser(_)));
    }

    #[test]
    fn built_in_grammar_through_extractor() {
        let extractor = DateTimeExtractor::new(EnglishGrammar);
        let found = extractor.extract("lunch tomorrow at noon", now()).unwrap().unwrap();
        assert_eq!(found.matched_text, "tomorrow at noon");
    }
}
