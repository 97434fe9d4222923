//! Text in, event out.

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::defaults::DefaultPolicy;
use crate::error::QuickcalResult;
use crate::event::Event;
use crate::extract::{DateTimeExtractor, EnglishGrammar, PhraseParser};
use crate::title::extract_title;

/// Turns a typed phrase into an [`Event`].
///
/// Resolution only reads the clock; the same text at the same instant always
/// gives the same event. Callers that fire it on every keystroke are
/// responsible for dropping stale results themselves.
#[derive(Debug, Clone)]
pub struct Resolver<C = SystemClock, P = EnglishGrammar> {
    clock: C,
    extractor: DateTimeExtractor<P>,
    defaults: DefaultPolicy,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(SystemClock, EnglishGrammar)
    }
}

impl<C: Clock, P: PhraseParser> Resolver<C, P> {
    pub fn new(clock: C, parser: P) -> Self {
        Resolver {
            clock,
            extractor: DateTimeExtractor::new(parser),
            defaults: DefaultPolicy::default(),
        }
    }

    /// Replace the fallback title/duration.
    pub fn with_defaults(mut self, defaults: DefaultPolicy) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &DefaultPolicy {
        &self.defaults
    }

    /// Resolve `text` into an event.
    ///
    /// - Empty text gives the default event.
    /// - Text without a date/time keeps the whole text, untouched, as the
    ///   title and the default start/end.
    /// - Otherwise the first span sets start/end and the rest of the text,
    ///   cleaned up, becomes the title.
    ///
    /// The only error is a fault raised by the phrase parser itself.
    pub fn resolve(&self, text: &str) -> QuickcalResult<Event> {
        let now = self.clock.now();
        let mut event = self.defaults.event_at(now);

        if text.is_empty() {
            debug!("empty input, using default event");
            return Ok(event);
        }

        let Some(span) = self.extractor.extract(text, now)? else {
            debug!("no date/time in input, using it as the title");
            event.title = text.to_string();
            return Ok(event);
        };

        debug!(
            matched = %span.matched_text,
            start = %span.start,
            end = ?span.end,
            "found date/time span"
        );

        event.start = span.start;
        event.end = span
            .end
            .unwrap_or_else(|| self.defaults.end_for(span.start));

        let title = extract_title(text, &span.matched_text);
        event.title = if title.is_empty() {
            self.defaults.title.clone()
        } else {
            title
        };

        Ok(event)
    }
}

/// Resolve `text` against the system clock with the built-in grammar.
pub fn resolve(text: &str) -> QuickcalResult<Event> {
    Resolver::new(SystemClock, EnglishGrammar).resolve(text)
}
