//! Error types for quickcal.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while resolving or handing off events.
///
/// A phrase without any date/time in it is *not* an error: extraction
/// reports it as `Ok(None)` and the resolver falls back to a freeform title.
#[derive(Error, Debug)]
pub enum QuickcalError {
    /// The phrase parser itself failed (only third-party parsers do this).
    #[error("Date parser error: {0}")]
    Parser(String),

    #[error("Event ends ({end}) before it starts ({start})")]
    InvertedInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for quickcal operations.
pub type QuickcalResult<T> = Result<T, QuickcalError>;
