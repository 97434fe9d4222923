//! Core engine for quickcal.
//!
//! Turns a typed phrase ("lunch tomorrow at noon") into an [`Event`]:
//! - `extract` finds the date/time span in the text
//! - `title` cleans what is left into a title
//! - `defaults` fills in anything missing
//! - `resolver` ties the three together
//!
//! `format` and `ics` are for the display and calendar hand-off sides.

pub mod clock;
pub mod config;
pub mod defaults;
pub mod error;
pub mod event;
pub mod extract;
pub mod format;
pub mod ics;
pub mod resolver;
pub mod title;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event::Event;
pub use resolver::{Resolver, resolve};
