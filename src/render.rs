//! Colored terminal previews for quickcal types.

use owo_colors::OwoColorize;
use quickcal_core::Event;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        // Multi-day ranges already carry their dates.
        let when = if self.is_single_day() {
            format!("{} {}", self.start.format("%a %-d/%-m"), self.render_range())
        } else {
            self.render_range()
        };

        let when = match self.validate() {
            Ok(()) => when.dimmed().to_string(),
            Err(_) => format!("{} {}", when.red(), "(ends before it starts)".red()),
        };

        format!("📅 {}\n   {}", self.title.bold(), when)
    }
}
