use std::io::{BufRead, Write};

use anyhow::Result;
use owo_colors::OwoColorize;
use quickcal_core::Event;
use quickcal_core::clock::Clock;
use quickcal_core::extract::PhraseParser;
use quickcal_core::resolver::Resolver;
use tracing::warn;

use crate::render::Render;

/// Re-resolve every input line, the way an editor would on each keystroke.
///
/// A line that fails to resolve leaves the previous preview on screen.
pub fn run<C, P, R, W>(resolver: &Resolver<C, P>, input: R, mut out: W) -> Result<()>
where
    C: Clock,
    P: PhraseParser,
    R: BufRead,
    W: Write,
{
    let mut shown: Option<Event> = None;

    for line in input.lines() {
        let line = line?;
        match resolver.resolve(&line) {
            Ok(event) => {
                writeln!(out, "{}", event.render())?;
                shown = Some(event);
            }
            Err(e) => {
                warn!(input = %line, error = %e, "could not resolve input");
                writeln!(out, "  {}", e.to_string().red())?;
                if let Some(previous) = &shown {
                    writeln!(out, "{}", previous.render())?;
                }
            }
        }
    }

    Ok(())
}
