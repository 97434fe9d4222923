use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use quickcal_core::clock::Clock;
use quickcal_core::extract::PhraseParser;
use quickcal_core::resolver::Resolver;

use crate::render::Render;
use crate::store;

/// Resolve the phrase, show what will be created, and write it to the
/// calendar directory once confirmed.
pub fn run<C: Clock, P: PhraseParser>(
    resolver: &Resolver<C, P>,
    text: &str,
    calendar_dir: &Path,
    yes: bool,
) -> Result<()> {
    let event = resolver.resolve(text)?;

    println!("{}", event.render());

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("  Create this event?")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", "  Discarded".dimmed());
            return Ok(());
        }
    }

    let path = store::create(calendar_dir, &event)?;
    println!("{}", format!("  Created: {}", path.display()).green());

    Ok(())
}
