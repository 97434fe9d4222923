//! Hand resolved events to the calendar directory as .ics files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use quickcal_core::Event;
use quickcal_core::ics;
use tracing::debug;

/// Write `event` into `dir` and return the path of the new file.
///
/// The event is validated first; an event that ends before it starts is
/// refused rather than written.
pub fn create(dir: &Path, event: &Event) -> Result<PathBuf> {
    event.validate()?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let content = ics::generate_ics(event, &ics::new_uid(), Utc::now());
    let path = dir.join(filename_for(event, dir)?);

    std::fs::write(&path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), "wrote event");
    Ok(path)
}

// =============================================================================
// Internal: Filename generation
// =============================================================================

/// Generate the filename to use for an event in a directory.
/// Handles collisions by adding numeric suffixes (-2, -3, etc).
fn filename_for(event: &Event, dir: &Path) -> Result<String> {
    let base = base_filename(event);

    if !dir.join(format!("{}.ics", base)).exists() {
        return Ok(format!("{}.ics", base));
    }

    for n in 2..=100 {
        let candidate = format!("{}-{}.ics", base, n);
        if !dir.join(&candidate).exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("Too many filename collisions for '{}'", base)
}

/// `YYYY-MM-DDTHHMM__slug`
fn base_filename(event: &Event) -> String {
    let slug = slugify(&event.title);
    let slug = if slug.is_empty() { "event".to_string() } else { slug };
    format!("{}__{}", event.start.format("%Y-%m-%dT%H%M"), slug)
}

/// Lowercase title with every run of other characters collapsed to one `-`,
/// capped at 50 characters.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if !c.is_alphanumeric() {
            pending_dash = true;
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push(c);
    }
    slug.chars().take(50).collect()
}
