use anyhow::Result;
use quickcal_core::Event;
use quickcal_core::clock::Clock;
use quickcal_core::extract::PhraseParser;
use quickcal_core::resolver::Resolver;

use crate::render::Render;

pub fn run<C: Clock, P: PhraseParser>(
    resolver: &Resolver<C, P>,
    text: &str,
    json: bool,
) -> Result<()> {
    let event = resolver.resolve(text)?;
    println!("{}", output(&event, json)?);
    Ok(())
}

fn output(event: &Event, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(event)?)
    } else {
        Ok(event.render())
    }
}
