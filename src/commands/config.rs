use anyhow::Result;
use owo_colors::OwoColorize;
use quickcal_core::config::QuickcalConfig;

pub fn run(config: &QuickcalConfig) -> Result<()> {
    let config_path = QuickcalConfig::config_path()?;

    if !config_path.exists() {
        QuickcalConfig::create_default_config(&config_path)?;
        println!("{}", format!("  Created {}", config_path.display()).green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Calendar:   {}", config.calendar_path().display());
    println!("{}", "Defaults".bold());
    println!("  Title:      {}", config.default_title);
    println!("  Duration:   {}", config.default_duration);

    Ok(())
}
