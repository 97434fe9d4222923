mod commands;
mod render;
mod store;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quickcal_core::SystemClock;
use quickcal_core::config::QuickcalConfig;
use quickcal_core::extract::EnglishGrammar;
use quickcal_core::resolver::Resolver;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quickcal")]
#[command(about = "Turn a phrase like \"lunch tomorrow at noon\" into a calendar event")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the event a phrase resolves to
    Parse {
        /// The phrase, e.g. "lunch from tomorrow to next friday"
        text: Vec<String>,

        /// Print the event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a phrase and write it to the calendar directory as .ics
    New {
        #[arg(required = true)]
        text: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Write here instead of the configured calendar_dir
        #[arg(long)]
        calendar_dir: Option<PathBuf>,
    },
    /// Resolve each line read from stdin as it arrives
    Watch,
    /// Show config paths and defaults
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = QuickcalConfig::load()?;
    let resolver =
        Resolver::new(SystemClock, EnglishGrammar).with_defaults(config.default_policy()?);

    match cli.command {
        Commands::Parse { text, json } => {
            commands::parse::run(&resolver, &commands::phrase(&text), json)
        }
        Commands::New {
            text,
            yes,
            calendar_dir,
        } => {
            let dir = calendar_dir.unwrap_or_else(|| config.calendar_path());
            commands::new::run(&resolver, &commands::phrase(&text), &dir, yes)
        }
        Commands::Watch => {
            let stdin = std::io::stdin();
            commands::watch::run(&resolver, stdin.lock(), std::io::stdout())
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Log to stderr, quiet unless RUST_LOG or --verbose says otherwise.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
