//! `yearmark` command-line entry point.
//!
//! Loads configuration, initializes logging, and dispatches one subcommand:
//!
//! ```text
//! yearmark generate --event "Declaration of Independence" [--year 1776] [--json]
//! yearmark generate --all [--json]
//! yearmark encode 1776
//! yearmark events [--year 1776]
//! ```
//!
//! Logs go to stderr so stdout carries only the rendered result.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use yearmark_core::{AppConfig, EventCatalog, MnemonicGenerator, MnemonicResult};

/// Generate memorable phrases for the years of historical events.
#[derive(Debug, Parser)]
#[command(name = "yearmark", version, about)]
struct Cli {
    /// YAML configuration file. Without it, defaults plus environment apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a mnemonic for an event, or for every catalog event.
    Generate {
        /// Event name, as a reference page title.
        #[arg(short, long, required_unless_present = "all")]
        event: Option<String>,

        /// Year of the event. Optional for events in the catalog.
        #[arg(short, long, conflicts_with = "all")]
        year: Option<u32>,

        /// Use this description instead of the curated one or a lookup.
        #[arg(short, long, conflicts_with = "all")]
        description: Option<String>,

        /// Generate for every catalog event, oldest first.
        #[arg(long, conflicts_with = "event")]
        all: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the digit/letter table for a year.
    Encode {
        /// The year to encode.
        year: String,
    },

    /// List catalog years, or the events of one year.
    Events {
        /// Only list events for this year.
        #[arg(short, long)]
        year: Option<u32>,
    },
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the catalog, or pipeline setup fails.
/// Generation failures are rendered, not returned.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::from_env().context("reading configuration from the environment")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let catalog = match &config.catalog.path {
        Some(path) => EventCatalog::from_file(path)
            .with_context(|| format!("loading catalog from {}", path.display()))?,
        None => EventCatalog::curated(),
    };
    info!(years = catalog.len(), "event catalog loaded");

    match cli.command {
        Command::Generate {
            event,
            year,
            description,
            all,
            json,
        } => {
            let generator =
                MnemonicGenerator::from_config(&config).context("setting up the generator")?;

            let mut runs = Vec::new();
            if all {
                for (year, event) in catalog.entries() {
                    let result = generator.generate_cataloged(&catalog, event, year).await;
                    runs.push((event.to_owned(), year, result));
                }
            } else {
                let event = event.context("--event is required unless --all is given")?;
                let Some(year) = year.or_else(|| catalog.year_of(&event)) else {
                    bail!("--year is required for events not in the catalog: {event}");
                };
                let result = match description {
                    Some(text) => generator.generate_with_description(&event, year, &text).await,
                    None => generator.generate_cataloged(&catalog, &event, year).await,
                };
                runs.push((event, year, result));
            }

            if json {
                let results: Vec<&MnemonicResult> = runs.iter().map(|(_, _, r)| r).collect();
                if all {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                } else if let Some(result) = results.first() {
                    println!("{}", serde_json::to_string_pretty(result)?);
                }
            } else {
                print!("{}", render::mnemonics(&runs));
            }

            Ok(if runs.iter().all(|(_, _, r)| r.is_generated()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Encode { year } => {
            let encoded = yearmark_core::encode_str(&year)?;
            print!("{}", render::encoding(&encoded));
            Ok(ExitCode::SUCCESS)
        }
        Command::Events { year } => {
            match year {
                Some(year) => print!("{}", render::events_for_year(&catalog, year)),
                None => print!("{}", render::catalog(&catalog)),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
