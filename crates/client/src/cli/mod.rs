//! CLI command definitions.

pub mod covers;
pub mod events;
pub mod tracks;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::DEFAULT_BASE_URL;

/// CLI client for the MixMaster API.
#[derive(Debug, Parser)]
#[command(name = "mixmaster-client")]
#[command(about = "CLI client for the MixMaster API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "MIXMASTER_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output in venue time.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Event management.
    Events(events::EventsCommand),
    /// Track uploads.
    Tracks(tracks::TracksCommand),
    /// Cover image uploads.
    Covers(covers::CoversCommand),
    /// Server readiness check.
    Health,
}
