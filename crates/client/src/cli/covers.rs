//! Cover image CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cover image commands.
#[derive(Debug, Parser)]
pub struct CoversCommand {
    #[command(subcommand)]
    pub action: CoversAction,
}

/// Available cover actions.
#[derive(Debug, Subcommand)]
pub enum CoversAction {
    /// Upload a cover image and print its public URL.
    Upload {
        /// Path to a PNG, JPEG, WebP, GIF or AVIF file.
        file: PathBuf,
    },
}
