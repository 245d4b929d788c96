//! Track CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Track upload commands.
#[derive(Debug, Parser)]
pub struct TracksCommand {
    #[command(subcommand)]
    pub action: TracksAction,
}

/// Available track actions.
#[derive(Debug, Subcommand)]
pub enum TracksAction {
    /// Upload an MP3 through the server.
    Upload {
        /// Path to the MP3 file.
        file: PathBuf,
    },
    /// Request a presigned URL for a direct upload.
    UploadUrl {
        /// File name the object key is derived from.
        file_name: String,
        /// Content type to sign (defaults to audio/mpeg).
        #[arg(long)]
        content_type: Option<String>,
    },
}
