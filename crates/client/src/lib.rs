//! mixmaster_client - CLI client for the MixMaster API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::MixmasterClient;
pub use error::{ClientError, Result};
