//! Event CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use mixmaster_core::event::{EventPayload, EventSort, ListEventsQuery};
use mixmaster_core::timezone::{convert_local_input_to_utc, normalize_utc_date_str};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Event management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// CLI sort order (with clap ValueEnum).
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SortOrder {
    /// As stored.
    #[default]
    Stored,
    /// By start time.
    Start,
}

impl From<SortOrder> for EventSort {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Stored => EventSort::Stored,
            SortOrder::Start => EventSort::Start,
        }
    }
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events.
    List {
        /// Only events that have not ended.
        #[arg(long)]
        upcoming: bool,
        /// Ordering.
        #[arg(long, value_enum, default_value = "stored")]
        sort: SortOrder,
    },
    /// Get event by ID.
    Get {
        /// Event ID.
        id: String,
    },
    /// Create a new event.
    Create(EventArgs),
    /// Replace an event.
    Update {
        /// Event ID.
        id: String,
        #[command(flatten)]
        args: EventArgs,
    },
    /// Delete event by ID.
    Delete {
        /// Event ID.
        id: String,
    },
}

impl EventsAction {
    /// Query for the list action.
    pub fn list_query(upcoming: bool, sort: SortOrder) -> ListEventsQuery {
        ListEventsQuery {
            upcoming,
            sort: sort.into(),
        }
    }
}

/// Fields of a create or update.
#[derive(Debug, Args)]
pub struct EventArgs {
    /// Event name.
    #[arg(long)]
    pub name: String,
    /// Artist name.
    #[arg(long)]
    pub artist: String,
    /// Start, as venue wall-clock time (YYYY-MM-DDTHH:MM).
    #[arg(long)]
    pub start: String,
    /// End, as venue wall-clock time (YYYY-MM-DDTHH:MM).
    #[arg(long)]
    pub end: String,
    /// JSON file with the track list.
    #[arg(long)]
    pub tracks: PathBuf,
    /// Optional cover image URL.
    #[arg(long)]
    pub cover_image_url: Option<String>,
    /// Read --start and --end as UTC instants instead of venue time.
    #[arg(long)]
    pub utc: bool,
}

impl EventArgs {
    /// Reads the track file and builds the request body.
    pub fn load_payload(&self) -> Result<EventPayload> {
        let raw = std::fs::read_to_string(&self.tracks)?;
        self.to_payload(&raw, &self.tracks)
    }

    fn to_payload(&self, tracks_json: &str, source: &Path) -> Result<EventPayload> {
        let tracks = parse_track_list(tracks_json, source)?;
        let start_time_utc = self.resolve_time(&self.start, "Start time")?;
        let end_time_utc = self.resolve_time(&self.end, "End time")?;

        Ok(EventPayload {
            event_name: Value::String(self.name.clone()),
            artist_name: Value::String(self.artist.clone()),
            start_time_utc: Value::String(start_time_utc),
            end_time_utc: Value::String(end_time_utc),
            tracks,
            cover_image_url: self
                .cover_image_url
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        })
    }

    fn resolve_time(&self, raw: &str, label: &str) -> Result<String> {
        let converted = if self.utc {
            normalize_utc_date_str(raw, label)
        } else {
            convert_local_input_to_utc(raw, label)
        };
        converted.map_err(|e| ClientError::InvalidInput(e.to_string()))
    }
}

/// Accepts a track array, an object with a `tracks` array (a saved event), or
/// a single track (the output of `tracks upload --format json`).
fn parse_track_list(raw: &str, source: &Path) -> Result<Value> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut fields) => match fields.remove("tracks") {
            Some(tracks) => Ok(tracks),
            None => Ok(Value::Array(vec![Value::Object(fields)])),
        },
        _ => Err(ClientError::InvalidInput(format!(
            "{} must contain a JSON array of tracks",
            source.display()
        ))),
    }
}
