//! API request and response types for event operations.
//!
//! Shared by the server and the CLI client. Pure data types with no I/O.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{EventRecord, TrackRecord};

/// Inbound create/update body.
///
/// Fields stay untyped JSON so the validator can report exactly which field is
/// missing or malformed instead of failing on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub event_name: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub artist_name: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub start_time_utc: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub end_time_utc: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub tracks: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub cover_image_url: Value,
}

impl EventPayload {
    /// Builds a payload from typed values.
    pub fn new(
        event_name: impl Into<String>,
        artist_name: impl Into<String>,
        start_time_utc: impl Into<String>,
        end_time_utc: impl Into<String>,
        tracks: &[TrackRecord],
    ) -> Self {
        Self {
            event_name: Value::String(event_name.into()),
            artist_name: Value::String(artist_name.into()),
            start_time_utc: Value::String(start_time_utc.into()),
            end_time_utc: Value::String(end_time_utc.into()),
            tracks: serde_json::to_value(tracks).unwrap_or(Value::Null),
            cover_image_url: Value::Null,
        }
    }

    /// Sets the cover image URL.
    pub fn with_cover_image_url(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Value::String(url.into());
        self
    }
}

/// Ordering applied when listing events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSort {
    /// Insertion order of the stored document.
    #[default]
    Stored,
    /// Ascending start time.
    Start,
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsQuery {
    /// Drop events whose end time has passed.
    #[serde(default)]
    pub upcoming: bool,
    #[serde(default)]
    pub sort: EventSort,
}

impl ListEventsQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep events that have not ended.
    pub fn upcoming_only(mut self) -> Self {
        self.upcoming = true;
        self
    }

    /// Order by start time.
    pub fn sorted_by_start(mut self) -> Self {
        self.sort = EventSort::Start;
        self
    }
}

/// `{ "event": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: EventRecord,
}

/// `{ "events": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<EventRecord>,
}

/// `{ "deleted": "<event_id>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedEventResponse {
    pub deleted: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Set when the request collided with an existing event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_event_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            conflicting_event_id: None,
        }
    }
}
