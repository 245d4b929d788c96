use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timezone::parse_instant;

/// One uploaded audio file: identity, location, and extracted metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_id: String,
    pub track_name: String,
    /// Public URL of the stored object.
    pub track_url: String,
    pub track_duration_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_bitrate_kbps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_size_bytes: Option<u64>,
}

impl TrackRecord {
    /// Creates a track with the required fields.
    pub fn new(
        track_id: impl Into<String>,
        track_name: impl Into<String>,
        track_url: impl Into<String>,
        track_duration_seconds: u32,
    ) -> Self {
        Self {
            track_id: track_id.into(),
            track_name: track_name.into(),
            track_url: track_url.into(),
            track_duration_seconds,
            track_bitrate_kbps: None,
            track_size_bytes: None,
        }
    }

    /// Sets the bitrate in kbps.
    pub fn with_bitrate_kbps(mut self, bitrate: u32) -> Self {
        self.track_bitrate_kbps = Some(bitrate);
        self
    }

    /// Sets the size in bytes.
    pub fn with_size_bytes(mut self, size: u64) -> Self {
        self.track_size_bytes = Some(size);
        self
    }
}

/// A scheduled DJ session with a time window and an ordered track list.
///
/// Timestamps are kept as their stored strings so a document read back is
/// written out byte-for-byte unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: String,
    pub event_name: String,
    pub artist_name: String,
    pub start_time_utc: String,
    pub end_time_utc: String,
    /// Playback order.
    pub tracks: Vec<TrackRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl EventRecord {
    /// Parsed start instant, `None` if the stored value is unreadable.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.start_time_utc)
    }

    /// Parsed end instant, `None` if the stored value is unreadable.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.end_time_utc)
    }

    /// URLs of every track in playback order.
    pub fn track_urls(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|track| track.track_url.as_str())
    }

    /// Track URLs followed by the cover image URL, if any.
    pub fn media_urls(&self) -> impl Iterator<Item = &str> {
        self.track_urls()
            .chain(self.cover_image_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

/// A validated event that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub event_name: String,
    pub artist_name: String,
    pub start_time_utc: String,
    pub end_time_utc: String,
    pub tracks: Vec<TrackRecord>,
    pub cover_image_url: Option<String>,
}

impl NewEvent {
    /// Converts into a record with the given id.
    pub fn into_record(self, event_id: impl Into<String>) -> EventRecord {
        EventRecord {
            event_id: event_id.into(),
            event_name: self.event_name,
            artist_name: self.artist_name,
            start_time_utc: self.start_time_utc,
            end_time_utc: self.end_time_utc,
            tracks: self.tracks,
            cover_image_url: self.cover_image_url,
        }
    }

    /// Converts into a record with a freshly generated id.
    pub fn into_record_with_new_id(self) -> EventRecord {
        self.into_record(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event() -> EventRecord {
        NewEvent {
            event_name: "Sunset Session".to_string(),
            artist_name: "DJ Nila".to_string(),
            start_time_utc: "2024-01-01T04:30:00+00:00".to_string(),
            end_time_utc: "2024-01-01T06:30:00+00:00".to_string(),
            tracks: vec![TrackRecord::new(
                "t-1",
                "Opening",
                "https://cdn.example.com/tracks/t-1-opening.mp3",
                245,
            )
            .with_bitrate_kbps(320)],
            cover_image_url: None,
        }
        .into_record("evt-1")
    }

    #[test]
    fn test_serialized_field_order() {
        let json = serde_json::to_string(&sample_event()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"event_id":"evt-1","event_name":"Sunset Session","artist_name":"DJ Nila","#,
                r#""start_time_utc":"2024-01-01T04:30:00+00:00","end_time_utc":"2024-01-01T06:30:00+00:00","#,
                r#""tracks":[{"track_id":"t-1","track_name":"Opening","#,
                r#""track_url":"https://cdn.example.com/tracks/t-1-opening.mp3","#,
                r#""track_duration_seconds":245,"track_bitrate_kbps":320}]}"#
            )
        );
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let json = serde_json::to_value(&sample_event()).unwrap();
        assert!(json.get("cover_image_url").is_none());
        assert!(json["tracks"][0].get("track_size_bytes").is_none());
    }

    #[test]
    fn test_parsed_instants() {
        let event = sample_event();
        assert_eq!(
            event.starts_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 4, 30, 0).unwrap())
        );
        assert_eq!(
            event.ends_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_new_ids_are_unique() {
        let template = NewEvent {
            event_name: "A".to_string(),
            artist_name: "B".to_string(),
            start_time_utc: "2024-01-01T00:00:00+00:00".to_string(),
            end_time_utc: "2024-01-01T01:00:00+00:00".to_string(),
            tracks: vec![TrackRecord::new("t", "n", "u", 1)],
            cover_image_url: None,
        };
        let first = template.clone().into_record_with_new_id();
        let second = template.into_record_with_new_id();
        assert_ne!(first.event_id, second.event_id);
    }
}
