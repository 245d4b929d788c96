//! Normalization and validation of inbound event payloads.

use chrono::SubsecRound;
use serde_json::{Map, Value};

use super::error::ValidationError;
use super::requests::EventPayload;
use super::types::{NewEvent, TrackRecord};
use crate::timezone::{format_utc_with_offset, parse_utc_date_value};

/// Validates and normalizes an event payload.
///
/// Names are trimmed, timestamps normalized to canonical UTC form, track
/// durations rounded. The first violation aborts with a single error.
pub fn validate_event_input(payload: &EventPayload) -> Result<NewEvent, ValidationError> {
    let event_name = require_text(&payload.event_name, "event_name")?;
    let artist_name = require_text(&payload.artist_name, "artist_name")?;

    let start = parse_utc_date_value(&payload.start_time_utc, "start_time_utc")?.trunc_subsecs(0);
    let end = parse_utc_date_value(&payload.end_time_utc, "end_time_utc")?.trunc_subsecs(0);
    if end <= start {
        return Err(ValidationError::EndNotAfterStart);
    }

    let tracks = validate_tracks(&payload.tracks)?;

    Ok(NewEvent {
        event_name,
        artist_name,
        start_time_utc: format_utc_with_offset(start),
        end_time_utc: format_utc_with_offset(end),
        tracks,
        cover_image_url: optional_text(&payload.cover_image_url),
    })
}

/// Validates a track list, preserving its order.
pub fn validate_tracks(tracks: &Value) -> Result<Vec<TrackRecord>, ValidationError> {
    let items = match tracks.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ValidationError::NoTracks),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_track(index + 1, item))
        .collect()
}

fn validate_track(position: usize, item: &Value) -> Result<TrackRecord, ValidationError> {
    let fields = item
        .as_object()
        .ok_or(ValidationError::InvalidTrack { position })?;

    let track_id = track_text(fields, "track_id", position)?;
    let track_name = track_text(fields, "track_name", position)?;
    let track_url = track_text(fields, "track_url", position)?;

    let duration = fields
        .get("track_duration_seconds")
        .unwrap_or(&Value::Null);
    let track_duration_seconds = coerce_number(duration)
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
        .map(round_half_up)
        .filter(|seconds| *seconds <= f64::from(u32::MAX))
        .ok_or(ValidationError::TrackInvalidNumber {
            position,
            field: "track_duration_seconds",
        })? as u32;

    let track_bitrate_kbps = optional_track_number(fields, "track_bitrate_kbps", position, 1.0, f64::from(u32::MAX))?
        .map(|kbps| kbps as u32);
    let track_size_bytes = optional_track_number(fields, "track_size_bytes", position, 0.0, u64::MAX as f64)?
        .map(|bytes| bytes as u64);

    Ok(TrackRecord {
        track_id,
        track_name,
        track_url,
        track_duration_seconds,
        track_bitrate_kbps,
        track_size_bytes,
    })
}

fn require_text(value: &Value, field: &str) -> Result<String, ValidationError> {
    match value.as_str().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::MissingField {
            field: field.to_string(),
        }),
    }
}

fn optional_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Track identity fields are kept verbatim; only blankness is rejected.
fn track_text(
    fields: &Map<String, Value>,
    field: &'static str,
    position: usize,
) -> Result<String, ValidationError> {
    match fields.get(field).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::TrackMissingField { position, field }),
    }
}

/// Optional numbers pass through rounded when present as JSON numbers and are
/// dropped for any other type.
fn optional_track_number(
    fields: &Map<String, Value>,
    field: &'static str,
    position: usize,
    min: f64,
    max: f64,
) -> Result<Option<f64>, ValidationError> {
    let Some(number) = fields.get(field).and_then(Value::as_f64) else {
        return Ok(None);
    };

    let rounded = round_half_up(number);
    if !rounded.is_finite() || rounded < min || rounded > max {
        return Err(ValidationError::TrackInvalidNumber { position, field });
    }
    Ok(Some(rounded))
}

/// Loose numeric coercion: numbers as-is, numeric strings parsed, blank
/// strings and `null` as zero, booleans as 0/1.
///
/// Strings may be decimal or unsigned `0x`/`0o`/`0b` literals. Digit
/// separators (`_`) and signed radix literals are rejected.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                Some(0.0)
            } else {
                parse_radix_literal(text).or_else(|| text.parse().ok())
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Rounds halves towards positive infinity (2.5 → 3, -2.5 → -2).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(id: &str) -> Value {
        json!({
            "track_id": id,
            "track_name": format!("Track {id}"),
            "track_url": format!("https://cdn.example.com/tracks/{id}.mp3"),
            "track_duration_seconds": 180
        })
    }

    fn payload(tracks: Value) -> EventPayload {
        EventPayload {
            event_name: json!("  Sunset Session "),
            artist_name: json!("DJ Nila"),
            start_time_utc: json!("2024-01-01T04:30:00+00:00"),
            end_time_utc: json!("2024-01-01T06:30:00Z"),
            tracks,
            cover_image_url: Value::Null,
        }
    }

    #[test]
    fn test_valid_payload_is_normalized() {
        let event = validate_event_input(&payload(json!([track("a"), track("b")]))).unwrap();

        assert_eq!(event.event_name, "Sunset Session");
        assert_eq!(event.artist_name, "DJ Nila");
        assert_eq!(event.start_time_utc, "2024-01-01T04:30:00+00:00");
        assert_eq!(event.end_time_utc, "2024-01-01T06:30:00+00:00");
        assert_eq!(event.tracks.len(), 2);
        assert_eq!(event.tracks[0].track_id, "a");
        assert_eq!(event.tracks[1].track_id, "b");
        assert_eq!(event.cover_image_url, None);
    }

    #[test]
    fn test_offsets_are_converted_to_utc() {
        let mut input = payload(json!([track("a")]));
        input.start_time_utc = json!("2024-01-01T10:00:00+05:30");
        input.end_time_utc = json!("2024-01-01T12:00:00.750+05:30");

        let event = validate_event_input(&input).unwrap();
        assert_eq!(event.start_time_utc, "2024-01-01T04:30:00+00:00");
        assert_eq!(event.end_time_utc, "2024-01-01T06:30:00+00:00");
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let mut input = payload(json!([track("a")]));
        input.event_name = json!("   ");
        assert_eq!(
            validate_event_input(&input).unwrap_err().to_string(),
            "event_name is required."
        );

        let mut input = payload(json!([track("a")]));
        input.artist_name = json!(42);
        assert_eq!(
            validate_event_input(&input).unwrap_err().to_string(),
            "artist_name is required."
        );
    }

    #[test]
    fn test_invalid_dates_are_rejected() {
        let mut input = payload(json!([track("a")]));
        input.start_time_utc = Value::Null;
        assert_eq!(
            validate_event_input(&input).unwrap_err().to_string(),
            "start_time_utc is required."
        );

        let mut input = payload(json!([track("a")]));
        input.end_time_utc = json!("someday");
        assert_eq!(
            validate_event_input(&input).unwrap_err(),
            ValidationError::InvalidDate {
                field: "end_time_utc".to_string()
            }
        );
    }

    #[test]
    fn test_end_must_be_after_start() {
        for end in ["2024-01-01T04:30:00+00:00", "2024-01-01T03:00:00+00:00"] {
            let mut input = payload(json!([track("a")]));
            input.end_time_utc = json!(end);
            assert_eq!(
                validate_event_input(&input),
                Err(ValidationError::EndNotAfterStart)
            );
        }
    }

    #[test]
    fn test_sub_second_difference_is_not_enough() {
        let mut input = payload(json!([track("a")]));
        input.start_time_utc = json!("2024-01-01T04:30:00.100Z");
        input.end_time_utc = json!("2024-01-01T04:30:00.900Z");
        assert_eq!(
            validate_event_input(&input),
            Err(ValidationError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_ordering_checked_before_tracks() {
        let mut input = payload(json!([]));
        input.end_time_utc = json!("2023-12-31T00:00:00Z");
        assert_eq!(
            validate_event_input(&input),
            Err(ValidationError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_tracks_required() {
        for tracks in [json!([]), Value::Null, json!("a"), json!({})] {
            assert_eq!(
                validate_event_input(&payload(tracks))
                    .unwrap_err()
                    .to_string(),
                "At least one track is required."
            );
        }
    }

    #[test]
    fn test_track_must_be_object() {
        assert_eq!(
            validate_event_input(&payload(json!([track("a"), "b"])))
                .unwrap_err()
                .to_string(),
            "Track #2 is invalid."
        );
    }

    #[test]
    fn test_track_missing_field_names_position() {
        let mut second = track("b");
        second.as_object_mut().unwrap().remove("track_url");

        assert_eq!(
            validate_event_input(&payload(json!([track("a"), second])))
                .unwrap_err()
                .to_string(),
            "Track #2 is missing track_url."
        );

        let mut first = track("a");
        first["track_id"] = json!("  ");
        assert_eq!(
            validate_event_input(&payload(json!([first])))
                .unwrap_err()
                .to_string(),
            "Track #1 is missing track_id."
        );
    }

    #[test]
    fn test_track_duration_coercion() {
        let mut first = track("a");
        first["track_duration_seconds"] = json!("212.5");
        let event = validate_event_input(&payload(json!([first]))).unwrap();
        assert_eq!(event.tracks[0].track_duration_seconds, 213);

        let mut first = track("a");
        first["track_duration_seconds"] = json!(59.4);
        let event = validate_event_input(&payload(json!([first]))).unwrap();
        assert_eq!(event.tracks[0].track_duration_seconds, 59);
    }

    #[test]
    fn test_track_duration_rejects_non_positive() {
        for duration in [json!(0), json!(-3), json!("abc"), json!(""), Value::Null, json!([1])] {
            let mut first = track("a");
            first["track_duration_seconds"] = duration;
            assert_eq!(
                validate_event_input(&payload(json!([first])))
                    .unwrap_err()
                    .to_string(),
                "Track #1 has an invalid track_duration_seconds."
            );
        }
    }

    #[test]
    fn test_optional_numbers_pass_through_rounded() {
        let mut first = track("a");
        first["track_bitrate_kbps"] = json!(319.6);
        first["track_size_bytes"] = json!(7_340_032);
        let event = validate_event_input(&payload(json!([first]))).unwrap();

        assert_eq!(event.tracks[0].track_bitrate_kbps, Some(320));
        assert_eq!(event.tracks[0].track_size_bytes, Some(7_340_032));
    }

    #[test]
    fn test_optional_numbers_of_other_types_are_omitted() {
        let mut first = track("a");
        first["track_bitrate_kbps"] = json!("320");
        first["track_size_bytes"] = Value::Null;
        let event = validate_event_input(&payload(json!([first]))).unwrap();

        assert_eq!(event.tracks[0].track_bitrate_kbps, None);
        assert_eq!(event.tracks[0].track_size_bytes, None);
    }

    #[test]
    fn test_optional_numbers_out_of_range() {
        let mut first = track("a");
        first["track_size_bytes"] = json!(-1);
        assert_eq!(
            validate_event_input(&payload(json!([first])))
                .unwrap_err()
                .to_string(),
            "Track #1 has an invalid track_size_bytes."
        );
    }

    #[test]
    fn test_cover_image_url_kept_when_present() {
        let mut input = payload(json!([track("a")]));
        input.cover_image_url = json!("https://cdn.example.com/covers/sunset.png");
        let event = validate_event_input(&input).unwrap();
        assert_eq!(
            event.cover_image_url.as_deref(),
            Some("https://cdn.example.com/covers/sunset.png")
        );

        let mut input = payload(json!([track("a")]));
        input.cover_image_url = json!("");
        assert_eq!(validate_event_input(&input).unwrap().cover_image_url, None);
    }

    #[test]
    fn test_radix_literals_are_coerced() {
        assert_eq!(coerce_number(&json!("0x10")), Some(16.0));
        assert_eq!(coerce_number(&json!(" 0B101 ")), Some(5.0));
        assert_eq!(coerce_number(&json!("0o17")), Some(15.0));
        assert_eq!(coerce_number(&json!("0x")), None);
        assert_eq!(coerce_number(&json!("0xZZ")), None);
        assert_eq!(coerce_number(&json!("-0x10")), None);
        assert_eq!(coerce_number(&json!("1_000")), None);

        let mut hex = track("a");
        hex["track_duration_seconds"] = json!("0x10");
        let event = validate_event_input(&payload(json!([hex]))).unwrap();
        assert_eq!(event.tracks[0].track_duration_seconds, 16);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }
}
