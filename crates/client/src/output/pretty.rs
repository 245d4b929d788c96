//! Pretty output formatting.
//!
//! Times are shown in venue time, the zone operators enter them in.

use mixmaster_core::event::{EventRecord, TrackRecord};
use mixmaster_core::timezone::{
    format_local_display, to_local_display_input_value, LOCAL_TIMEZONE_NAME,
};
use mixmaster_core::track::UploadUrlResponse;

use crate::client::health::Readiness;

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_duration(seconds: u32) -> String {
    let (hours, minutes, seconds) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Format a track for display.
pub fn format_track(track: &TrackRecord) -> String {
    let mut details = vec![format_duration(track.track_duration_seconds)];
    if let Some(kbps) = track.track_bitrate_kbps {
        details.push(format!("{kbps} kbps"));
    }
    if let Some(bytes) = track.track_size_bytes {
        details.push(format!("{bytes} bytes"));
    }
    format!(
        "{} [{}]\n  ID: {}\n  URL: {}",
        track.track_name,
        details.join(", "),
        track.track_id,
        track.track_url
    )
}

/// Format an event for display.
pub fn format_event(event: &EventRecord) -> String {
    let mut output = format!(
        "{} by {}\n  ID: {}\n  When: {} to {} ({})",
        event.event_name,
        event.artist_name,
        event.event_id,
        format_local_display(&event.start_time_utc),
        format_local_display(&event.end_time_utc),
        LOCAL_TIMEZONE_NAME
    );

    let (start, end) = (
        to_local_display_input_value(&event.start_time_utc),
        to_local_display_input_value(&event.end_time_utc),
    );
    if !start.is_empty() && !end.is_empty() {
        output.push_str(&format!("\n  Edit: --start {start} --end {end}"));
    }
    if let Some(cover) = &event.cover_image_url {
        output.push_str(&format!("\n  Cover: {}", cover));
    }

    output.push_str(&format!("\n  Tracks ({}):", event.tracks.len()));
    for (index, track) in event.tracks.iter().enumerate() {
        output.push_str(&format!(
            "\n    {}. {} ({})",
            index + 1,
            track.track_name,
            format_duration(track.track_duration_seconds)
        ));
    }
    output
}

/// Format events for display.
pub fn format_events(events: &[EventRecord]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}

/// Format a presigned upload target for display.
pub fn format_upload_url(response: &UploadUrlResponse) -> String {
    format!(
        "Track ID: {}\n  Key: {}\n  Upload (PUT): {}\n  Public URL: {}",
        response.track_id, response.object_key, response.upload_url, response.object_url
    )
}

/// Format a readiness report for display.
pub fn format_readiness(readiness: &Readiness) -> String {
    if readiness.ready {
        format!(
            "READY ({} backend, {} events)",
            readiness.backend,
            readiness.events.unwrap_or_default()
        )
    } else {
        format!(
            "NOT READY ({} backend): {}",
            readiness.backend,
            readiness.error.as_deref().unwrap_or("unknown error")
        )
    }
}
