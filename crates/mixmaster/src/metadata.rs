//! Audio metadata extraction for uploaded tracks.

use std::io::Cursor;

use lofty::file::{AudioFile, FileType, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use thiserror::Error;

/// Errors raised while inspecting an uploaded audio file.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Unable to read MP3 metadata. Please check the file.")]
    Unreadable(String),
    #[error("Track duration metadata is missing.")]
    MissingDuration,
}

/// Properties read from an audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioMetadata {
    /// Rounded to the nearest second, never zero.
    pub duration_seconds: u32,
    /// Audio bitrate in kbps, when known and non-zero.
    pub bitrate_kbps: Option<u32>,
    /// Title tag, when present.
    pub title: Option<String>,
}

/// Reads duration, bitrate and title from in-memory audio bytes.
///
/// Files whose container cannot be guessed are read as MPEG.
pub fn read_audio_metadata(bytes: &[u8]) -> Result<AudioMetadata, MetadataError> {
    let probe = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .map_err(|e| MetadataError::Unreadable(e.to_string()))?;
    let probe = if probe.file_type().is_none() {
        probe.set_file_type(FileType::Mpeg)
    } else {
        probe
    };

    let tagged = probe
        .read()
        .map_err(|e| MetadataError::Unreadable(e.to_string()))?;

    let properties = tagged.properties();
    let duration_seconds = (properties.duration().as_secs_f64() + 0.5).floor() as u32;
    if duration_seconds == 0 {
        return Err(MetadataError::MissingDuration);
    }

    let title = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .and_then(|tag| tag.title())
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty());

    Ok(AudioMetadata {
        duration_seconds,
        bitrate_kbps: properties.audio_bitrate().filter(|kbps| *kbps > 0),
        title,
    })
}
