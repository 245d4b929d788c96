use thiserror::Error;

use crate::timezone::TimezoneError;

/// Errors raised while validating an inbound event payload.
///
/// Each variant is a distinct, caller-recoverable defect. Validation stops at
/// the first one, so callers always get a single actionable message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid JSON payload.")]
    InvalidPayload,
    #[error("{field} is required.")]
    MissingField { field: String },
    #[error("{field} must be a valid date.")]
    InvalidDate { field: String },
    #[error("end_time_utc must be after start_time_utc.")]
    EndNotAfterStart,
    #[error("At least one track is required.")]
    NoTracks,
    #[error("Track #{position} is invalid.")]
    InvalidTrack { position: usize },
    #[error("Track #{position} is missing {field}.")]
    TrackMissingField {
        position: usize,
        field: &'static str,
    },
    #[error("Track #{position} has an invalid {field}.")]
    TrackInvalidNumber {
        position: usize,
        field: &'static str,
    },
}

impl From<TimezoneError> for ValidationError {
    fn from(err: TimezoneError) -> Self {
        match err {
            TimezoneError::Required { label } => Self::MissingField { field: label },
            TimezoneError::InvalidDate { label } => Self::InvalidDate { field: label },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::NoTracks.to_string(),
            "At least one track is required."
        );
        assert_eq!(
            ValidationError::TrackMissingField {
                position: 2,
                field: "track_url"
            }
            .to_string(),
            "Track #2 is missing track_url."
        );
        assert_eq!(
            ValidationError::TrackInvalidNumber {
                position: 1,
                field: "track_duration_seconds"
            }
            .to_string(),
            "Track #1 has an invalid track_duration_seconds."
        );
        assert_eq!(
            ValidationError::EndNotAfterStart.to_string(),
            "end_time_utc must be after start_time_utc."
        );
    }

    #[test]
    fn test_from_timezone_error() {
        let err: ValidationError = TimezoneError::Required {
            label: "start_time_utc".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "start_time_utc is required.");

        let err: ValidationError = TimezoneError::InvalidDate {
            label: "end_time_utc".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "end_time_utc must be a valid date.");
    }
}
