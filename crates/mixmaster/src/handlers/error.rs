use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use mixmaster_core::event::{ErrorResponse, ValidationError};
use mixmaster_core::storage::{storage_error_to_status_code, StorageError};

use crate::metadata::MetadataError;

/// Every failure a handler can return.
///
/// Client-facing messages are fixed sentences; storage details only reach the
/// log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    Conflict {
        message: String,
        conflicting_event_id: String,
    },
    #[error("Event not found.")]
    EventNotFound(String),
    #[error("Missing MP3 file in form data.")]
    MissingTrackFile,
    #[error("Only MP3 uploads are supported.")]
    UnsupportedTrackFormat,
    #[error("Missing image file in form data.")]
    MissingCoverFile,
    #[error("Only image uploads are supported.")]
    UnsupportedCoverFormat,
    #[error("fileName is required.")]
    FileNameRequired,
    /// An extractor rejected the request before the handler ran.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("Uploading track to object storage failed.")]
    TrackUpload(#[source] StorageError),
    #[error("Unable to upload cover image.")]
    CoverUpload(#[source] StorageError),
    #[error("Unable to create upload URL.")]
    UploadUrl(#[source] StorageError),
    #[error("Unable to load events.")]
    LoadEvents(#[source] StorageError),
    #[error("Failed to save the event.")]
    SaveEvents(#[source] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::MissingTrackFile
            | Self::UnsupportedTrackFormat
            | Self::MissingCoverFile
            | Self::UnsupportedCoverFormat
            | Self::FileNameRequired => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::Rejected { status, .. } => *status,
            Self::Metadata(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TrackUpload(_) | Self::CoverUpload(_) => StatusCode::BAD_GATEWAY,
            Self::UploadUrl(StorageError::Unsupported { .. }) => StatusCode::NOT_IMPLEMENTED,
            Self::UploadUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::LoadEvents(err) | Self::SaveEvents(err) => {
                StatusCode::from_u16(storage_error_to_status_code(err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::UploadUrl(StorageError::Unsupported { .. }) => {
                "Direct uploads are not supported by this storage backend.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::TrackUpload(source)
            | Self::CoverUpload(source)
            | Self::UploadUrl(source)
            | Self::LoadEvents(source)
            | Self::SaveEvents(source) => {
                tracing::error!(status = %status, message = %self, error = %source, "Storage operation failed");
            }
            Self::Metadata(source) => {
                tracing::warn!(status = %status, error = ?source, "Rejected track upload");
            }
            _ => tracing::debug!(status = %status, message = %self, "Request rejected"),
        }

        let body = ErrorResponse {
            error: self.message(),
            conflicting_event_id: match self {
                Self::Conflict {
                    conflicting_event_id,
                    ..
                } => Some(conflicting_event_id),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}
