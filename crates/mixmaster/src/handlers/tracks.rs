//! Track upload handlers.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use mixmaster_core::event::{TrackRecord, ValidationError};
use mixmaster_core::track::{
    is_mp3_file_name, presigned_track_key, resolve_track_name, uploaded_track_key,
    UploadUrlRequest, UploadUrlResponse, DEFAULT_AUDIO_CONTENT_TYPE,
};

use crate::{
    handlers::{
        multipart::{accept_multipart, read_file_field},
        ApiError,
    },
    metadata::read_audio_metadata,
    state::AppState,
};

/// Upload an MP3 through the server (POST /api/upload-track).
///
/// Reads the `file` form field, extracts its metadata, stores it and returns
/// the track descriptor to attach to an event.
pub async fn upload_track(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<TrackRecord>), ApiError> {
    let mut multipart = accept_multipart(multipart)?;

    let file = read_file_field(&mut multipart)
        .await?
        .ok_or(ApiError::MissingTrackFile)?;

    if !is_mp3_file_name(&file.file_name) {
        return Err(ApiError::UnsupportedTrackFormat);
    }

    let metadata = read_audio_metadata(&file.bytes)?;

    let track_id = Uuid::new_v4().to_string();
    let track_name = resolve_track_name(metadata.title.as_deref(), &file.file_name);
    let key = uploaded_track_key(&track_id, &track_name, &file.file_name);
    let size_bytes = file.bytes.len() as u64;
    let content_type = file
        .content_type
        .unwrap_or_else(|| DEFAULT_AUDIO_CONTENT_TYPE.to_string());

    let track_url = state
        .store
        .upload_blob(&key, file.bytes, &content_type)
        .await
        .map_err(ApiError::TrackUpload)?;

    tracing::info!(
        track_id = %track_id,
        key = %key,
        duration_seconds = metadata.duration_seconds,
        size_bytes,
        "Uploaded track"
    );

    let mut track = TrackRecord::new(track_id, track_name, track_url, metadata.duration_seconds)
        .with_size_bytes(size_bytes);
    track.track_bitrate_kbps = metadata.bitrate_kbps;

    Ok((StatusCode::CREATED, Json(track)))
}

/// Issue a presigned URL for a direct upload (POST /api/upload-track-url).
pub async fn create_upload_url(
    State(state): State<AppState>,
    payload: Result<Json<UploadUrlRequest>, JsonRejection>,
) -> Result<Json<UploadUrlResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Rejected upload URL payload");
        ValidationError::InvalidPayload
    })?;

    let file_name = request
        .file_name
        .as_deref()
        .ok_or(ApiError::FileNameRequired)?;

    let track_id = Uuid::new_v4().to_string();
    let object_key = presigned_track_key(&track_id, file_name);

    let upload_url = state
        .store
        .presign_upload(
            &object_key,
            request.content_type_or_default(),
            state.config.presign_expiry(),
        )
        .await
        .map_err(ApiError::UploadUrl)?;

    tracing::info!(track_id = %track_id, key = %object_key, "Issued upload URL");

    Ok(Json(UploadUrlResponse {
        upload_url,
        object_url: state.store.public_url(&object_key),
        track_id,
        object_key,
    }))
}
