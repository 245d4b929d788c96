//! Cover image upload handler.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use mixmaster_core::track::{
    cover_object_key, image_content_type_for, is_image_content_type, CoverUploadResponse,
};

use crate::{
    handlers::{
        multipart::{accept_multipart, read_file_field},
        ApiError,
    },
    state::AppState,
};

/// Upload an event cover image (POST /api/upload-cover).
///
/// Reads the `file` form field and stores it under `covers/`. The declared
/// content type must be an image; a missing or generic one is inferred from
/// the file extension.
pub async fn upload_cover(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CoverUploadResponse>), ApiError> {
    let mut multipart = accept_multipart(multipart)?;

    let file = read_file_field(&mut multipart)
        .await?
        .ok_or(ApiError::MissingCoverFile)?;

    let content_type = file
        .content_type
        .filter(|content_type| is_image_content_type(content_type))
        .or_else(|| image_content_type_for(&file.file_name).map(str::to_string))
        .ok_or(ApiError::UnsupportedCoverFormat)?;

    let cover_id = Uuid::new_v4().to_string();
    let key = cover_object_key(&cover_id, &file.file_name, &content_type);
    let size_bytes = file.bytes.len();

    let cover_image_url = state
        .store
        .upload_blob(&key, file.bytes, &content_type)
        .await
        .map_err(ApiError::CoverUpload)?;

    tracing::info!(key = %key, content_type = %content_type, size_bytes, "Uploaded cover image");

    Ok((
        StatusCode::CREATED,
        Json(CoverUploadResponse { cover_image_url }),
    ))
}
