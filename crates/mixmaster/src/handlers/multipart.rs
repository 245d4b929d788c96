//! Helpers shared by the multipart upload handlers.

use axum::extract::{
    multipart::{Field, Multipart, MultipartError, MultipartRejection},
};

use crate::handlers::ApiError;

/// An uploaded file read from the multipart body.
pub struct UploadedFile {
    pub file_name: String,
    /// Content type declared by the uploader, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Unwraps the extractor result, keeping axum's status and message.
pub fn accept_multipart(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Multipart, ApiError> {
    multipart.map_err(|e| ApiError::Rejected {
        status: e.status(),
        message: e.body_text(),
    })
}

/// Returns the first `file` field that carries a file name.
pub async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(rejected)? {
        if field.name() != Some("file") {
            continue;
        }
        if let Some(file) = read_file(field).await? {
            return Ok(Some(file));
        }
    }
    Ok(None)
}

async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, ApiError> {
    let Some(file_name) = field.file_name().map(str::to_string) else {
        return Ok(None);
    };
    let content_type = field
        .content_type()
        .map(str::trim)
        .filter(|content_type| !content_type.is_empty())
        .map(str::to_string);
    let bytes = field.bytes().await.map_err(rejected)?;

    Ok(Some(UploadedFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

fn rejected(err: MultipartError) -> ApiError {
    ApiError::Rejected {
        status: err.status(),
        message: err.body_text(),
    }
}
