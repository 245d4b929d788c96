//! Cover image uploads.

use std::path::Path;

use mixmaster_core::track::{image_content_type_for, CoverUploadResponse};
use reqwest::multipart::{Form, Part};

use super::{upload_file_name, MixmasterClient};
use crate::error::{ClientError, Result};

impl MixmasterClient {
    /// Upload a cover image; returns its public URL.
    pub async fn upload_cover(&self, path: &Path) -> Result<String> {
        let file_name = upload_file_name(path)?;
        let content_type = image_content_type_for(&file_name).ok_or_else(|| {
            ClientError::InvalidInput(format!("{file_name} is not a supported image file"))
        })?;
        let bytes = tokio::fs::read(path).await?;

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/upload-cover"))
            .multipart(form)
            .send()
            .await?;
        let uploaded: CoverUploadResponse = self.handle_response(response).await?;
        Ok(uploaded.cover_image_url)
    }
}
