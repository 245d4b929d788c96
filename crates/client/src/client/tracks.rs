//! Track upload operations.

use std::path::Path;

use mixmaster_core::event::TrackRecord;
use mixmaster_core::track::{UploadUrlRequest, UploadUrlResponse, DEFAULT_AUDIO_CONTENT_TYPE};
use reqwest::multipart::{Form, Part};

use super::{upload_file_name, MixmasterClient};
use crate::error::Result;

impl MixmasterClient {
    /// Upload an MP3 through the server.
    pub async fn upload_track(&self, path: &Path) -> Result<TrackRecord> {
        let file_name = upload_file_name(path)?;
        let bytes = tokio::fs::read(path).await?;

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(DEFAULT_AUDIO_CONTENT_TYPE)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/upload-track"))
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Ask for a presigned URL to upload a file directly to storage.
    pub async fn request_upload_url(&self, req: &UploadUrlRequest) -> Result<UploadUrlResponse> {
        let response = self
            .client
            .post(self.url("/api/upload-track-url"))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
