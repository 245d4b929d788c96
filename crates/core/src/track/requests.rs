//! Request and response types for track and cover uploads.

use serde::{Deserialize, Serialize};

use super::keys::DEFAULT_AUDIO_CONTENT_TYPE;
use crate::serde::deserialize_optional_string;

/// Body of a presigned upload request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    #[serde(
        rename = "fileName",
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_name: Option<String>,
    #[serde(
        rename = "contentType",
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,
}

impl UploadUrlRequest {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Content type to sign, defaulting to `audio/mpeg`.
    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(DEFAULT_AUDIO_CONTENT_TYPE)
    }
}

/// Presigned upload target plus the URL the object will be served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    #[serde(rename = "objectUrl")]
    pub object_url: String,
    pub track_id: String,
    #[serde(rename = "objectKey")]
    pub object_key: String,
}

/// Public URL of a stored cover image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverUploadResponse {
    pub cover_image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_url_request_camel_case() {
        let request: UploadUrlRequest = serde_json::from_value(json!({
            "fileName": "set.mp3",
            "contentType": ""
        }))
        .unwrap();

        assert_eq!(request.file_name.as_deref(), Some("set.mp3"));
        assert_eq!(request.content_type, None);
        assert_eq!(request.content_type_or_default(), "audio/mpeg");
    }

    #[test]
    fn test_upload_url_request_missing_file_name() {
        let request: UploadUrlRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.file_name, None);

        let request: UploadUrlRequest =
            serde_json::from_value(json!({ "fileName": "   " })).unwrap();
        assert_eq!(request.file_name, None);
    }

    #[test]
    fn test_upload_url_response_field_names() {
        let response = UploadUrlResponse {
            upload_url: "https://signed".to_string(),
            object_url: "https://cdn/tracks/a.mp3".to_string(),
            track_id: "a".to_string(),
            object_key: "tracks/a.mp3".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "uploadUrl": "https://signed",
                "objectUrl": "https://cdn/tracks/a.mp3",
                "track_id": "a",
                "objectKey": "tracks/a.mp3"
            })
        );
    }
}
