//! R2 object store implementation.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use mixmaster_core::storage::{ObjectStore, PublicUrls, Result, StorageError};

use super::error::{map_body_error, map_presigning_config_error, map_sdk_error};
use crate::config::R2Config;

/// S3-compatible client bound to one R2 bucket.
pub struct R2Store {
    client: Client,
    bucket: String,
    urls: PublicUrls,
}

impl R2Store {
    /// Creates a store from an existing client.
    pub fn new(client: Client, bucket: impl Into<String>, urls: PublicUrls) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            urls,
        }
    }

    /// Builds the S3 client for the configured account.
    ///
    /// Called once at startup; the client is shared by every request.
    pub async fn connect(config: &R2Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "mixmaster-r2",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new("auto"))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        let urls = PublicUrls::for_r2_bucket(&config.bucket, config.public_base_url.as_deref());
        Self::new(Client::from_conf(s3_config), &config.bucket, urls)
    }
}

#[async_trait]
impl ObjectStore for R2Store {
    fn backend_name(&self) -> &'static str {
        "r2"
    }

    async fn upload_blob(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "PutObject", key))?;

        Ok(self.urls.url_for(key))
    }

    async fn read_text_object(&self, key: &str) -> Result<Option<String>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_no_such_key()) =>
            {
                return Ok(None);
            }
            Err(err) => return Err(map_sdk_error(err, "GetObject", key)),
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| map_body_error(e, key))?
            .into_bytes();

        String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))
    }

    async fn write_text_object(&self, key: &str, text: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(text.as_bytes().to_vec()))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "PutObject", key))?;

        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "DeleteObject", key))?;

        Ok(())
    }

    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(map_presigning_config_error)?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| map_sdk_error(e, "PresignPutObject", key))?;

        Ok(request.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        self.urls.url_for(key)
    }

    fn object_key_from_url(&self, url: &str) -> Option<String> {
        self.urls.key_for(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r2_config(public_base_url: Option<&str>) -> R2Config {
        R2Config {
            access_key: "access".to_string(),
            secret_key: "secret".to_string(),
            bucket: "mixes".to_string(),
            endpoint: "https://acct.r2.cloudflarestorage.com".to_string(),
            public_base_url: public_base_url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_public_urls_default_to_bucket_domain() {
        let store = R2Store::connect(&r2_config(None)).await;

        assert_eq!(store.backend_name(), "r2");
        assert_eq!(
            store.public_url("tracks/a.mp3"),
            "https://mixes.r2.dev/tracks/a.mp3"
        );
    }

    #[tokio::test]
    async fn test_object_key_from_configured_base() {
        let store = R2Store::connect(&r2_config(Some("https://cdn.example.com/"))).await;

        assert_eq!(
            store.public_url("tracks/a.mp3"),
            "https://cdn.example.com/tracks/a.mp3"
        );
        assert_eq!(
            store
                .object_key_from_url("https://mixes.r2.dev/tracks/b.mp3")
                .as_deref(),
            Some("tracks/b.mp3")
        );
    }

    #[tokio::test]
    async fn test_presign_is_offline() {
        let store = R2Store::connect(&r2_config(None)).await;
        let url = store
            .presign_upload("tracks/a.mp3", "audio/mpeg", Duration::from_secs(900))
            .await
            .unwrap();

        assert!(url.starts_with("https://acct.r2.cloudflarestorage.com/mixes/tracks/a.mp3?"));
        assert!(url.contains("X-Amz-Expires=900"));
    }
}
