use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Blob storage holding uploaded tracks and the events document.
///
/// Keys are bucket-relative paths such as `tracks/<id>-intro.mp3`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short backend name used in logs and errors.
    fn backend_name(&self) -> &'static str;

    /// Stores `bytes` under `key` and returns the object's public URL.
    async fn upload_blob(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;

    /// Reads an object as UTF-8 text. A missing object is `Ok(None)`.
    async fn read_text_object(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites an object with JSON text.
    async fn write_text_object(&self, key: &str, text: &str) -> Result<()>;

    /// Deletes an object. Deleting a missing object succeeds.
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Issues a time-limited URL that accepts a direct `PUT` of the object.
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String>;

    /// Public URL an object will be served from.
    fn public_url(&self, key: &str) -> String;

    /// Maps a public URL back to its object key. URLs outside this store's
    /// public base map to `None`.
    fn object_key_from_url(&self, url: &str) -> Option<String>;
}
