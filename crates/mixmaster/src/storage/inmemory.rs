//! In-memory object store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mixmaster_core::storage::{ObjectStore, PublicUrls, Result, StorageError};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory storage backend for tests and demos.
///
/// Objects live in a `HashMap` behind `Arc<RwLock<_>>` and are lost when the
/// store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    urls: PublicUrls,
}

impl InMemoryStore {
    /// Creates an empty store whose objects are addressed under `public_base_url`.
    pub fn new(public_base_url: &str) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            urls: PublicUrls::new(public_base_url),
        }
    }

    /// True when an object is stored under `key`.
    #[cfg(test)]
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    /// Content type recorded for `key`.
    #[cfg(test)]
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn upload_blob(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.urls.url_for(key))
    }

    async fn read_text_object(&self, key: &str) -> Result<Option<String>> {
        let objects = self.objects.read().await;
        objects
            .get(key)
            .map(|object| {
                String::from_utf8(object.bytes.clone())
                    .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))
            })
            .transpose()
    }

    async fn write_text_object(&self, key: &str, text: &str) -> Result<()> {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes: text.as_bytes().to_vec(),
                content_type: "application/json".to_string(),
            },
        );
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn presign_upload(
        &self,
        key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> Result<String> {
        Ok(format!(
            "{}?expires_in={}",
            self.urls.url_for(key),
            expires_in.as_secs()
        ))
    }

    fn public_url(&self, key: &str) -> String {
        self.urls.url_for(key)
    }

    fn object_key_from_url(&self, url: &str) -> Option<String> {
        self.urls.key_for(url)
    }
}
