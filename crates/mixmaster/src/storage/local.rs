//! File-based object store rooted at a local directory.
//!
//! Keys map to paths below the root. Blobs are served back over HTTP by the
//! router under `/files`.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;

use mixmaster_core::storage::{ObjectStore, PublicUrls, Result, StorageError};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    urls: PublicUrls,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            urls: PublicUrls::new(public_base_url),
        }
    }

    /// Resolves `key` below the root. Absolute keys and `..` are rejected.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key.trim_start_matches('/'));
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if key.trim().is_empty() || !is_plain {
            return Err(StorageError::RequestFailed(format!(
                "invalid object key: {key:?}"
            )));
        }
        Ok(self.root.join(relative))
    }

    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(e, key))?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| map_io_error(e, key))
    }
}

fn map_io_error(err: std::io::Error, key: &str) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound {
            key: key.to_string(),
        },
        ErrorKind::InvalidData => StorageError::Serialization(format!("{key}: {err}")),
        _ => StorageError::RequestFailed(format!("{key}: {err}")),
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn upload_blob(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String> {
        self.write_bytes(key, &bytes).await?;
        Ok(self.urls.url_for(key))
    }

    async fn read_text_object(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(e, key)),
        }
    }

    async fn write_text_object(&self, key: &str, text: &str) -> Result<()> {
        self.write_bytes(key, text.as_bytes()).await
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(e, key)),
        }
    }

    async fn presign_upload(
        &self,
        _key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> Result<String> {
        Err(StorageError::Unsupported {
            backend: self.backend_name(),
            operation: "presign_upload",
        })
    }

    fn public_url(&self, key: &str) -> String {
        self.urls.url_for(key)
    }

    fn object_key_from_url(&self, url: &str) -> Option<String> {
        self.urls.key_for(url)
    }
}
