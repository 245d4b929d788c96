use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

use mixmaster_core::storage::{DocumentPolicy, DEFAULT_EVENTS_OBJECT_KEY};
use thiserror::Error;

/// Document key used by the `local` backend, relative to its root directory.
const LOCAL_EVENTS_OBJECT_KEY: &str = "events.json";

/// Errors raised while loading configuration. Fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Where uploaded tracks and the events document live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    R2,
    Local,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R2 => "r2",
            Self::Local => "local",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r2" => Ok(Self::R2),
            "local" => Ok(Self::Local),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{other}', expected 'r2', 'local' or 'memory'"
            )),
        }
    }
}

/// Connection parameters for a Cloudflare R2 bucket.
#[derive(Clone, PartialEq, Eq)]
pub struct R2Config {
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// S3 API endpoint, e.g. `https://<account>.r2.cloudflarestorage.com`.
    pub endpoint: String,
    /// Public base URL objects are served from (default: `https://<bucket>.r2.dev`).
    pub public_base_url: Option<String>,
}

impl fmt::Debug for R2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("R2Config")
            .field("access_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend (default: r2)
    pub storage_backend: StorageBackend,
    /// Key of the events document (default: "json/events.json", "events.json" for local)
    pub events_object_key: String,
    /// Root directory of the local backend (default: "data")
    pub local_storage_dir: PathBuf,
    /// Public base URL of local blobs (default: "http://localhost:3000/files")
    pub local_public_base_url: String,
    /// Handling of a stored document that is not an array (default: lenient)
    pub document_policy: DocumentPolicy,
    /// Lifetime of presigned upload URLs in seconds (default: 900)
    pub presign_expiry_seconds: u64,
    /// Body limit for track uploads in bytes (default: 50 MiB)
    pub max_upload_bytes: usize,
    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
    /// Present when the r2 backend is selected.
    pub r2: Option<R2Config>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORAGE_BACKEND` - `r2`, `local` or `memory` (default: r2)
    /// - `EVENTS_OBJECT_KEY` - events document key
    /// - `LOCAL_STORAGE_DIR` - local backend root (default: "data")
    /// - `LOCAL_PUBLIC_BASE_URL` - local blob base URL (default: "http://localhost:3000/files")
    /// - `DOCUMENT_POLICY` - `lenient` or `strict` (default: lenient)
    /// - `PRESIGN_EXPIRY_SECONDS` - presigned URL lifetime (default: 900)
    /// - `MAX_UPLOAD_BYTES` - track upload body limit (default: 52428800)
    /// - `REQUEST_TIMEOUT_SECONDS` - request timeout (default: 30)
    /// - `R2_ACCESS_KEY`, `R2_SECRET_KEY`, `R2_BUCKET`, `R2_ENDPOINT` - required for r2
    /// - `R2_PUBLIC_BASE_URL` - public object base (default: "https://<bucket>.r2.dev")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse().map_err(|reason| ConfigError::InvalidValue {
                var: "STORAGE_BACKEND",
                reason,
            })?,
            None => StorageBackend::R2,
        };

        let document_policy = match var("DOCUMENT_POLICY") {
            Some(value) => value.parse().map_err(|reason| ConfigError::InvalidValue {
                var: "DOCUMENT_POLICY",
                reason,
            })?,
            None => DocumentPolicy::default(),
        };

        let events_object_key = var("EVENTS_OBJECT_KEY").unwrap_or_else(|| {
            match storage_backend {
                StorageBackend::Local => LOCAL_EVENTS_OBJECT_KEY,
                StorageBackend::R2 | StorageBackend::Memory => DEFAULT_EVENTS_OBJECT_KEY,
            }
            .to_string()
        });

        let r2 = match storage_backend {
            StorageBackend::R2 => {
                let required = |key: &'static str| var(key).ok_or(ConfigError::MissingVar(key));
                Some(R2Config {
                    access_key: required("R2_ACCESS_KEY")?,
                    secret_key: required("R2_SECRET_KEY")?,
                    bucket: required("R2_BUCKET")?,
                    endpoint: required("R2_ENDPOINT")?,
                    public_base_url: var("R2_PUBLIC_BASE_URL"),
                })
            }
            StorageBackend::Local | StorageBackend::Memory => None,
        };

        Ok(Self {
            storage_backend,
            events_object_key,
            local_storage_dir: var("LOCAL_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            local_public_base_url: var("LOCAL_PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000/files".to_string()),
            document_policy,
            presign_expiry_seconds: var("PRESIGN_EXPIRY_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            max_upload_bytes: var("MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(50 * 1024 * 1024),
            request_timeout_seconds: var("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            r2,
        })
    }

    /// Get the presigned URL lifetime as a Duration.
    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_seconds)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    /// In-memory configuration with every other value at its default.
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Memory,
            events_object_key: DEFAULT_EVENTS_OBJECT_KEY.to_string(),
            local_storage_dir: PathBuf::from("data"),
            local_public_base_url: "http://localhost:3000/files".to_string(),
            document_policy: DocumentPolicy::Lenient,
            presign_expiry_seconds: 900,
            max_upload_bytes: 50 * 1024 * 1024,
            request_timeout_seconds: 30,
            r2: None,
        }
    }
}
