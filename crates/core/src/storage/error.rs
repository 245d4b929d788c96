use thiserror::Error;

/// Errors raised by object storage backends and the events document codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Object not found: {key}")]
    NotFound { key: String },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Corrupt document {key}: {reason}")]
    CorruptDocument { key: String, reason: String },
    #[error("{operation} is not supported by the {backend} backend")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
