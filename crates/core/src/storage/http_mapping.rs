//! Pure functions for mapping storage errors to HTTP status codes.

use super::StorageError;

/// Maps a [`StorageError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `RequestFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `CorruptDocument` -> 500 (Internal Server Error)
/// - `Unsupported` -> 501 (Not Implemented)
///
/// # Examples
///
/// ```
/// use mixmaster_core::storage::{StorageError, storage_error_to_status_code};
///
/// let error = StorageError::Unsupported {
///     backend: "local",
///     operation: "presign_upload",
/// };
/// assert_eq!(storage_error_to_status_code(&error), 501);
/// ```
pub fn storage_error_to_status_code(error: &StorageError) -> u16 {
    match error {
        StorageError::NotFound { .. } => 404,
        StorageError::ConnectionFailed(_) => 503,
        StorageError::RequestFailed(_) => 500,
        StorageError::Serialization(_) => 500,
        StorageError::CorruptDocument { .. } => 500,
        StorageError::Unsupported { .. } => 501,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = StorageError::NotFound {
            key: "tracks/a.mp3".to_string(),
        };
        assert_eq!(storage_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = StorageError::ConnectionFailed("timeout".to_string());
        assert_eq!(storage_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_request_and_document_failures_map_to_500() {
        for error in [
            StorageError::RequestFailed("boom".to_string()),
            StorageError::Serialization("bad utf-8".to_string()),
            StorageError::CorruptDocument {
                key: "json/events.json".to_string(),
                reason: "not json".to_string(),
            },
        ] {
            assert_eq!(storage_error_to_status_code(&error), 500);
        }
    }

    #[test]
    fn test_unsupported_maps_to_501() {
        let error = StorageError::Unsupported {
            backend: "local",
            operation: "presign_upload",
        };
        assert_eq!(storage_error_to_status_code(&error), 501);
    }
}
