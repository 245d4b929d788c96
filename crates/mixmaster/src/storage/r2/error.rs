//! R2 error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `mixmaster_core::storage`.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::presigning::PresigningConfigError;
use mixmaster_core::storage::StorageError;

/// Map an SDK error from `operation` on `key` to StorageError.
///
/// Failures to reach the endpoint are connection failures; everything the
/// service answered with is a failed request.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, operation: &'static str, key: &str) -> StorageError
where
    E: Error + 'static,
    R: Debug,
{
    let detail = format!("{operation} {key}: {}", DisplayErrorContext(&err));
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            StorageError::ConnectionFailed(detail)
        }
        _ => StorageError::RequestFailed(detail),
    }
}

/// Map an invalid presigning configuration to StorageError.
pub fn map_presigning_config_error(err: PresigningConfigError) -> StorageError {
    StorageError::RequestFailed(format!("invalid presigning config: {err}"))
}

/// Map a failure while streaming an object body to StorageError.
pub fn map_body_error(err: impl std::fmt::Display, key: &str) -> StorageError {
    StorageError::ConnectionFailed(format!("reading {key}: {err}"))
}
