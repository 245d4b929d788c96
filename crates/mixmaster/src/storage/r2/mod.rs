//! Cloudflare R2 storage backend.
//!
//! R2 speaks the S3 API, so this backend drives `aws-sdk-s3` against the
//! account endpoint with region `auto` and path-style addressing.

mod error;
mod store;

pub use store::R2Store;
