mod document;
mod error;
mod http_mapping;
mod traits;
mod urls;

pub use document::{
    decode_events, encode_events, Document, DocumentPolicy, DEFAULT_EVENTS_OBJECT_KEY,
};
pub use error::{Result, StorageError};
pub use http_mapping::storage_error_to_status_code;
pub use traits::ObjectStore;
pub use urls::{bucket_domain, strip_trailing_slash, PublicUrls};
