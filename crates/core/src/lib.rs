//! Functional core of the mixmaster event scheduler.
//!
//! Pure types and functions only: validation, scheduling rules, time zone
//! conversion, object key naming and the storage contract. All I/O lives in
//! the server and client crates.

pub mod event;
pub mod serde;
pub mod storage;
pub mod timezone;
pub mod track;
