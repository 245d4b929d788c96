//! Object storage backends and the events document accessor.
//!
//! Backends implement [`mixmaster_core::storage::ObjectStore`] and are picked
//! at startup from `STORAGE_BACKEND`. The `r2` backend is compiled in with the
//! `r2` feature (enabled by default):
//!
//! ```bash
//! cargo build -p mixmaster --no-default-features
//! ```

mod events;
mod inmemory;
mod local;
#[cfg(feature = "r2")]
mod r2;

pub use events::EventStore;
pub use inmemory::InMemoryStore;
pub use local::LocalStore;
#[cfg(feature = "r2")]
pub use r2::R2Store;
