//! Application state shared by every request handler.

use std::sync::Arc;

use mixmaster_core::storage::ObjectStore;

use crate::config::{Config, StorageBackend};
#[cfg(feature = "r2")]
use crate::storage::R2Store;
use crate::storage::{EventStore, InMemoryStore, LocalStore};

/// Shared application state.
///
/// Cloned for each request. The object store client is built once at startup
/// and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Blob storage for tracks and the events document.
    pub store: Arc<dyn ObjectStore>,
    /// Accessor for the events document.
    pub events: EventStore,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state around an already constructed store.
    pub fn new(store: Arc<dyn ObjectStore>, config: Config) -> Self {
        let events = EventStore::new(
            store.clone(),
            config.events_object_key.clone(),
            config.document_policy,
        );

        Self {
            store,
            events,
            config: Arc::new(config),
        }
    }

    /// Builds the backend selected by `config`.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn ObjectStore> = match config.storage_backend {
            StorageBackend::Memory => {
                Arc::new(InMemoryStore::new(&config.local_public_base_url))
            }
            StorageBackend::Local => Arc::new(LocalStore::new(
                config.local_storage_dir.clone(),
                &config.local_public_base_url,
            )),
            #[cfg(feature = "r2")]
            StorageBackend::R2 => {
                let r2 = config
                    .r2
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("R2 backend selected without R2 settings"))?;
                Arc::new(R2Store::connect(r2).await)
            }
            #[cfg(not(feature = "r2"))]
            StorageBackend::R2 => {
                anyhow::bail!("The r2 backend is not compiled in; rebuild with the 'r2' feature")
            }
        };

        tracing::info!(
            backend = store.backend_name(),
            events_key = %config.events_object_key,
            document_policy = %config.document_policy,
            "Initialized object storage"
        );

        Ok(Self::new(store, config))
    }
}

impl Default for AppState {
    /// In-memory state for tests.
    fn default() -> Self {
        let config = Config::default();
        let store = Arc::new(InMemoryStore::new(&config.local_public_base_url));
        Self::new(store, config)
    }
}
