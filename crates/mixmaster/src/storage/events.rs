//! Read-modify-write access to the events document.
//!
//! Every mutation reads the whole collection, changes it in memory and writes
//! it back with one overwrite. Concurrent writers are not coordinated; the last
//! write wins.

use std::sync::Arc;

use futures_util::future::try_join_all;

use mixmaster_core::event::EventRecord;
use mixmaster_core::storage::{
    decode_events, encode_events, Document, DocumentPolicy, ObjectStore, Result,
};
use mixmaster_core::track::is_media_key;

/// Accessor for the events document stored under a fixed key.
#[derive(Clone)]
pub struct EventStore {
    store: Arc<dyn ObjectStore>,
    key: String,
    policy: DocumentPolicy,
}

impl EventStore {
    pub fn new(store: Arc<dyn ObjectStore>, key: impl Into<String>, policy: DocumentPolicy) -> Self {
        Self {
            store,
            key: key.into(),
            policy,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads every stored event in insertion order.
    ///
    /// A missing document is an empty collection.
    pub async fn read_events(&self) -> Result<Vec<EventRecord>> {
        let Some(raw) = self.store.read_text_object(&self.key).await? else {
            tracing::debug!(key = %self.key, "Events document not found, starting empty");
            return Ok(Vec::new());
        };

        let document = decode_events(&self.key, &raw)?;
        if let Document::NotAnArray { found } = &document {
            match self.policy {
                DocumentPolicy::Lenient => tracing::warn!(
                    key = %self.key,
                    found = %found,
                    "Events document is not an array, treating it as empty"
                ),
                DocumentPolicy::Strict => tracing::error!(
                    key = %self.key,
                    found = %found,
                    "Events document is not an array"
                ),
            }
        }
        document.into_events(&self.key, self.policy)
    }

    /// Overwrites the document with `events`.
    pub async fn persist_events(&self, events: &[EventRecord]) -> Result<()> {
        let body = encode_events(events)?;
        self.store.write_text_object(&self.key, &body).await?;
        tracing::debug!(key = %self.key, count = events.len(), "Persisted events document");
        Ok(())
    }

    /// Deletes the objects behind `urls` concurrently. Returns the number of
    /// deleted objects.
    ///
    /// Only track and cover keys under this store's own public bases are
    /// touched. Foreign URLs, other prefixes and the events document itself
    /// are skipped.
    pub async fn delete_objects_by_url(&self, urls: &[String]) -> Result<usize> {
        let mut keys: Vec<String> = urls
            .iter()
            .filter_map(|url| self.store.object_key_from_url(url))
            .filter(|key| key != &self.key && is_media_key(key))
            .collect();
        keys.dedup();

        if keys.is_empty() {
            return Ok(0);
        }

        try_join_all(keys.iter().map(|key| self.store.delete_object(key))).await?;
        tracing::info!(count = keys.len(), "Deleted media objects");
        Ok(keys.len())
    }
}
