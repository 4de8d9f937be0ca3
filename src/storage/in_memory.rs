//! In-memory implementation of RecordStore for testing and development

use crate::core::record::Record;
use crate::core::store::RecordStore;
use crate::storage::StorageError;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory record store
///
/// Keeps insertion order so `list` is deterministic. Uses RwLock for
/// thread-safe access; clones share the same map.
pub struct InMemoryStore<T: Record> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Record> InMemoryStore<T> {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    async fn exists(&self, id: &Uuid) -> Result<bool, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        Ok(records.contains_key(id))
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        Ok(records.values().cloned().collect())
    }

    async fn put(&self, record: &T) -> Result<(), StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        records.insert(record.id(), record.clone());

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        records
            .shift_remove(id)
            .map(|_| ())
            .ok_or(StorageError::Missing {
                kind: T::resource_name_singular(),
                id: *id,
            })
    }
}
