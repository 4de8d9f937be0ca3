//! Store trait for record persistence

use crate::core::record::Record;
use crate::storage::StorageError;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage contract for one kind of record.
///
/// Implementations hold whole documents: `put` replaces everything stored
/// under the record's id and `get` returns the full document. Nothing is
/// cached between calls, so every read reflects the backend's current state.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Check whether a record is stored under `id`
    async fn exists(&self, id: &Uuid) -> Result<bool, StorageError>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>, StorageError>;

    /// List all records, in backend enumeration order
    async fn list(&self) -> Result<Vec<T>, StorageError>;

    /// Create or overwrite a record
    async fn put(&self, record: &T) -> Result<(), StorageError>;

    /// Delete a record
    ///
    /// Fails if nothing is stored under `id`.
    async fn delete(&self, id: &Uuid) -> Result<(), StorageError>;
}
