//! Per-record serialization of read-modify-write sequences

use crate::storage::StorageError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Keyed async mutex: one lock per record id.
///
/// Holding the guard returned by [`acquire`](Self::acquire) excludes every
/// other task in this process from mutating the same record. Entries nobody
/// holds or waits on are pruned on the next acquisition.
#[derive(Clone, Default)]
pub struct RecordLocks {
    locks: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`
    pub async fn acquire(&self, id: Uuid) -> Result<OwnedMutexGuard<()>, StorageError> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .map_err(|e| StorageError::Lock(e.to_string()))?;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(id).or_default())
        };

        Ok(lock.lock_owned().await)
    }

    /// Number of ids currently tracked
    pub fn tracked(&self) -> Result<usize, StorageError> {
        self.locks
            .lock()
            .map(|locks| locks.len())
            .map_err(|e| StorageError::Lock(e.to_string()))
    }
}
