//! JSON file storage backend.
//!
//! One directory per record kind, one `<uuid>.json` file per record. The file
//! holds the record's serialized fields and nothing else.
//!
//! # Writes
//!
//! A `put` serializes the whole record into a uniquely named temporary file
//! beside the target and renames it over `<uuid>.json`. Readers therefore see
//! either the old document or the new one, never a torn write. Temporary
//! files end in `.tmp` and are skipped by `list`.
//!
//! # Paths
//!
//! Paths are only ever built from a parsed [`Uuid`], so no caller-supplied
//! string can escape the store directory.

use crate::core::record::Record;
use crate::core::store::RecordStore;
use crate::storage::StorageError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const EXTENSION: &str = "json";

/// Filesystem-backed implementation of `RecordStore<T>`.
///
/// # Example
///
/// ```rust,ignore
/// use catalog::storage::JsonFileStore;
///
/// let carts = JsonFileStore::<Cart>::open("./data/carts")?;
/// carts.put(&cart).await?;
/// ```
#[derive(Debug)]
pub struct JsonFileStore<T: Record> {
    dir: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> JsonFileStore<T> {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;

        tracing::debug!(kind = T::resource_name(), dir = %dir.display(), "opened JSON file store");

        Ok(Self {
            dir,
            _marker: PhantomData,
        })
    }

    /// Directory holding this store's documents
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `id`
    pub fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.{}", id, EXTENSION))
    }

    async fn read_document(&self, path: &Path) -> Result<Option<T>, StorageError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl<T: Record> Clone for JsonFileStore<T> {
    fn clone(&self) -> Self {
        Self {
            dir: self.dir.clone(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for JsonFileStore<T> {
    async fn exists(&self, id: &Uuid) -> Result<bool, StorageError> {
        let path = self.path_for(id);
        fs::try_exists(&path)
            .await
            .map_err(|source| StorageError::Io { path, source })
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, StorageError> {
        self.read_document(&self.path_for(id)).await
    }

    async fn list(&self) -> Result<Vec<T>, StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.dir).await.map_err(io_err)?;
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            // A concurrent delete between read_dir and read is not an error
            if let Some(record) = self.read_document(&path).await? {
                records.push(record);
            }
        }

        Ok(records)
    }

    async fn put(&self, record: &T) -> Result<(), StorageError> {
        let path = self.path_for(&record.id());
        let bytes = serde_json::to_vec(record).map_err(|source| StorageError::Serialization {
            path: path.clone(),
            source,
        })?;

        let tmp = self
            .dir
            .join(format!("{}.{}.tmp", record.id(), Uuid::new_v4().simple()));

        if let Err(source) = fs::write(&tmp, &bytes).await {
            return Err(StorageError::Io { path: tmp, source });
        }

        if let Err(source) = fs::rename(&tmp, &path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "failed to remove temporary file");
            }
            return Err(StorageError::Io { path, source });
        }

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        let path = self.path_for(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::Missing {
                kind: T::resource_name_singular(),
                id: *id,
            }),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}
