//! Storage implementations for different backends

pub mod in_memory;
pub mod json_file;
pub mod locks;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use locks::RecordLocks;

use std::path::PathBuf;
use uuid::Uuid;

/// Errors raised by storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {kind} stored under {id}")]
    Missing { kind: &'static str, id: Uuid },

    #[error("failed to acquire lock: {0}")]
    Lock(String),
}
