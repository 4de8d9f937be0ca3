//! Identifier allocation with bounded collision retry

use crate::core::error::CatalogError;
use crate::core::record::Record;
use crate::core::store::RecordStore;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

type Source = Arc<dyn Fn() -> Uuid + Send + Sync>;

/// Allocates identifiers that are not yet taken in a store.
///
/// Each candidate is checked against the store; a taken candidate is
/// replaced, up to `attempts` candidates in total, after which allocation
/// fails with [`CatalogError::Conflict`].
#[derive(Clone)]
pub struct IdGenerator {
    attempts: u32,
    source: Source,
}

impl IdGenerator {
    pub const DEFAULT_ATTEMPTS: u32 = 3;

    /// Random v4 identifiers, `attempts` tries (at least one)
    pub fn new(attempts: u32) -> Self {
        Self::with_source(attempts, Uuid::new_v4)
    }

    /// Use a custom candidate source
    pub fn with_source(attempts: u32, source: impl Fn() -> Uuid + Send + Sync + 'static) -> Self {
        Self {
            attempts: attempts.max(1),
            source: Arc::new(source),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Find an identifier with no record stored under it
    pub async fn allocate<T, S>(&self, store: &S) -> Result<Uuid, CatalogError>
    where
        T: Record,
        S: RecordStore<T> + ?Sized,
    {
        for attempt in 1..=self.attempts {
            let candidate = (self.source)();
            if !store.exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::warn!(
                kind = T::resource_name_singular(),
                id = %candidate,
                attempt,
                "identifier already taken, regenerating"
            );
        }

        Err(CatalogError::Conflict {
            entity_type: T::resource_name_singular(),
            attempts: self.attempts,
        })
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}
