//! Record trait defining the core abstraction for persisted documents

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for every document the catalog persists.
///
/// A record is a self-contained JSON document addressed by a single
/// identifier. Stores use the resource names to pick a directory and to
/// label log lines and errors.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The plural resource name (e.g., "carts", "products")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "cart", "product")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;
}
