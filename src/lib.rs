//! # Catalog Store
//!
//! A GraphQL API for shopping carts and products, persisted as one JSON
//! document per record.
//!
//! ## Features
//!
//! - **Typed Schema**: queries and mutations for carts and products
//! - **Snapshot Semantics**: carts embed full product copies taken at add time
//! - **Derived Totals**: `totalPrice` is always the sum of the snapshot prices
//! - **Pluggable Storage**: JSON files on disk, or in memory for tests
//! - **Configuration-Based**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(CatalogConfig::load()?)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod repository;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::CatalogError,
        model::{
            Cart, CartDraft, DeleteResult, NewProduct, Product, ProductStatus, ProductType,
        },
        record::Record,
        store::RecordStore,
    };

    // === Repositories ===
    pub use crate::repository::{CartRepository, IdGenerator, ProductRepository};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, JsonFileStore, RecordLocks, StorageError};

    // === Config ===
    pub use crate::config::CatalogConfig;

    // === Server ===
    pub use crate::server::{CatalogHost, GraphQLExposure, RestExposure, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
