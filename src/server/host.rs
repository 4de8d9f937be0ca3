//! Server host for transport-agnostic API exposure
//!
//! The host owns the repositories and the configuration they were built from.
//! Exposures (GraphQL, health routes) borrow it through an `Arc`.

use crate::config::CatalogConfig;
use crate::core::model::{Cart, Product};
use crate::core::store::RecordStore;
use crate::repository::{CartRepository, IdGenerator, ProductRepository};
use crate::storage::{InMemoryStore, JsonFileStore};
use anyhow::Result;
use std::sync::Arc;

/// Host context containing all catalog state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(CatalogHost::open(CatalogConfig::load()?)?);
/// let graphql_app = GraphQLExposure::build_router(host.clone());
/// ```
pub struct CatalogHost {
    /// Configuration the host was built from
    pub config: Arc<CatalogConfig>,

    /// Cart operations
    pub carts: CartRepository,

    /// Product operations
    pub products: ProductRepository,
}

impl CatalogHost {
    /// Build a host backed by JSON files under `config.data_dir`
    pub fn open(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let carts = JsonFileStore::<Cart>::open(config.carts_path())?;
        let products = JsonFileStore::<Product>::open(config.products_path())?;

        tracing::info!(data_dir = %config.data_dir.display(), "catalog storage ready");

        Ok(Self::from_stores(config, Arc::new(carts), Arc::new(products)))
    }

    /// Build a host that keeps everything in memory
    pub fn in_memory(config: CatalogConfig) -> Self {
        Self::from_stores(
            config,
            Arc::new(InMemoryStore::<Cart>::new()),
            Arc::new(InMemoryStore::<Product>::new()),
        )
    }

    /// Build a host from explicit stores
    pub fn from_stores(
        config: CatalogConfig,
        carts: Arc<dyn RecordStore<Cart>>,
        products: Arc<dyn RecordStore<Product>>,
    ) -> Self {
        let ids = IdGenerator::new(config.id_attempts);
        let product_repository = ProductRepository::new(products, ids.clone());
        let cart_repository = CartRepository::new(carts, product_repository.store(), ids);

        Self {
            config: Arc::new(config),
            carts: cart_repository,
            products: product_repository,
        }
    }
}
