//! Product repository

use crate::core::error::CatalogError;
use crate::core::model::{DeleteResult, NewProduct, Product};
use crate::core::store::RecordStore;
use crate::repository::ids::IdGenerator;
use std::sync::Arc;
use uuid::Uuid;

/// Create, read and delete operations on product records
///
/// Products are never updated in place: carts hold snapshots, so a product
/// document only changes by being deleted.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn RecordStore<Product>>,
    ids: IdGenerator,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn RecordStore<Product>>, ids: IdGenerator) -> Self {
        Self { store, ids }
    }

    /// Underlying store, shared with the cart repository for snapshots
    pub fn store(&self) -> Arc<dyn RecordStore<Product>> {
        Arc::clone(&self.store)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Product, CatalogError> {
        tracing::debug!(product_id = %id, "fetching product");
        self.store
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("product", id))
    }

    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.list().await?)
    }

    pub async fn create(&self, input: NewProduct) -> Result<Product, CatalogError> {
        input.check()?;

        let id = self.ids.allocate(self.store.as_ref()).await?;
        let product = input.into_product(id);
        self.store.put(&product).await?;

        tracing::info!(product_id = %id, name = %product.product_name, "product created");
        Ok(product)
    }

    /// Delete a product; a storage failure yields `success: false`
    pub async fn delete(&self, id: &Uuid) -> Result<DeleteResult, CatalogError> {
        if !self.store.exists(id).await? {
            return Err(CatalogError::not_found("product", id));
        }

        let success = match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(product_id = %id, "product deleted");
                true
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "product delete failed");
                false
            }
        };

        Ok(DeleteResult {
            deleted_id: *id,
            success,
        })
    }
}
