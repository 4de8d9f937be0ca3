//! Cart repository
//!
//! Every mutation follows the same sequence under the cart's record lock:
//! load the cart, load any referenced product, change the document in memory,
//! write the whole document back. All lookups happen before the first change,
//! so a missing product never leaves a half-updated cart behind.

use crate::core::error::CatalogError;
use crate::core::model::{Cart, CartDraft, DeleteResult, Product, sum_prices};
use crate::core::store::RecordStore;
use crate::repository::ids::IdGenerator;
use crate::storage::RecordLocks;
use std::sync::Arc;
use uuid::Uuid;

/// CRUD and content operations on cart records
#[derive(Clone)]
pub struct CartRepository {
    carts: Arc<dyn RecordStore<Cart>>,
    products: Arc<dyn RecordStore<Product>>,
    ids: IdGenerator,
    locks: RecordLocks,
}

impl CartRepository {
    pub fn new(
        carts: Arc<dyn RecordStore<Cart>>,
        products: Arc<dyn RecordStore<Product>>,
        ids: IdGenerator,
    ) -> Self {
        Self {
            carts,
            products,
            ids,
            locks: RecordLocks::new(),
        }
    }

    pub async fn get(&self, id: &Uuid) -> Result<Cart, CatalogError> {
        tracing::debug!(cart_id = %id, "fetching cart");
        self.load(id).await
    }

    pub async fn list(&self) -> Result<Vec<Cart>, CatalogError> {
        Ok(self.carts.list().await?)
    }

    pub async fn create(&self, draft: CartDraft) -> Result<Cart, CatalogError> {
        draft.check()?;
        warn_on_total_mismatch(None, &draft);

        let id = self.ids.allocate(self.carts.as_ref()).await?;
        let cart = Cart::from_draft(id, draft);
        self.carts.put(&cart).await?;

        tracing::info!(cart_id = %id, name = %cart.cart_name, "cart created");
        Ok(cart)
    }

    /// Replace name and contents; the total is recomputed from `draft.products`
    ///
    /// The draft is validated before the cart is looked up, so invalid input
    /// is reported as a validation error even when the cart is missing.
    pub async fn update(&self, id: &Uuid, draft: CartDraft) -> Result<Cart, CatalogError> {
        draft.check()?;

        let _guard = self.locks.acquire(*id).await?;
        if !self.carts.exists(id).await? {
            return Err(CatalogError::not_found("cart", id));
        }
        warn_on_total_mismatch(Some(id), &draft);

        let cart = Cart::from_draft(*id, draft);
        self.carts.put(&cart).await?;

        tracing::info!(cart_id = %id, items = cart.products.len(), "cart updated");
        Ok(cart)
    }

    /// Delete a cart; a storage failure yields `success: false`
    pub async fn delete(&self, id: &Uuid) -> Result<DeleteResult, CatalogError> {
        let _guard = self.locks.acquire(*id).await?;

        if !self.carts.exists(id).await? {
            return Err(CatalogError::not_found("cart", id));
        }

        let success = match self.carts.delete(id).await {
            Ok(()) => {
                tracing::info!(cart_id = %id, "cart deleted");
                true
            }
            Err(e) => {
                tracing::warn!(cart_id = %id, error = %e, "cart delete failed");
                false
            }
        };

        Ok(DeleteResult {
            deleted_id: *id,
            success,
        })
    }

    /// Append a snapshot of the product to the cart
    pub async fn add_product(
        &self,
        cart_id: &Uuid,
        product_id: &Uuid,
    ) -> Result<Cart, CatalogError> {
        let _guard = self.locks.acquire(*cart_id).await?;

        let mut cart = self.load(cart_id).await?;
        let product = self.load_product(product_id).await?;

        cart.add_snapshot(product);
        self.carts.put(&cart).await?;

        tracing::info!(
            cart_id = %cart_id,
            product_id = %product_id,
            total_price = cart.total_price,
            "product added to cart"
        );
        Ok(cart)
    }

    /// Remove the first snapshot of the product; unchanged if none matches
    pub async fn remove_product(
        &self,
        cart_id: &Uuid,
        product_id: &Uuid,
    ) -> Result<Cart, CatalogError> {
        let _guard = self.locks.acquire(*cart_id).await?;

        let mut cart = self.load(cart_id).await?;
        let product = self.load_product(product_id).await?;

        if cart.remove_first(&product.product_id) {
            tracing::info!(
                cart_id = %cart_id,
                product_id = %product_id,
                total_price = cart.total_price,
                "product removed from cart"
            );
        } else {
            tracing::debug!(cart_id = %cart_id, product_id = %product_id, "product not in cart");
        }

        self.carts.put(&cart).await?;
        Ok(cart)
    }

    /// Remove every snapshot from the cart
    pub async fn empty(&self, cart_id: &Uuid) -> Result<Cart, CatalogError> {
        let _guard = self.locks.acquire(*cart_id).await?;

        let mut cart = self.load(cart_id).await?;
        cart.clear();
        self.carts.put(&cart).await?;

        tracing::info!(cart_id = %cart_id, "cart emptied");
        Ok(cart)
    }

    async fn load(&self, id: &Uuid) -> Result<Cart, CatalogError> {
        self.carts
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("cart", id))
    }

    async fn load_product(&self, id: &Uuid) -> Result<Product, CatalogError> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("product", id))
    }
}

fn warn_on_total_mismatch(cart_id: Option<&Uuid>, draft: &CartDraft) {
    let Some(supplied) = draft.total_price else {
        return;
    };
    let computed = sum_prices(&draft.products);
    if (supplied - computed).abs() > f64::EPSILON {
        tracing::warn!(
            cart_id = ?cart_id,
            supplied,
            computed,
            "ignoring supplied totalPrice that does not match cart contents"
        );
    }
}
