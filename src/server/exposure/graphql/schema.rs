//! GraphQL query and mutation roots
//!
//! Resolvers are thin: parse identifiers, call a repository, convert the
//! result. Domain errors become GraphQL errors carrying a `code` extension.

use super::types::{
    CartObject, CreateProductInput, DeleteResultObject, ProductObject, ProductSnapshotInput,
    parse_id,
};
use crate::core::model::CartDraft;
use crate::server::host::CatalogHost;
use async_graphql::{Context, EmptySubscription, ID, Object, Result, ResultExt, Schema};
use std::sync::Arc;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema with the host as context data
pub fn build_schema(host: Arc<CatalogHost>) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(host)
        .finish()
}

fn host<'a>(ctx: &Context<'a>) -> Result<&'a Arc<CatalogHost>> {
    ctx.data::<Arc<CatalogHost>>()
}

fn snapshots(products: Vec<ProductSnapshotInput>) -> Result<Vec<crate::core::model::Product>> {
    products
        .into_iter()
        .map(ProductSnapshotInput::into_product)
        .collect::<Result<Vec<_>, _>>()
        .extend()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch a single cart
    async fn get_cart_by_id(&self, ctx: &Context<'_>, cart_id: ID) -> Result<CartObject> {
        let id = parse_id("cart", &cart_id).extend()?;
        let cart = host(ctx)?.carts.get(&id).await.extend()?;
        Ok(cart.into())
    }

    /// Every stored cart, in no particular order
    async fn get_all_carts(&self, ctx: &Context<'_>) -> Result<Vec<CartObject>> {
        let carts = host(ctx)?.carts.list().await.extend()?;
        Ok(carts.into_iter().map(CartObject::from).collect())
    }

    /// Fetch a single product
    async fn get_product_by_id(&self, ctx: &Context<'_>, product_id: ID) -> Result<ProductObject> {
        let id = parse_id("product", &product_id).extend()?;
        let product = host(ctx)?.products.get(&id).await.extend()?;
        Ok(product.into())
    }

    /// Every stored product, in no particular order
    async fn get_all_products(&self, ctx: &Context<'_>) -> Result<Vec<ProductObject>> {
        let products = host(ctx)?.products.list().await.extend()?;
        Ok(products.into_iter().map(ProductObject::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a cart; `totalPrice` is recomputed from `product`
    async fn create_cart(
        &self,
        ctx: &Context<'_>,
        cart_name: String,
        total_price: Option<f64>,
        product: Option<Vec<ProductSnapshotInput>>,
    ) -> Result<CartObject> {
        let draft = CartDraft {
            cart_name,
            total_price,
            products: snapshots(product.unwrap_or_default())?,
        };
        let cart = host(ctx)?.carts.create(draft).await.extend()?;
        Ok(cart.into())
    }

    /// Replace a cart's name and contents; input is validated before the
    /// cart is looked up
    async fn update_cart(
        &self,
        ctx: &Context<'_>,
        cart_id: ID,
        cart_name: String,
        total_price: f64,
        products: Vec<ProductSnapshotInput>,
    ) -> Result<CartObject> {
        let id = parse_id("cart", &cart_id).extend()?;
        let draft = CartDraft {
            cart_name,
            total_price: Some(total_price),
            products: snapshots(products)?,
        };
        let cart = host(ctx)?.carts.update(&id, draft).await.extend()?;
        Ok(cart.into())
    }

    async fn delete_cart(&self, ctx: &Context<'_>, cart_id: ID) -> Result<DeleteResultObject> {
        let id = parse_id("cart", &cart_id).extend()?;
        let result = host(ctx)?.carts.delete(&id).await.extend()?;
        Ok(result.into())
    }

    /// Create a product; any supplied `productId` is ignored
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        input: CreateProductInput,
    ) -> Result<ProductObject> {
        let product = host(ctx)?.products.create(input.into()).await.extend()?;
        Ok(product.into())
    }

    async fn delete_product(
        &self,
        ctx: &Context<'_>,
        product_id: ID,
    ) -> Result<DeleteResultObject> {
        let id = parse_id("product", &product_id).extend()?;
        let result = host(ctx)?.products.delete(&id).await.extend()?;
        Ok(result.into())
    }

    /// Append a snapshot of the product to the cart
    async fn add_products_to_cart(
        &self,
        ctx: &Context<'_>,
        cart_id: ID,
        product_id: ID,
    ) -> Result<CartObject> {
        let cart_id = parse_id("cart", &cart_id).extend()?;
        let product_id = parse_id("product", &product_id).extend()?;
        let cart = host(ctx)?
            .carts
            .add_product(&cart_id, &product_id)
            .await
            .extend()?;
        Ok(cart.into())
    }

    /// Remove the first snapshot of the product from the cart
    async fn remove_products_from_cart(
        &self,
        ctx: &Context<'_>,
        cart_id: ID,
        product_id: ID,
    ) -> Result<CartObject> {
        let cart_id = parse_id("cart", &cart_id).extend()?;
        let product_id = parse_id("product", &product_id).extend()?;
        let cart = host(ctx)?
            .carts
            .remove_product(&cart_id, &product_id)
            .await
            .extend()?;
        Ok(cart.into())
    }

    async fn empty_cart(&self, ctx: &Context<'_>, cart_id: ID) -> Result<CartObject> {
        let id = parse_id("cart", &cart_id).extend()?;
        let cart = host(ctx)?.carts.empty(&id).await.extend()?;
        Ok(cart.into())
    }
}
