//! Cart and product documents
//!
//! These are the exact shapes written to disk: camelCase keys, enums as
//! `SCREAMING_SNAKE_CASE` strings, no envelope. A cart embeds full product
//! snapshots rather than references, so deleting or replacing a product never
//! changes carts that already hold it.

use crate::core::error::CatalogError;
use crate::core::record::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

const PRICE_MESSAGE: &str = "Price must be a non-negative number";

/// Product category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    #[default]
    Gel,
    Powder,
    Bar,
    Drink,
    Capsule,
}

/// Stock state of a product
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    InStock,
    LowStock,
    OutOfStock,
    Discontinued,
}

/// A product document, also used verbatim as a cart snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "Name must be at least 1 character long"))]
    pub product_name: String,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub product_price: f64,
    #[serde(default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub product_status: ProductStatus,
}

impl Record for Product {
    fn resource_name() -> &'static str {
        "products"
    }

    fn resource_name_singular() -> &'static str {
        "product"
    }

    fn id(&self) -> Uuid {
        self.product_id
    }
}

impl Product {
    /// Validate the snapshot as if it were being created
    pub fn check(&self) -> Result<(), CatalogError> {
        self.validate()?;
        check_price("productPrice", self.product_price)
    }
}

/// Input for creating a product; the identifier is always generated
#[derive(Clone, Debug, Default, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Name must be at least 1 character long"))]
    pub product_name: String,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub product_price: f64,
    pub product_type: Option<ProductType>,
    pub product_status: Option<ProductStatus>,
}

impl NewProduct {
    pub fn new(product_name: impl Into<String>, product_price: f64) -> Self {
        Self {
            product_name: product_name.into(),
            product_price,
            ..Default::default()
        }
    }

    pub fn check(&self) -> Result<(), CatalogError> {
        self.validate()?;
        check_price("productPrice", self.product_price)
    }

    /// Build the stored document, applying defaults for omitted enums
    pub fn into_product(self, product_id: Uuid) -> Product {
        Product {
            product_id,
            product_name: self.product_name,
            product_price: self.product_price,
            product_type: self.product_type.unwrap_or_default(),
            product_status: self.product_status.unwrap_or_default(),
        }
    }
}

/// A cart document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_id: Uuid,
    pub cart_name: String,
    pub total_price: f64,
    #[serde(rename = "product", default)]
    pub products: Vec<Product>,
}

impl Record for Cart {
    fn resource_name() -> &'static str {
        "carts"
    }

    fn resource_name_singular() -> &'static str {
        "cart"
    }

    fn id(&self) -> Uuid {
        self.cart_id
    }
}

impl Cart {
    /// Build a cart from a draft; the total is derived from the snapshots
    pub fn from_draft(cart_id: Uuid, draft: CartDraft) -> Self {
        let total_price = sum_prices(&draft.products);
        Self {
            cart_id,
            cart_name: draft.cart_name,
            total_price,
            products: draft.products,
        }
    }

    /// Append a product snapshot and refresh the total
    pub fn add_snapshot(&mut self, product: Product) {
        self.products.push(product);
        self.refresh_total();
    }

    /// Remove the first snapshot of `product_id`; returns whether one was found
    pub fn remove_first(&mut self, product_id: &Uuid) -> bool {
        match self
            .products
            .iter()
            .position(|item| &item.product_id == product_id)
        {
            Some(index) => {
                self.products.remove(index);
                self.refresh_total();
                true
            }
            None => false,
        }
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.products.clear();
        self.refresh_total();
    }

    fn refresh_total(&mut self) {
        self.total_price = sum_prices(&self.products);
    }
}

/// Desired state of a cart, used by both create and update
#[derive(Clone, Debug, Default, Validate)]
pub struct CartDraft {
    #[validate(length(min = 1, message = "Name must be at least 1 character long"))]
    pub cart_name: String,
    /// Caller's idea of the total; advisory only, the stored total is always
    /// recomputed from `products`
    pub total_price: Option<f64>,
    pub products: Vec<Product>,
}

impl CartDraft {
    pub fn named(cart_name: impl Into<String>) -> Self {
        Self {
            cart_name: cart_name.into(),
            ..Default::default()
        }
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_total_price(mut self, total_price: f64) -> Self {
        self.total_price = Some(total_price);
        self
    }

    pub fn check(&self) -> Result<(), CatalogError> {
        self.validate()?;
        self.products.iter().try_for_each(Product::check)
    }
}

/// Outcome of a delete operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_id: Uuid,
    pub success: bool,
}

/// Sum of the snapshot prices
pub fn sum_prices(products: &[Product]) -> f64 {
    products.iter().map(|p| p.product_price).sum()
}

fn check_price(field: &str, price: f64) -> Result<(), CatalogError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::validation(field, PRICE_MESSAGE))
    }
}
