//! GraphQL object, input and enum types
//!
//! Wire types are kept apart from the stored documents: identifiers travel as
//! `ID` strings here and are parsed into UUIDs before reaching a repository.

use crate::core::error::CatalogError;
use crate::core::model::{Cart, DeleteResult, NewProduct, Product};
use async_graphql::{Enum, Error, ErrorExtensions, ID, InputObject, SimpleObject};
use uuid::Uuid;

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
#[graphql(name = "ProductType", remote = "crate::core::model::ProductType")]
pub enum ProductTypeValue {
    Gel,
    Powder,
    Bar,
    Drink,
    Capsule,
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
#[graphql(name = "ProductStatus", remote = "crate::core::model::ProductStatus")]
pub enum ProductStatusValue {
    InStock,
    LowStock,
    OutOfStock,
    Discontinued,
}

/// A product, or a product snapshot inside a cart
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Product")]
pub struct ProductObject {
    pub product_id: ID,
    pub product_name: String,
    pub product_price: f64,
    pub product_type: ProductTypeValue,
    pub product_status: ProductStatusValue,
}

impl From<Product> for ProductObject {
    fn from(product: Product) -> Self {
        Self {
            product_id: ID(product.product_id.to_string()),
            product_name: product.product_name,
            product_price: product.product_price,
            product_type: product.product_type.into(),
            product_status: product.product_status.into(),
        }
    }
}

/// A shopping cart
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Cart")]
pub struct CartObject {
    pub cart_id: ID,
    pub cart_name: String,
    /// Always the sum of the snapshot prices
    pub total_price: f64,
    /// Product snapshots taken when each product was added
    pub product: Vec<ProductObject>,
}

impl From<Cart> for CartObject {
    fn from(cart: Cart) -> Self {
        Self {
            cart_id: ID(cart.cart_id.to_string()),
            cart_name: cart.cart_name,
            total_price: cart.total_price,
            product: cart.products.into_iter().map(ProductObject::from).collect(),
        }
    }
}

/// Result of `deleteCart` / `deleteProduct`
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "DeleteResult")]
pub struct DeleteResultObject {
    pub deleted_id: ID,
    pub success: bool,
}

impl From<DeleteResult> for DeleteResultObject {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_id: ID(result.deleted_id.to_string()),
            success: result.success,
        }
    }
}

/// A full product snapshot supplied by the caller
#[derive(InputObject, Debug, Clone)]
#[graphql(name = "ProductSnapshotInput")]
pub struct ProductSnapshotInput {
    pub product_id: ID,
    pub product_name: String,
    pub product_price: f64,
    pub product_type: Option<ProductTypeValue>,
    pub product_status: Option<ProductStatusValue>,
}

impl ProductSnapshotInput {
    pub fn into_product(self) -> Result<Product, CatalogError> {
        let product_id = Uuid::parse_str(self.product_id.as_str())
            .map_err(|_| CatalogError::validation("productId", "not a valid identifier"))?;

        Ok(Product {
            product_id,
            product_name: self.product_name,
            product_price: self.product_price,
            product_type: self.product_type.map(Into::into).unwrap_or_default(),
            product_status: self.product_status.map(Into::into).unwrap_or_default(),
        })
    }
}

/// Input of `createProduct`
#[derive(InputObject, Debug, Clone)]
#[graphql(name = "CreateProductInput")]
pub struct CreateProductInput {
    /// Accepted for compatibility; identifiers are always generated
    pub product_id: Option<ID>,
    pub product_name: String,
    pub product_price: f64,
    pub product_type: Option<ProductTypeValue>,
    pub product_status: Option<ProductStatusValue>,
}

impl From<CreateProductInput> for NewProduct {
    fn from(input: CreateProductInput) -> Self {
        NewProduct {
            product_name: input.product_name,
            product_price: input.product_price,
            product_type: input.product_type.map(Into::into),
            product_status: input.product_status.map(Into::into),
        }
    }
}

/// Parse a record identifier; anything that is not a UUID names no record
pub fn parse_id(entity_type: &'static str, id: &ID) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(id.as_str()).map_err(|_| CatalogError::not_found(entity_type, id.as_str()))
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> Error {
        let message = if self.is_internal() {
            tracing::error!(error = %self, "internal error while resolving GraphQL field");
            "Internal error".to_string()
        } else {
            self.to_string()
        };

        Error::new(message).extend_with(|_, ext| {
            ext.set("code", self.error_code());
            match self {
                CatalogError::NotFound { entity_type, id } => {
                    ext.set("entityType", *entity_type);
                    ext.set("id", id.as_str());
                }
                CatalogError::Validation { field, .. } => ext.set("field", field.as_str()),
                CatalogError::Conflict { attempts, .. } => {
                    ext.set("attempts", i64::from(*attempts));
                }
                CatalogError::Storage(_) => {}
            }
        })
    }
}
