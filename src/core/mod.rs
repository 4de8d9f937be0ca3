//! Core module containing the record abstraction, documents and errors

pub mod error;
pub mod model;
pub mod record;
pub mod store;

pub use error::CatalogError;
pub use model::{Cart, CartDraft, DeleteResult, NewProduct, Product, ProductStatus, ProductType};
pub use record::Record;
pub use store::RecordStore;
