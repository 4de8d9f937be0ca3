//! API Exposure modules for different protocols
//!
//! Each exposure consumes the shared `CatalogHost` (or nothing, for plain
//! health routes) and produces an Axum router for its protocol.

pub mod graphql;
pub mod rest;

pub use graphql::GraphQLExposure;
pub use rest::RestExposure;
