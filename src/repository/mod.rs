//! Repositories implementing the catalog operations on top of record stores

pub mod cart;
pub mod ids;
pub mod product;

pub use cart::CartRepository;
pub use ids::IdGenerator;
pub use product::ProductRepository;
