//! SQLite storage implementation for SKU mappings.

mod model;
mod repository;

pub use model::SkuMappingDB;
pub use repository::MappingRepository;
