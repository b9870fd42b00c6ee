//! SQLite storage implementation for warehouses.

mod model;
mod repository;

pub use model::{NewWarehouseDB, WarehouseDB};
pub use repository::WarehouseRepository;
