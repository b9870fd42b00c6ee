//! Warehouses module - domain models, services, and traits.

mod warehouses_model;
mod warehouses_service;
mod warehouses_traits;


pub use warehouses_model::{NewWarehouse, Warehouse, WarehouseKind, WarehouseUpdate};
pub use warehouses_service::WarehouseService;
pub use warehouses_traits::{WarehouseRepositoryTrait, WarehouseServiceTrait};
