use async_trait::async_trait;

use super::warehouses_model::{NewWarehouse, Warehouse, WarehouseUpdate};
use crate::errors::Result;

/// Contract for warehouse persistence.
#[async_trait]
pub trait WarehouseRepositoryTrait: Send + Sync {
    /// Inserts a warehouse. Fails with `Error::Conflict` on a duplicate name.
    async fn create(&self, new_warehouse: NewWarehouse) -> Result<Warehouse>;

    /// Persists the full state of an existing warehouse. Fails with
    /// `Error::Conflict` when the new name belongs to another warehouse.
    async fn update(&self, warehouse: Warehouse) -> Result<Warehouse>;

    /// Deletes a warehouse that has no movements. Fails with
    /// `Error::Conflict` while movements still reference it.
    async fn delete(&self, warehouse_id: i32) -> Result<usize>;

    fn get_by_id(&self, warehouse_id: i32) -> Result<Option<Warehouse>>;

    /// Lists warehouses ordered by name, optionally filtered by a
    /// case-insensitive name substring.
    fn list(&self, filter: Option<&str>) -> Result<Vec<Warehouse>>;
}

#[async_trait]
pub trait WarehouseServiceTrait: Send + Sync {
    async fn create_warehouse(&self, new_warehouse: NewWarehouse) -> Result<Warehouse>;
    async fn update_warehouse(
        &self,
        warehouse_id: i32,
        update: WarehouseUpdate,
    ) -> Result<Warehouse>;
    async fn delete_warehouse(&self, warehouse_id: i32) -> Result<()>;
    fn get_warehouse(&self, warehouse_id: i32) -> Result<Warehouse>;
    fn list_warehouses(&self, filter: Option<&str>) -> Result<Vec<Warehouse>>;
}
