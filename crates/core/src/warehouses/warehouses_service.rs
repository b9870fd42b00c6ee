use log::debug;
use std::sync::Arc;

use super::warehouses_model::{NewWarehouse, Warehouse, WarehouseUpdate};
use super::warehouses_traits::{WarehouseRepositoryTrait, WarehouseServiceTrait};
use crate::errors::{Error, Result};

pub struct WarehouseService {
    repository: Arc<dyn WarehouseRepositoryTrait>,
}

impl WarehouseService {
    pub fn new(repository: Arc<dyn WarehouseRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl WarehouseServiceTrait for WarehouseService {
    async fn create_warehouse(&self, new_warehouse: NewWarehouse) -> Result<Warehouse> {
        let new_warehouse = new_warehouse.normalized()?;
        debug!("Creating warehouse '{}'", new_warehouse.name);
        self.repository.create(new_warehouse).await
    }

    async fn update_warehouse(
        &self,
        warehouse_id: i32,
        update: WarehouseUpdate,
    ) -> Result<Warehouse> {
        update.validate()?;
        let existing = self.get_warehouse(warehouse_id)?;
        let updated = update.apply_to(&existing);
        if updated == existing {
            return Ok(existing);
        }
        self.repository.update(updated).await
    }

    async fn delete_warehouse(&self, warehouse_id: i32) -> Result<()> {
        if self.repository.delete(warehouse_id).await? == 0 {
            return Err(Error::NotFound(format!("Warehouse {}", warehouse_id)));
        }
        debug!("Deleted warehouse {}", warehouse_id);
        Ok(())
    }

    fn get_warehouse(&self, warehouse_id: i32) -> Result<Warehouse> {
        self.repository
            .get_by_id(warehouse_id)?
            .ok_or_else(|| Error::NotFound(format!("Warehouse {}", warehouse_id)))
    }

    fn list_warehouses(&self, filter: Option<&str>) -> Result<Vec<Warehouse>> {
        let filter = filter.map(str::trim).filter(|f| !f.is_empty());
        self.repository.list(filter)
    }
}
