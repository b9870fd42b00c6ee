use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::balance_calculator::compute_balance;
use super::ledger::{delete_in, record_in, transfer_in, update_in, LedgerTransaction};
use super::movements_model::{
    Movement, MovementFilter, MovementUpdate, NewMovement, StockPosition, TransferRequest,
    TransferResult,
};
use super::movements_traits::{MovementRepositoryTrait, MovementServiceTrait};
use crate::errors::{Error, Result};
use crate::products::ProductRepositoryTrait;
use crate::utils::time_utils::ledger_now;
use crate::warehouses::WarehouseRepositoryTrait;

pub struct MovementService {
    repository: Arc<dyn MovementRepositoryTrait>,
    product_repository: Arc<dyn ProductRepositoryTrait>,
    warehouse_repository: Arc<dyn WarehouseRepositoryTrait>,
}

impl MovementService {
    pub fn new(
        repository: Arc<dyn MovementRepositoryTrait>,
        product_repository: Arc<dyn ProductRepositoryTrait>,
        warehouse_repository: Arc<dyn WarehouseRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            product_repository,
            warehouse_repository,
        }
    }

    fn single(mut written: Vec<Movement>) -> Result<Movement> {
        written
            .pop()
            .ok_or_else(|| Error::Unexpected("Ledger job returned no movement".to_string()))
    }
}

#[async_trait::async_trait]
impl MovementServiceTrait for MovementService {
    fn balance(&self, sku: &str, warehouse_id: i32) -> Result<i64> {
        if self.product_repository.get_by_sku(sku)?.is_none() {
            return Err(Error::NotFound(format!("Product '{}'", sku)));
        }
        if self.warehouse_repository.get_by_id(warehouse_id)?.is_none() {
            return Err(Error::NotFound(format!("Warehouse {}", warehouse_id)));
        }
        Ok(compute_balance(
            &self.repository.pair_history(sku, warehouse_id)?,
        ))
    }

    async fn record(&self, new_movement: NewMovement) -> Result<Movement> {
        let now = ledger_now();
        let written = self
            .repository
            .run_ledger_job(Box::new(move |tx: &mut dyn LedgerTransaction| {
                record_in(tx, new_movement, now).map(|m| vec![m])
            }))
            .await?;
        Self::single(written)
    }

    async fn transfer(&self, request: TransferRequest) -> Result<TransferResult> {
        let now = ledger_now();
        info!(
            "Transferring {} of '{}' from warehouse {} to {}",
            request.quantity, request.sku, request.origin_id, request.destination_id
        );
        let mut written = self
            .repository
            .run_ledger_job(Box::new(move |tx: &mut dyn LedgerTransaction| {
                transfer_in(tx, request, now).map(|r| vec![r.exit, r.entry])
            }))
            .await?
            .into_iter();
        match (written.next(), written.next()) {
            (Some(exit), Some(entry)) => Ok(TransferResult { exit, entry }),
            _ => Err(Error::Unexpected(
                "Transfer did not produce both movements".to_string(),
            )),
        }
    }

    async fn update_movement(
        &self,
        movement_id: i32,
        update: MovementUpdate,
    ) -> Result<Movement> {
        let written = self
            .repository
            .run_ledger_job(Box::new(move |tx: &mut dyn LedgerTransaction| {
                update_in(tx, movement_id, update).map(|m| vec![m])
            }))
            .await?;
        Self::single(written)
    }

    async fn delete_movement(&self, movement_id: i32) -> Result<()> {
        self.repository
            .run_ledger_job(Box::new(move |tx: &mut dyn LedgerTransaction| {
                delete_in(tx, movement_id).map(|m| vec![m])
            }))
            .await?;
        Ok(())
    }

    fn get_movement(&self, movement_id: i32) -> Result<Movement> {
        self.repository
            .get_by_id(movement_id)?
            .ok_or_else(|| Error::NotFound(format!("Movement {}", movement_id)))
    }

    fn history(&self, filter: &MovementFilter) -> Result<Vec<Movement>> {
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            if start > end {
                return Err(Error::invalid_input("Start date must not be after end date"));
            }
        }
        self.repository.list(filter)
    }

    fn stock_positions(
        &self,
        sku: Option<&str>,
        warehouse_id: Option<i32>,
    ) -> Result<Vec<StockPosition>> {
        let filter = MovementFilter {
            sku: sku.map(str::to_string),
            warehouse_id,
            ..Default::default()
        };
        let mut by_pair: BTreeMap<(String, i32), Vec<Movement>> = BTreeMap::new();
        for movement in self.repository.list(&filter)? {
            by_pair
                .entry((movement.sku.clone(), movement.warehouse_id))
                .or_default()
                .push(movement);
        }
        if by_pair.is_empty() {
            return Ok(Vec::new());
        }

        let warehouses: HashMap<i32, _> = self
            .warehouse_repository
            .list(None)?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();
        let products: HashMap<String, String> = self
            .product_repository
            .list(None)?
            .into_iter()
            .map(|p| (p.sku, p.name))
            .collect();

        let mut positions = Vec::with_capacity(by_pair.len());
        for ((sku, warehouse_id), history) in by_pair {
            let Some(warehouse) = warehouses.get(&warehouse_id) else {
                debug!("Skipping movements of unknown warehouse {}", warehouse_id);
                continue;
            };
            positions.push(StockPosition {
                product_name: products.get(&sku).cloned().unwrap_or_default(),
                quantity: compute_balance(&history),
                sku,
                warehouse_id,
                warehouse_name: warehouse.name.clone(),
                warehouse_kind: warehouse.kind,
            });
        }
        Ok(positions)
    }

    fn transferable_positions(&self, origin_id: i32) -> Result<Vec<StockPosition>> {
        if self.warehouse_repository.get_by_id(origin_id)?.is_none() {
            return Err(Error::NotFound(format!("Warehouse {}", origin_id)));
        }
        Ok(self
            .stock_positions(None, Some(origin_id))?
            .into_iter()
            .filter(|p| p.quantity > 0)
            .collect())
    }
}
