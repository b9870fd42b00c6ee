use async_trait::async_trait;

use super::ledger::LedgerJob;
use super::movements_model::{
    Movement, MovementFilter, MovementUpdate, NewMovement, StockPosition, TransferRequest,
    TransferResult,
};
use crate::errors::Result;

/// Contract for movement persistence.
#[async_trait]
pub trait MovementRepositoryTrait: Send + Sync {
    /// Runs a ledger job inside a single write transaction. An error from
    /// the job rolls back everything it wrote.
    async fn run_ledger_job(&self, job: LedgerJob) -> Result<Vec<Movement>>;

    fn get_by_id(&self, movement_id: i32) -> Result<Option<Movement>>;

    fn pair_history(&self, sku: &str, warehouse_id: i32) -> Result<Vec<Movement>>;

    /// Movements matching the filter, newest first.
    fn list(&self, filter: &MovementFilter) -> Result<Vec<Movement>>;
}

#[async_trait]
pub trait MovementServiceTrait: Send + Sync {
    fn balance(&self, sku: &str, warehouse_id: i32) -> Result<i64>;
    async fn record(&self, new_movement: NewMovement) -> Result<Movement>;
    async fn transfer(&self, request: TransferRequest) -> Result<TransferResult>;
    async fn update_movement(&self, movement_id: i32, update: MovementUpdate)
        -> Result<Movement>;
    async fn delete_movement(&self, movement_id: i32) -> Result<()>;
    fn get_movement(&self, movement_id: i32) -> Result<Movement>;
    fn history(&self, filter: &MovementFilter) -> Result<Vec<Movement>>;
    fn stock_positions(
        &self,
        sku: Option<&str>,
        warehouse_id: Option<i32>,
    ) -> Result<Vec<StockPosition>>;
    fn transferable_positions(&self, origin_id: i32) -> Result<Vec<StockPosition>>;
}
