//! Movements module - the stock ledger.
//!
//! Movements are the only source of truth for stock: the balance of a
//! SKU in a warehouse is always recomputed from its movement history.

mod balance_calculator;
mod ledger;
mod movements_model;
mod movements_service;
mod movements_traits;


pub use balance_calculator::{check_movement, compute_balance};
pub use ledger::{delete_in, record_in, transfer_in, update_in, LedgerJob, LedgerTransaction};
pub use movements_model::{
    Movement, MovementFilter, MovementKind, MovementUpdate, NewMovement, StockPosition,
    TransferRequest, TransferResult,
};
pub use movements_service::MovementService;
pub use movements_traits::{MovementRepositoryTrait, MovementServiceTrait};
