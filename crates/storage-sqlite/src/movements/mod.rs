//! SQLite storage implementation for ledger movements.

mod ledger_tx;
mod model;
mod repository;

pub use ledger_tx::SqliteLedgerTx;
pub use model::{MovementDB, NewMovementDB};
pub use repository::MovementRepository;
