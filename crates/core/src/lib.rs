//! Stock Ledger Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules of the stock ledger.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod movements;
pub mod products;
pub mod reconciliation;
pub mod sources;
pub mod stock_report;
pub mod utils;
pub mod warehouses;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
