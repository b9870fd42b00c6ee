//! Reconciliation module - internal to marketplace SKU mapping.

mod reconciliation_model;
mod reconciliation_service;
mod reconciliation_traits;

#[cfg(test)]
mod reconciliation_service_tests;

pub use reconciliation_model::{ImportSummary, ReconciliationRow, SkuMapping};
pub use reconciliation_service::ReconciliationService;
pub use reconciliation_traits::{MappingRepositoryTrait, ReconciliationServiceTrait};
