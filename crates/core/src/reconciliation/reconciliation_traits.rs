use async_trait::async_trait;

use super::reconciliation_model::{ImportSummary, ReconciliationRow, SkuMapping};
use crate::errors::Result;
use crate::stock_report::StockReport;

/// Contract for mapping persistence.
#[async_trait]
pub trait MappingRepositoryTrait: Send + Sync {
    /// Mappings ordered by internal SKU.
    fn list(&self) -> Result<Vec<SkuMapping>>;

    fn get(&self, internal_sku: &str) -> Result<Option<SkuMapping>>;

    fn find_by_external(&self, external_sku: &str) -> Result<Option<SkuMapping>>;

    /// Inserts or replaces the mapping of `mapping.internal_sku`.
    ///
    /// Fails with `Error::Conflict` when the external SKU belongs to a
    /// different internal SKU. The check and the write share a transaction.
    async fn upsert(&self, mapping: SkuMapping) -> Result<SkuMapping>;

    async fn delete(&self, internal_sku: &str) -> Result<usize>;
}

#[async_trait]
pub trait ReconciliationServiceTrait: Send + Sync {
    /// Saves or, with an empty external SKU, removes the mapping of
    /// `internal_sku`. Returns the mapping in effect afterwards.
    async fn save_mapping(
        &self,
        internal_sku: &str,
        external_sku: &str,
    ) -> Result<Option<SkuMapping>>;

    fn list_mappings(&self) -> Result<Vec<SkuMapping>>;

    /// Candidates minus external SKUs already taken by other internal SKUs.
    fn selectable_external_skus(
        &self,
        internal_sku: &str,
        candidates: &[String],
    ) -> Result<Vec<String>>;

    async fn import_mappings(&self, csv: &str) -> Result<ImportSummary>;

    fn reconcile(
        &self,
        internal_report: &StockReport,
        external_report: &StockReport,
    ) -> Result<Vec<ReconciliationRow>>;
}
