use async_trait::async_trait;
use log::{debug, info};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use super::reconciliation_model::{normalize_sku, ImportSummary, ReconciliationRow, SkuMapping};
use super::reconciliation_traits::{MappingRepositoryTrait, ReconciliationServiceTrait};
use crate::errors::{Error, Result};
use crate::stock_report::{parse_mapping_csv, StockReport};
use crate::utils::time_utils::ledger_now;

pub struct ReconciliationService {
    repository: Arc<dyn MappingRepositoryTrait>,
}

impl ReconciliationService {
    pub fn new(repository: Arc<dyn MappingRepositoryTrait>) -> Self {
        Self { repository }
    }
}

/// Sums quantities per SKU; extracts may list a SKU more than once.
fn totals_by_sku(report: &StockReport) -> BTreeMap<&str, (&str, i64)> {
    let mut totals: BTreeMap<&str, (&str, i64)> = BTreeMap::new();
    for row in &report.rows {
        let entry = totals
            .entry(row.sku.as_str())
            .or_insert((row.name.as_str(), 0));
        entry.1 += row.quantity;
    }
    totals
}

#[async_trait]
impl ReconciliationServiceTrait for ReconciliationService {
    async fn save_mapping(
        &self,
        internal_sku: &str,
        external_sku: &str,
    ) -> Result<Option<SkuMapping>> {
        let internal_sku = normalize_sku(internal_sku, "Internal SKU")?;
        if internal_sku.is_empty() {
            return Err(Error::invalid_input("Internal SKU cannot be empty"));
        }
        let external_sku = normalize_sku(external_sku, "External SKU")?;

        if external_sku.is_empty() {
            let removed = self.repository.delete(&internal_sku).await?;
            if removed > 0 {
                debug!("Removed mapping of '{}'", internal_sku);
            }
            return Ok(None);
        }

        if let Some(existing) = self.repository.get(&internal_sku)? {
            if existing.external_sku == external_sku {
                return Ok(Some(existing));
            }
        }
        if let Some(owner) = self.repository.find_by_external(&external_sku)? {
            return Err(Error::Conflict(format!(
                "External SKU '{}' is already mapped to '{}'",
                external_sku, owner.internal_sku
            )));
        }

        let saved = self
            .repository
            .upsert(SkuMapping {
                internal_sku,
                external_sku,
                updated_at: ledger_now(),
            })
            .await?;
        debug!(
            "Mapped '{}' to external '{}'",
            saved.internal_sku, saved.external_sku
        );
        Ok(Some(saved))
    }

    fn list_mappings(&self) -> Result<Vec<SkuMapping>> {
        self.repository.list()
    }

    fn selectable_external_skus(
        &self,
        internal_sku: &str,
        candidates: &[String],
    ) -> Result<Vec<String>> {
        let internal_sku = internal_sku.trim();
        let taken: HashSet<String> = self
            .repository
            .list()?
            .into_iter()
            .filter(|m| m.internal_sku != internal_sku)
            .map(|m| m.external_sku)
            .collect();
        let mut seen = HashSet::new();
        Ok(candidates
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty() && !taken.contains(*c) && seen.insert(*c))
            .map(str::to_string)
            .collect())
    }

    async fn import_mappings(&self, csv: &str) -> Result<ImportSummary> {
        let pairs = parse_mapping_csv(csv)?;
        let mut summary = ImportSummary::default();
        for (internal_sku, external_sku) in pairs {
            match self.save_mapping(&internal_sku, &external_sku).await? {
                Some(_) => summary.saved += 1,
                None => summary.removed += 1,
            }
        }
        info!(
            "Imported mappings: {} saved, {} removed",
            summary.saved, summary.removed
        );
        Ok(summary)
    }

    fn reconcile(
        &self,
        internal_report: &StockReport,
        external_report: &StockReport,
    ) -> Result<Vec<ReconciliationRow>> {
        let mappings: HashMap<String, String> = self
            .repository
            .list()?
            .into_iter()
            .map(|m| (m.internal_sku, m.external_sku))
            .collect();
        let external = totals_by_sku(external_report);

        Ok(totals_by_sku(internal_report)
            .into_iter()
            .map(|(sku, (name, internal_quantity))| {
                let external_sku = mappings.get(sku).cloned();
                let external_quantity = external_sku
                    .as_deref()
                    .and_then(|ext| external.get(ext))
                    .map(|(_, qty)| *qty);
                ReconciliationRow {
                    internal_sku: sku.to_string(),
                    name: name.to_string(),
                    internal_quantity,
                    external_sku,
                    external_quantity,
                    difference: external_quantity.map(|ext| internal_quantity - ext),
                }
            })
            .collect())
    }
}
