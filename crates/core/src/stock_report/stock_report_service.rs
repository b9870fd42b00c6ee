use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::dashboard::{build_dashboard, integrate};
use super::stock_report_model::{
    Dashboard, DashboardFilter, IntegratedStockRow, StockReport, StockReportRow,
};
use crate::constants::LEDGER_REPORT_LABEL;
use crate::movements::MovementServiceTrait;
use crate::sources::{collect_reports, StockSourceTrait};
use crate::warehouses::WarehouseKind;
use crate::Result;

#[async_trait]
pub trait StockReportServiceTrait: Send + Sync {
    /// Current reports from every configured source.
    async fn source_reports(&self) -> Vec<StockReport>;

    /// Report of a single source by label.
    async fn source_report(&self, label: &str) -> Option<StockReport>;

    /// Own-warehouse ledger stock summed per SKU, shaped like a source report.
    fn ledger_report(&self) -> Result<StockReport>;

    async fn integrated_stock(&self) -> Result<Vec<IntegratedStockRow>>;

    async fn dashboard(&self, filter: &DashboardFilter) -> Result<Dashboard>;
}

pub struct StockReportService {
    sources: Vec<Arc<dyn StockSourceTrait>>,
    movement_service: Arc<dyn MovementServiceTrait>,
}

impl StockReportService {
    pub fn new(
        sources: Vec<Arc<dyn StockSourceTrait>>,
        movement_service: Arc<dyn MovementServiceTrait>,
    ) -> Self {
        Self {
            sources,
            movement_service,
        }
    }
}

#[async_trait]
impl StockReportServiceTrait for StockReportService {
    async fn source_reports(&self) -> Vec<StockReport> {
        collect_reports(&self.sources).await
    }

    async fn source_report(&self, label: &str) -> Option<StockReport> {
        let source = self
            .sources
            .iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))?;
        collect_reports(std::slice::from_ref(source)).await.pop()
    }

    fn ledger_report(&self) -> Result<StockReport> {
        let mut totals: BTreeMap<String, StockReportRow> = BTreeMap::new();
        for position in self.movement_service.stock_positions(None, None)? {
            if position.warehouse_kind != WarehouseKind::Own {
                continue;
            }
            totals
                .entry(position.sku.clone())
                .or_insert_with(|| StockReportRow {
                    sku: position.sku.clone(),
                    name: position.product_name.clone(),
                    quantity: 0,
                })
                .quantity += position.quantity;
        }
        Ok(StockReport {
            label: LEDGER_REPORT_LABEL.to_string(),
            rows: totals.into_values().collect(),
        })
    }

    async fn integrated_stock(&self) -> Result<Vec<IntegratedStockRow>> {
        let reports = self.source_reports().await;
        let positions = self.movement_service.stock_positions(None, None)?;
        Ok(integrate(&reports, &positions))
    }

    async fn dashboard(&self, filter: &DashboardFilter) -> Result<Dashboard> {
        let rows = self.integrated_stock().await?;
        Ok(build_dashboard(&rows, filter))
    }
}
