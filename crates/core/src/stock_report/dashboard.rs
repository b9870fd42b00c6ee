use std::collections::{BTreeMap, BTreeSet};

use super::stock_report_model::{
    Dashboard, DashboardFilter, DashboardMetrics, IntegratedStockRow, LocationTotal,
    SkuLocationTotal, StockReport,
};
use crate::movements::StockPosition;
use crate::utils::format_quantity;
use crate::warehouses::WarehouseKind;

/// Merges external reports with internal stock.
///
/// Only own warehouses with stock on hand contribute internal rows;
/// temporary locations are tracked in the ledger but not shown here.
pub fn integrate(reports: &[StockReport], positions: &[StockPosition]) -> Vec<IntegratedStockRow> {
    let external = reports.iter().flat_map(|report| {
        report.rows.iter().map(move |row| IntegratedStockRow {
            sku: row.sku.clone(),
            product: row.name.clone(),
            location: report.label.clone(),
            quantity: row.quantity,
        })
    });
    let internal = positions
        .iter()
        .filter(|p| p.warehouse_kind == WarehouseKind::Own && p.quantity > 0)
        .map(|p| IntegratedStockRow {
            sku: p.sku.clone(),
            product: p.product_name.clone(),
            location: p.warehouse_name.clone(),
            quantity: p.quantity,
        });
    external.chain(internal).collect()
}

pub fn build_dashboard(rows: &[IntegratedStockRow], filter: &DashboardFilter) -> Dashboard {
    let available_locations: Vec<String> = rows
        .iter()
        .map(|r| r.location.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let available_skus: Vec<String> = rows
        .iter()
        .map(|r| r.sku.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let selected: Vec<&IntegratedStockRow> = rows
        .iter()
        .filter(|r| filter.locations.is_empty() || filter.locations.contains(&r.location))
        .filter(|r| filter.skus.is_empty() || filter.skus.contains(&r.sku))
        .collect();

    let mut by_pair: BTreeMap<(&str, &str), (&str, i64)> = BTreeMap::new();
    let mut by_location: BTreeMap<&str, i64> = BTreeMap::new();
    let mut skus = BTreeSet::new();
    let mut total_units = 0i64;
    for row in &selected {
        let entry = by_pair
            .entry((row.sku.as_str(), row.location.as_str()))
            .or_insert((row.product.as_str(), 0));
        if entry.0.is_empty() {
            entry.0 = row.product.as_str();
        }
        entry.1 += row.quantity;
        *by_location.entry(row.location.as_str()).or_insert(0) += row.quantity;
        skus.insert(row.sku.as_str());
        total_units += row.quantity;
    }

    let mut totals: Vec<SkuLocationTotal> = by_pair
        .into_iter()
        .map(|((sku, location), (product, quantity))| SkuLocationTotal {
            sku: sku.to_string(),
            product: product.to_string(),
            location: location.to_string(),
            quantity,
        })
        .collect();
    // Stable sort keeps (sku, location) order among equal quantities.
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    let mut distribution: Vec<LocationTotal> = by_location
        .iter()
        .map(|(location, quantity)| LocationTotal {
            location: location.to_string(),
            quantity: *quantity,
        })
        .collect();
    distribution.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    Dashboard {
        metrics: DashboardMetrics {
            locations: by_location.len(),
            unique_skus: skus.len(),
            total_units,
            total_units_display: format_quantity(total_units),
        },
        totals,
        distribution,
        available_locations,
        available_skus,
    }
}
