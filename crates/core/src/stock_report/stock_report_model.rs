use serde::{Deserialize, Serialize};

/// One line of an external stock extract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockReportRow {
    pub sku: String,
    #[serde(default)]
    pub name: String,
    pub quantity: i64,
}

/// A labelled extract, e.g. one marketplace or the ERP scraper output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub label: String,
    pub rows: Vec<StockReportRow>,
}

impl StockReport {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            rows: Vec::new(),
        }
    }
}

/// Row of the integrated view. `location` is a warehouse name for
/// internal stock or a source label for external stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntegratedStockRow {
    pub sku: String,
    pub product: String,
    pub location: String,
    pub quantity: i64,
}

/// Empty lists mean "no restriction".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFilter {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub skus: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub locations: usize,
    pub unique_skus: usize,
    pub total_units: i64,
    /// `total_units` with `.` as thousands separator.
    pub total_units_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkuLocationTotal {
    pub sku: String,
    pub product: String,
    pub location: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationTotal {
    pub location: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    /// Totals per SKU and location, largest first.
    pub totals: Vec<SkuLocationTotal>,
    pub distribution: Vec<LocationTotal>,
    /// Every location present before filtering, for building selectors.
    pub available_locations: Vec<String>,
    pub available_skus: Vec<String>,
}
