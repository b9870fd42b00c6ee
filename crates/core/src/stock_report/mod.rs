//! Stock reports - tabular extracts from external channels and the
//! integrated dashboard view built on top of them.

mod csv_parser;
mod dashboard;
mod stock_report_model;
mod stock_report_service;

pub use csv_parser::{parse_mapping_csv, parse_stock_report};
pub use dashboard::{build_dashboard, integrate};
pub use stock_report_model::{
    Dashboard, DashboardFilter, DashboardMetrics, IntegratedStockRow, LocationTotal,
    SkuLocationTotal, StockReport, StockReportRow,
};
pub use stock_report_service::{StockReportService, StockReportServiceTrait};
