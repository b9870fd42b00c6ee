use async_trait::async_trait;

use crate::stock_report::StockReport;
use crate::Result;

/// A channel that can report its current stock.
#[async_trait]
pub trait StockSourceTrait: Send + Sync {
    /// Display label, used as the location in the integrated view.
    fn label(&self) -> &str;

    async fn fetch_report(&self) -> Result<StockReport>;
}
