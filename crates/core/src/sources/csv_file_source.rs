use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;

use super::sources_traits::StockSourceTrait;
use crate::stock_report::{parse_stock_report, StockReport};
use crate::{Error, Result};

/// Stock extract written to disk by a scraper or exported from a
/// marketplace back office.
pub struct CsvFileSource {
    label: String,
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl StockSourceTrait for CsvFileSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_report(&self) -> Result<StockReport> {
        debug!("Reading stock extract {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::source_failure(&self.label, e))?;
        parse_stock_report(&self.label, &content)
    }
}
