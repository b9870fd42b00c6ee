//! External stock sources: marketplace report endpoints and CSV extracts.

mod csv_file_source;
mod http_source;
mod sources_model;
mod sources_traits;

pub use csv_file_source::CsvFileSource;
pub use http_source::HttpReportSource;
pub use sources_model::{SourceConfig, SourceKind};
pub use sources_traits::StockSourceTrait;

use futures::future::join_all;
use log::warn;
use std::sync::Arc;

use crate::stock_report::StockReport;
use crate::Result;

/// Builds a source for every configured entry.
pub fn build_sources(configs: &[SourceConfig]) -> Result<Vec<Arc<dyn StockSourceTrait>>> {
    configs
        .iter()
        .map(|config| {
            let source: Arc<dyn StockSourceTrait> = match config.kind {
                SourceKind::Csv => Arc::new(CsvFileSource::new(&config.label, &config.location)),
                SourceKind::Http => Arc::new(HttpReportSource::from_config(config)?),
            };
            Ok(source)
        })
        .collect()
}

/// Fetches every source concurrently.
///
/// A failing source yields an empty report under its label so the
/// dashboard still renders the other channels.
pub async fn collect_reports(sources: &[Arc<dyn StockSourceTrait>]) -> Vec<StockReport> {
    let fetches = sources.iter().map(|source| async move {
        match source.fetch_report().await {
            Ok(report) => report,
            Err(e) => {
                warn!("Stock source '{}' unavailable: {}", source.label(), e);
                StockReport::empty(source.label())
            }
        }
    });
    join_all(fetches).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock_report::StockReportRow;
    use crate::Error;
    use async_trait::async_trait;

    struct FixedSource(&'static str, Option<i64>);

    #[async_trait]
    impl StockSourceTrait for FixedSource {
        fn label(&self) -> &str {
            self.0
        }

        async fn fetch_report(&self) -> Result<StockReport> {
            match self.1 {
                Some(quantity) => Ok(StockReport {
                    label: self.0.to_string(),
                    rows: vec![StockReportRow {
                        sku: "A".into(),
                        name: "Produto A".into(),
                        quantity,
                    }],
                }),
                None => Err(Error::source_failure(self.0, "connection refused")),
            }
        }
    }

    #[tokio::test]
    async fn test_failing_source_degrades_to_empty_report() {
        let sources: Vec<Arc<dyn StockSourceTrait>> = vec![
            Arc::new(FixedSource("Amazon", Some(4))),
            Arc::new(FixedSource("Mercado Livre", None)),
        ];
        let reports = collect_reports(&sources).await;
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].rows.len(), 1);
        assert_eq!(reports[1], StockReport::empty("Mercado Livre"));
    }

    #[test]
    fn test_build_sources_from_config() {
        let configs: Vec<SourceConfig> = serde_json::from_str(
            r#"[
                {"label": "ERP", "kind": "csv", "location": "/tmp/erp.csv"},
                {"label": "Amazon", "kind": "http", "location": "http://localhost:9/stock", "timeoutSecs": 5}
            ]"#,
        )
        .unwrap();
        let sources = build_sources(&configs).unwrap();
        let labels: Vec<&str> = sources.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["ERP", "Amazon"]);
    }
}
