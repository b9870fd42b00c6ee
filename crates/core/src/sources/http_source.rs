use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use super::sources_model::SourceConfig;
use super::sources_traits::StockSourceTrait;
use crate::constants::DEFAULT_SOURCE_TIMEOUT_SECS;
use crate::stock_report::{parse_stock_report, StockReport, StockReportRow};
use crate::{Error, Result};

/// Marketplace stock endpoint.
///
/// Accepts either a JSON array of `{sku, name, quantity}` objects or a
/// CSV body (`Content-Type: text/csv`).
pub struct HttpReportSource {
    label: String,
    url: String,
    token: Option<String>,
    client: Client,
}

impl HttpReportSource {
    pub fn new(
        label: impl Into<String>,
        url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let label = label.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::source_failure(&label, e))?;
        Ok(Self {
            label,
            url: url.into(),
            token,
            client,
        })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let token = config
            .token_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|t| !t.is_empty());
        let timeout =
            Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_SOURCE_TIMEOUT_SECS));
        Self::new(&config.label, &config.location, token, timeout)
    }
}

#[async_trait]
impl StockSourceTrait for HttpReportSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_report(&self) -> Result<StockReport> {
        debug!("Fetching stock report '{}' from {}", self.label, self.url);
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::source_failure(&self.label, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::source_failure(
                &self.label,
                format!("HTTP {}", status),
            ));
        }

        let is_csv = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/csv"));
        if is_csv {
            let body = response
                .text()
                .await
                .map_err(|e| Error::source_failure(&self.label, e))?;
            return parse_stock_report(&self.label, &body);
        }

        let rows: Vec<StockReportRow> = response
            .json()
            .await
            .map_err(|e| Error::source_failure(&self.label, e))?;
        Ok(StockReport {
            label: self.label.clone(),
            rows,
        })
    }
}
