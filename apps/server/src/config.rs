use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use stockledger_core::sources::SourceConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `text` or `json`.
    pub log_format: String,
    /// JSON file listing the external stock sources.
    pub sources_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("SL_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid SL_LISTEN_ADDR")?;
        let db_path = std::env::var("SL_DB_PATH").unwrap_or_else(|_| "./db/stock.db".into());
        let cors_allow = std::env::var("SL_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("SL_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let log_format = std::env::var("SL_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        let sources_file = std::env::var("SL_SOURCES_FILE")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
            sources_file,
        })
    }

    /// Reads the configured stock sources; none when no file is set.
    pub fn load_sources(&self) -> anyhow::Result<Vec<SourceConfig>> {
        let Some(path) = &self.sources_file else {
            return Ok(Vec::new());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sources file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid sources file {}", path.display()))
    }
}
