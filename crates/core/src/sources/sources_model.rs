use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Http,
}

/// Declarative description of a stock source.
///
/// `location` is a file path for CSV sources and a URL for HTTP sources.
/// The bearer token is read from the environment variable named by
/// `token_env` so secrets stay out of the sources file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    pub label: String,
    pub kind: SourceKind,
    pub location: String,
    pub token_env: Option<String>,
    pub timeout_secs: Option<u64>,
}
