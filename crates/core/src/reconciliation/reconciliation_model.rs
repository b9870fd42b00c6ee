use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::SKU_MAX_LEN;
use crate::{Error, Result};

/// Links an internal SKU to the SKU a marketplace uses for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkuMapping {
    pub internal_sku: String,
    pub external_sku: String,
    pub updated_at: NaiveDateTime,
}

/// One internal SKU compared against its marketplace counterpart.
///
/// External fields are `None` when the SKU is unmapped or the mapped SKU
/// is absent from the external report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationRow {
    pub internal_sku: String,
    pub name: String,
    pub internal_quantity: i64,
    pub external_sku: Option<String>,
    pub external_quantity: Option<i64>,
    /// `internal_quantity - external_quantity`
    pub difference: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub saved: usize,
    pub removed: usize,
}

pub(crate) fn normalize_sku(raw: &str, what: &str) -> Result<String> {
    let sku = raw.trim();
    if sku.chars().count() > SKU_MAX_LEN {
        return Err(Error::invalid_input(format!(
            "{} cannot exceed {} characters",
            what, SKU_MAX_LEN
        )));
    }
    Ok(sku.to_string())
}
