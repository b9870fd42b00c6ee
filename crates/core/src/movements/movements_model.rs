//! Movement domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::MOVEMENT_NOTE_MAX_LEN;
use crate::warehouses::WarehouseKind;
use crate::{Error, Result};

/// Kind of a ledger movement.
///
/// A `BalanceSnapshot` records a full stock count: it replaces whatever
/// balance the earlier history produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Entry,
    Exit,
    BalanceSnapshot,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "ENTRY",
            MovementKind::Exit => "EXIT",
            MovementKind::BalanceSnapshot => "BALANCE_SNAPSHOT",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENTRY" => Ok(MovementKind::Entry),
            "EXIT" => Ok(MovementKind::Exit),
            "BALANCE_SNAPSHOT" => Ok(MovementKind::BalanceSnapshot),
            other => Err(Error::invalid_input(format!(
                "Unknown movement kind '{}'",
                other
            ))),
        }
    }
}

/// A persisted ledger row.
///
/// `balance` is the pair's balance right after this movement was written
/// or last edited. It is informational; reads always recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: i32,
    pub sku: String,
    pub warehouse_id: i32,
    pub quantity: i64,
    pub kind: MovementKind,
    pub timestamp: NaiveDateTime,
    pub note: Option<String>,
    pub balance: i64,
}

/// Input model for recording a movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    pub sku: String,
    pub warehouse_id: i32,
    pub quantity: i64,
    pub kind: MovementKind,
    pub note: Option<String>,
}

impl NewMovement {
    pub fn normalized(self) -> Result<Self> {
        let sku = self.sku.trim().to_string();
        if sku.is_empty() {
            return Err(Error::invalid_input("SKU cannot be empty"));
        }
        validate_quantity(self.kind, self.quantity)?;
        let note = normalize_note(self.note)?;
        Ok(Self { sku, note, ..self })
    }
}

/// Edit of an existing movement. Kind, SKU and warehouse are fixed once
/// recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementUpdate {
    pub quantity: i64,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    pub sku: Option<String>,
    pub warehouse_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub sku: String,
    pub origin_id: i32,
    pub destination_id: i32,
    pub quantity: i64,
    pub note: Option<String>,
}

/// The two legs written by a transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub exit: Movement,
    pub entry: Movement,
}

/// Current balance of a SKU in a warehouse that has movement history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockPosition {
    pub sku: String,
    pub product_name: String,
    pub warehouse_id: i32,
    pub warehouse_name: String,
    pub warehouse_kind: WarehouseKind,
    pub quantity: i64,
}

/// ENTRY and EXIT must move something; a snapshot may count zero.
pub(crate) fn validate_quantity(kind: MovementKind, quantity: i64) -> Result<()> {
    match kind {
        MovementKind::Entry | MovementKind::Exit if quantity <= 0 => Err(Error::invalid_input(
            format!("{} quantity must be positive", kind),
        )),
        MovementKind::BalanceSnapshot if quantity < 0 => Err(Error::invalid_input(
            "Balance snapshot quantity cannot be negative",
        )),
        _ => Ok(()),
    }
}

pub(crate) fn normalize_note(note: Option<String>) -> Result<Option<String>> {
    let note = note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    if let Some(n) = &note {
        if n.chars().count() > MOVEMENT_NOTE_MAX_LEN {
            return Err(Error::invalid_input(format!(
                "Note cannot exceed {} characters",
                MOVEMENT_NOTE_MAX_LEN
            )));
        }
    }
    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&MovementKind::BalanceSnapshot).unwrap(),
            "\"BALANCE_SNAPSHOT\""
        );
        assert_eq!(
            "exit".parse::<MovementKind>().unwrap(),
            MovementKind::Exit
        );
        assert!("TRANSFER".parse::<MovementKind>().is_err());
    }

    #[test]
    fn test_quantity_rules() {
        assert!(validate_quantity(MovementKind::Entry, 0).is_err());
        assert!(validate_quantity(MovementKind::Exit, -1).is_err());
        assert!(validate_quantity(MovementKind::Exit, 1).is_ok());
        assert!(validate_quantity(MovementKind::BalanceSnapshot, 0).is_ok());
        assert!(validate_quantity(MovementKind::BalanceSnapshot, -5).is_err());
    }

    #[test]
    fn test_blank_note_becomes_none() {
        assert_eq!(normalize_note(Some("   ".into())).unwrap(), None);
        assert_eq!(
            normalize_note(Some(" NF 123 ".into())).unwrap().as_deref(),
            Some("NF 123")
        );
        assert!(normalize_note(Some("x".repeat(MOVEMENT_NOTE_MAX_LEN + 1))).is_err());
    }
}
