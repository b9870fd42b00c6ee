//! Warehouse domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{WAREHOUSE_NAME_MAX_LEN, WAREHOUSE_NOTES_MAX_LEN};
use crate::{Error, Result};

/// Whether stock in a warehouse belongs to the business or is held
/// somewhere temporarily. Only own warehouses count towards the
/// integrated stock view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarehouseKind {
    #[default]
    Own,
    Temporary,
}

impl WarehouseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseKind::Own => "OWN",
            WarehouseKind::Temporary => "TEMPORARY",
        }
    }
}

impl fmt::Display for WarehouseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarehouseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OWN" => Ok(WarehouseKind::Own),
            "TEMPORARY" => Ok(WarehouseKind::Temporary),
            other => Err(Error::invalid_input(format!(
                "Unknown warehouse kind '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i32,
    pub name: String,
    pub kind: WarehouseKind,
    pub notes: Option<String>,
}

/// Input model for creating a warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWarehouse {
    pub name: String,
    #[serde(default)]
    pub kind: WarehouseKind,
    pub notes: Option<String>,
}

impl NewWarehouse {
    pub fn normalized(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        validate_name(&name)?;
        validate_notes(self.notes.as_deref())?;
        Ok(Self { name, ..self })
    }
}

/// Partial update of a warehouse. `Some("")` clears the notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseUpdate {
    pub name: Option<String>,
    pub kind: Option<WarehouseKind>,
    pub notes: Option<String>,
}

impl WarehouseUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name.trim())?;
        }
        validate_notes(self.notes.as_deref())
    }

    pub fn apply_to(&self, warehouse: &Warehouse) -> Warehouse {
        let mut updated = warehouse.clone();
        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(kind) = self.kind {
            updated.kind = kind;
        }
        if let Some(notes) = &self.notes {
            updated.notes = if notes.is_empty() {
                None
            } else {
                Some(notes.clone())
            };
        }
        updated
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_input("Warehouse name cannot be empty"));
    }
    if name.chars().count() > WAREHOUSE_NAME_MAX_LEN {
        return Err(Error::invalid_input(format!(
            "Warehouse name cannot exceed {} characters",
            WAREHOUSE_NAME_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_notes(notes: Option<&str>) -> Result<()> {
    match notes {
        Some(n) if n.chars().count() > WAREHOUSE_NOTES_MAX_LEN => Err(Error::invalid_input(
            format!(
                "Warehouse notes cannot exceed {} characters",
                WAREHOUSE_NOTES_MAX_LEN
            ),
        )),
        _ => Ok(()),
    }
}
