//! Product domain models.

use serde::{Deserialize, Serialize};

use crate::constants::{PRODUCT_DESCRIPTION_MAX_LEN, PRODUCT_NAME_MAX_LEN, SKU_MAX_LEN};
use crate::{Error, Result};

/// Domain model representing a product, keyed by its SKU.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
}

/// Input model for registering a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
}

impl NewProduct {
    /// Validates the new product data and trims surrounding whitespace.
    pub fn normalized(self) -> Result<Self> {
        let sku = self.sku.trim().to_string();
        let name = self.name.trim().to_string();
        if sku.is_empty() {
            return Err(Error::invalid_input("SKU cannot be empty"));
        }
        if sku.chars().count() > SKU_MAX_LEN {
            return Err(Error::invalid_input(format!(
                "SKU cannot exceed {} characters",
                SKU_MAX_LEN
            )));
        }
        validate_name(&name)?;
        validate_description(self.description.as_deref())?;
        Ok(Self {
            sku,
            name,
            description: self.description,
        })
    }
}

/// Partial update of a product. `None` leaves the field untouched;
/// `Some("")` clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProductUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name.trim())?;
        }
        validate_description(self.description.as_deref())
    }

    /// Applies the update on top of an existing product.
    pub fn apply_to(&self, product: &Product) -> Product {
        let mut updated = product.clone();
        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            updated.description = if description.is_empty() {
                None
            } else {
                Some(description.clone())
            };
        }
        updated
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_input("Product name cannot be empty"));
    }
    if name.chars().count() > PRODUCT_NAME_MAX_LEN {
        return Err(Error::invalid_input(format!(
            "Product name cannot exceed {} characters",
            PRODUCT_NAME_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<()> {
    match description {
        Some(d) if d.chars().count() > PRODUCT_DESCRIPTION_MAX_LEN => Err(Error::invalid_input(
            format!(
                "Product description cannot exceed {} characters",
                PRODUCT_DESCRIPTION_MAX_LEN
            ),
        )),
        _ => Ok(()),
    }
}
