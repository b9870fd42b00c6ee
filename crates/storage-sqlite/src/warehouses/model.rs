//! Database models for warehouses.

use diesel::prelude::*;
use stockledger_core::warehouses::{NewWarehouse, Warehouse};
use stockledger_core::Error;

#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::warehouse)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct WarehouseDB {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub notes: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::warehouse)]
pub struct NewWarehouseDB {
    pub name: String,
    pub kind: String,
    pub notes: Option<String>,
}

impl TryFrom<WarehouseDB> for Warehouse {
    type Error = Error;

    fn try_from(db: WarehouseDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            kind: db.kind.parse()?,
            notes: db.notes,
        })
    }
}

impl From<Warehouse> for WarehouseDB {
    fn from(domain: Warehouse) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            kind: domain.kind.as_str().to_string(),
            notes: domain.notes,
        }
    }
}

impl From<NewWarehouse> for NewWarehouseDB {
    fn from(domain: NewWarehouse) -> Self {
        Self {
            name: domain.name,
            kind: domain.kind.as_str().to_string(),
            notes: domain.notes,
        }
    }
}
