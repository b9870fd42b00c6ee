//! Database models for movements.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use stockledger_core::movements::{Movement, NewMovement};
use stockledger_core::Error;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::movement)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MovementDB {
    pub id: i32,
    pub sku: String,
    pub warehouse_id: i32,
    pub quantity: i64,
    pub kind: String,
    pub timestamp: NaiveDateTime,
    pub note: Option<String>,
    pub balance: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::movement)]
pub struct NewMovementDB {
    pub sku: String,
    pub warehouse_id: i32,
    pub quantity: i64,
    pub kind: String,
    pub timestamp: NaiveDateTime,
    pub note: Option<String>,
    pub balance: i64,
}

impl NewMovementDB {
    pub fn new(domain: &NewMovement, timestamp: NaiveDateTime) -> Self {
        Self {
            sku: domain.sku.clone(),
            warehouse_id: domain.warehouse_id,
            quantity: domain.quantity,
            kind: domain.kind.as_str().to_string(),
            timestamp,
            note: domain.note.clone(),
            balance: 0,
        }
    }
}

impl TryFrom<MovementDB> for Movement {
    type Error = Error;

    fn try_from(db: MovementDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            sku: db.sku,
            warehouse_id: db.warehouse_id,
            quantity: db.quantity,
            kind: db.kind.parse()?,
            timestamp: db.timestamp,
            note: db.note,
            balance: db.balance,
        })
    }
}

pub(crate) fn into_domain(rows: Vec<MovementDB>) -> stockledger_core::Result<Vec<Movement>> {
    rows.into_iter().map(Movement::try_from).collect()
}
