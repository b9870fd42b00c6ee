use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;

use stockledger_core::movements::{LedgerTransaction, Movement, NewMovement};
use stockledger_core::Result;

use super::model::{into_domain, MovementDB, NewMovementDB};
use crate::errors::IntoCore;
use crate::schema::{movement, product, warehouse};

/// Ledger unit of work over the writer's connection.
///
/// Only constructed inside a writer job, so every call shares the job's
/// IMMEDIATE transaction.
pub struct SqliteLedgerTx<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteLedgerTx<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl LedgerTransaction for SqliteLedgerTx<'_> {
    fn product_exists(&mut self, sku: &str) -> Result<bool> {
        diesel::select(diesel::dsl::exists(product::table.find(sku)))
            .get_result(self.conn)
            .into_core()
    }

    fn warehouse_exists(&mut self, warehouse_id: i32) -> Result<bool> {
        diesel::select(diesel::dsl::exists(warehouse::table.find(warehouse_id)))
            .get_result(self.conn)
            .into_core()
    }

    fn pair_history(&mut self, sku: &str, warehouse_id: i32) -> Result<Vec<Movement>> {
        let rows = movement::table
            .filter(movement::sku.eq(sku))
            .filter(movement::warehouse_id.eq(warehouse_id))
            .order((movement::timestamp.asc(), movement::id.asc()))
            .select(MovementDB::as_select())
            .load(self.conn)
            .into_core()?;
        into_domain(rows)
    }

    fn get_movement(&mut self, movement_id: i32) -> Result<Option<Movement>> {
        movement::table
            .find(movement_id)
            .select(MovementDB::as_select())
            .first(self.conn)
            .optional()
            .into_core()?
            .map(Movement::try_from)
            .transpose()
    }

    fn insert_movement(
        &mut self,
        new_movement: &NewMovement,
        timestamp: NaiveDateTime,
    ) -> Result<Movement> {
        diesel::insert_into(movement::table)
            .values(NewMovementDB::new(new_movement, timestamp))
            .returning(MovementDB::as_returning())
            .get_result(self.conn)
            .into_core()
            .and_then(Movement::try_from)
    }

    fn update_movement(
        &mut self,
        movement_id: i32,
        quantity: i64,
        note: Option<String>,
    ) -> Result<Movement> {
        diesel::update(movement::table.find(movement_id))
            .set((movement::quantity.eq(quantity), movement::note.eq(note)))
            .returning(MovementDB::as_returning())
            .get_result(self.conn)
            .into_core()
            .and_then(Movement::try_from)
    }

    fn delete_movement(&mut self, movement_id: i32) -> Result<usize> {
        diesel::delete(movement::table.find(movement_id))
            .execute(self.conn)
            .into_core()
    }

    fn set_cached_balance(&mut self, movement_id: i32, balance: i64) -> Result<()> {
        diesel::update(movement::table.find(movement_id))
            .set(movement::balance.eq(balance))
            .execute(self.conn)
            .into_core()?;
        Ok(())
    }
}
