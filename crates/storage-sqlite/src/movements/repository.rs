use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use stockledger_core::movements::{
    LedgerJob, Movement, MovementFilter, MovementRepositoryTrait,
};
use stockledger_core::utils::time_utils::day_bounds;
use stockledger_core::Result;

use super::ledger_tx::SqliteLedgerTx;
use super::model::{into_domain, MovementDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::movement;

pub struct MovementRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MovementRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MovementRepository { pool, writer }
    }
}

#[async_trait]
impl MovementRepositoryTrait for MovementRepository {
    async fn run_ledger_job(&self, job: LedgerJob) -> Result<Vec<Movement>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Movement>> {
                let mut tx = SqliteLedgerTx::new(conn);
                job(&mut tx)
            })
            .await
    }

    fn get_by_id(&self, movement_id: i32) -> Result<Option<Movement>> {
        let mut conn = get_connection(&self.pool)?;
        movement::table
            .find(movement_id)
            .select(MovementDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Movement::try_from)
            .transpose()
    }

    fn pair_history(&self, sku: &str, warehouse_id: i32) -> Result<Vec<Movement>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = movement::table
            .filter(movement::sku.eq(sku))
            .filter(movement::warehouse_id.eq(warehouse_id))
            .order((movement::timestamp.asc(), movement::id.asc()))
            .select(MovementDB::as_select())
            .load(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    fn list(&self, filter: &MovementFilter) -> Result<Vec<Movement>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = movement::table
            .select(MovementDB::as_select())
            .order((movement::timestamp.desc(), movement::id.desc()))
            .into_boxed();

        if let Some(sku) = filter.sku.as_deref() {
            query = query.filter(movement::sku.eq(sku.to_string()));
        }
        if let Some(warehouse_id) = filter.warehouse_id {
            query = query.filter(movement::warehouse_id.eq(warehouse_id));
        }
        let (from, to) = day_bounds(filter.start_date, filter.end_date);
        if let Some(from) = from {
            query = query.filter(movement::timestamp.ge(from));
        }
        if let Some(to) = to {
            query = query.filter(movement::timestamp.le(to));
        }

        into_domain(query.load(&mut conn).into_core()?)
    }
}
