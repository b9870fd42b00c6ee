use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use stockledger_core::warehouses::{NewWarehouse, Warehouse, WarehouseRepositoryTrait};
use stockledger_core::{Error, Result};

use super::model::{NewWarehouseDB, WarehouseDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{movement, warehouse};

pub struct WarehouseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WarehouseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WarehouseRepository { pool, writer }
    }
}

fn name_conflict(name: &str) -> impl FnOnce(diesel::result::Error) -> Error + '_ {
    move |e| match Error::from(StorageError::from(e)) {
        Error::Conflict(_) => Error::Conflict(format!("Warehouse '{}' already exists", name)),
        other => other,
    }
}

#[async_trait]
impl WarehouseRepositoryTrait for WarehouseRepository {
    async fn create(&self, new_warehouse: NewWarehouse) -> Result<Warehouse> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Warehouse> {
                let row: NewWarehouseDB = new_warehouse.into();
                let inserted = diesel::insert_into(warehouse::table)
                    .values(&row)
                    .returning(WarehouseDB::as_returning())
                    .get_result(conn)
                    .map_err(name_conflict(&row.name))?;
                Warehouse::try_from(inserted)
            })
            .await
    }

    async fn update(&self, updated: Warehouse) -> Result<Warehouse> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Warehouse> {
                let row: WarehouseDB = updated.into();
                let saved = diesel::update(warehouse::table.find(row.id))
                    .set(&row)
                    .returning(WarehouseDB::as_returning())
                    .get_result(conn)
                    .map_err(name_conflict(&row.name))?;
                Warehouse::try_from(saved)
            })
            .await
    }

    async fn delete(&self, warehouse_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let movements: i64 = movement::table
                    .filter(movement::warehouse_id.eq(warehouse_id))
                    .count()
                    .get_result(conn)
                    .into_core()?;
                if movements > 0 {
                    return Err(Error::Conflict(format!(
                        "Warehouse {} still has {} movement(s)",
                        warehouse_id, movements
                    )));
                }
                diesel::delete(warehouse::table.find(warehouse_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, warehouse_id: i32) -> Result<Option<Warehouse>> {
        let mut conn = get_connection(&self.pool)?;
        warehouse::table
            .find(warehouse_id)
            .select(WarehouseDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Warehouse::try_from)
            .transpose()
    }

    fn list(&self, filter: Option<&str>) -> Result<Vec<Warehouse>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = warehouse::table
            .select(WarehouseDB::as_select())
            .order(warehouse::name.asc())
            .into_boxed();
        if let Some(term) = filter {
            query = query.filter(warehouse::name.like(format!("%{}%", term)));
        }
        query
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Warehouse::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use stockledger_core::warehouses::WarehouseKind;

    fn new_warehouse(name: &str, kind: WarehouseKind) -> NewWarehouse {
        NewWarehouse {
            name: name.to_string(),
            kind,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_ordered_by_name() {
        let db = setup();
        let repo = WarehouseRepository::new(db.pool.clone(), db.writer.clone());
        repo.create(new_warehouse("Matriz", WarehouseKind::Own))
            .await
            .unwrap();
        let fair = repo
            .create(new_warehouse("Feira", WarehouseKind::Temporary))
            .await
            .unwrap();
        assert_eq!(fair.kind, WarehouseKind::Temporary);

        let names: Vec<String> = repo.list(None).unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["Feira", "Matriz"]);
        assert_eq!(repo.list(Some("mat")).unwrap().len(), 1);
        assert_eq!(repo.get_by_id(fair.id).unwrap(), Some(fair));
    }

    #[tokio::test]
    async fn test_duplicate_and_rename_conflicts() {
        let db = setup();
        let repo = WarehouseRepository::new(db.pool.clone(), db.writer.clone());
        repo.create(new_warehouse("Matriz", WarehouseKind::Own))
            .await
            .unwrap();
        let branch = repo
            .create(new_warehouse("Filial", WarehouseKind::Own))
            .await
            .unwrap();

        assert!(matches!(
            repo.create(new_warehouse("Matriz", WarehouseKind::Own)).await,
            Err(Error::Conflict(_))
        ));
        assert!(matches!(
            repo.update(Warehouse {
                name: "Matriz".into(),
                ..branch
            })
            .await,
            Err(Error::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_refused_while_movements_exist() {
        let db = setup();
        let repo = WarehouseRepository::new(db.pool.clone(), db.writer.clone());
        let w = repo
            .create(new_warehouse("Matriz", WarehouseKind::Own))
            .await
            .unwrap();

        let mut conn = get_connection(&db.pool).unwrap();
        diesel::sql_query("INSERT INTO product (sku, name) VALUES ('CAM-001', 'Camiseta')")
            .execute(&mut conn)
            .unwrap();
        diesel::sql_query(format!(
            "INSERT INTO movement (sku, warehouse_id, quantity, kind, timestamp, balance) \
             VALUES ('CAM-001', {}, 5, 'ENTRY', '2024-03-01 10:00:00', 5)",
            w.id
        ))
        .execute(&mut conn)
        .unwrap();

        assert!(matches!(repo.delete(w.id).await, Err(Error::Conflict(_))));

        diesel::sql_query("DELETE FROM movement").execute(&mut conn).unwrap();
        assert_eq!(repo.delete(w.id).await.unwrap(), 1);
        assert_eq!(repo.get_by_id(w.id).unwrap(), None);
    }
}
