use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use stockledger_core::reconciliation::{MappingRepositoryTrait, SkuMapping};
use stockledger_core::{Error, Result};

use super::model::SkuMappingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::sku_mapping;

pub struct MappingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MappingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MappingRepository { pool, writer }
    }
}

#[async_trait]
impl MappingRepositoryTrait for MappingRepository {
    fn list(&self) -> Result<Vec<SkuMapping>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = sku_mapping::table
            .select(SkuMappingDB::as_select())
            .order(sku_mapping::internal_sku.asc())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(SkuMapping::from).collect())
    }

    fn get(&self, internal_sku: &str) -> Result<Option<SkuMapping>> {
        let mut conn = get_connection(&self.pool)?;
        let row = sku_mapping::table
            .find(internal_sku)
            .select(SkuMappingDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(SkuMapping::from))
    }

    fn find_by_external(&self, external_sku: &str) -> Result<Option<SkuMapping>> {
        let mut conn = get_connection(&self.pool)?;
        let row = sku_mapping::table
            .filter(sku_mapping::external_sku.eq(external_sku))
            .select(SkuMappingDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(SkuMapping::from))
    }

    async fn upsert(&self, mapping: SkuMapping) -> Result<SkuMapping> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SkuMapping> {
                let row: SkuMappingDB = mapping.into();
                let owner: Option<String> = sku_mapping::table
                    .filter(sku_mapping::external_sku.eq(&row.external_sku))
                    .select(sku_mapping::internal_sku)
                    .first(conn)
                    .optional()
                    .into_core()?;
                if let Some(owner) = owner.filter(|o| *o != row.internal_sku) {
                    return Err(Error::Conflict(format!(
                        "External SKU '{}' is already mapped to '{}'",
                        row.external_sku, owner
                    )));
                }

                diesel::insert_into(sku_mapping::table)
                    .values(&row)
                    .on_conflict(sku_mapping::internal_sku)
                    .do_update()
                    .set((
                        sku_mapping::external_sku.eq(&row.external_sku),
                        sku_mapping::updated_at.eq(row.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                let saved = sku_mapping::table
                    .find(&row.internal_sku)
                    .select(SkuMappingDB::as_select())
                    .first(conn)
                    .into_core()?;
                debug!("Saved mapping {} -> {}", saved.internal_sku, saved.external_sku);
                Ok(saved.into())
            })
            .await
    }

    async fn delete(&self, internal_sku: &str) -> Result<usize> {
        let internal_sku = internal_sku.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(sku_mapping::table.find(internal_sku))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;
    use stockledger_core::reconciliation::{ReconciliationService, ReconciliationServiceTrait};
    use stockledger_core::utils::time_utils::ledger_now;

    fn mapping(internal: &str, external: &str) -> SkuMapping {
        SkuMapping {
            internal_sku: internal.to_string(),
            external_sku: external.to_string(),
            updated_at: ledger_now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_guards_external_sku() {
        let db = setup();
        let repo = MappingRepository::new(db.pool.clone(), db.writer.clone());

        repo.upsert(mapping("CAM-001", "MLB1")).await.unwrap();
        repo.upsert(mapping("CAM-001", "MLB2")).await.unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);
        assert_eq!(repo.get("CAM-001").unwrap().unwrap().external_sku, "MLB2");
        assert!(repo.find_by_external("MLB1").unwrap().is_none());

        let taken = repo.upsert(mapping("CAL-002", "MLB2")).await;
        assert!(matches!(taken, Err(Error::Conflict(_))));

        assert_eq!(repo.delete("CAM-001").await.unwrap(), 1);
        assert!(repo.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_saving_same_mapping_twice_yields_one_row() {
        let db = setup();
        let service =
            ReconciliationService::new(Arc::new(MappingRepository::new(db.pool.clone(), db.writer.clone())));
        service.save_mapping("CAM-001", "MLB1").await.unwrap();
        service.save_mapping("CAM-001", "MLB1").await.unwrap();

        let mut conn = get_connection(&db.pool).unwrap();
        let rows: i64 = sku_mapping::table.count().get_result(&mut conn).unwrap();
        assert_eq!(rows, 1);
    }
}
