use chrono::NaiveDateTime;
use diesel::prelude::*;
use stockledger_core::reconciliation::SkuMapping;

#[derive(Queryable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::sku_mapping)]
#[diesel(primary_key(internal_sku))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SkuMappingDB {
    pub internal_sku: String,
    pub external_sku: String,
    pub updated_at: NaiveDateTime,
}

impl From<SkuMappingDB> for SkuMapping {
    fn from(db: SkuMappingDB) -> Self {
        Self {
            internal_sku: db.internal_sku,
            external_sku: db.external_sku,
            updated_at: db.updated_at,
        }
    }
}

impl From<SkuMapping> for SkuMappingDB {
    fn from(domain: SkuMapping) -> Self {
        Self {
            internal_sku: domain.internal_sku,
            external_sku: domain.external_sku,
            updated_at: domain.updated_at,
        }
    }
}
