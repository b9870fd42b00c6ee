//! Database models for products.

use diesel::prelude::*;
use stockledger_core::products::{NewProduct, Product};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::product)]
#[diesel(primary_key(sku))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ProductDB {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<ProductDB> for Product {
    fn from(db: ProductDB) -> Self {
        Self {
            sku: db.sku,
            name: db.name,
            description: db.description,
        }
    }
}

impl From<Product> for ProductDB {
    fn from(domain: Product) -> Self {
        Self {
            sku: domain.sku,
            name: domain.name,
            description: domain.description,
        }
    }
}

impl From<NewProduct> for ProductDB {
    fn from(domain: NewProduct) -> Self {
        Self {
            sku: domain.sku,
            name: domain.name,
            description: domain.description,
        }
    }
}
