use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use stockledger_core::products::{NewProduct, Product, ProductRepositoryTrait};
use stockledger_core::{Error, Result};

use super::model::ProductDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::product;

pub struct ProductRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProductRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProductRepository { pool, writer }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn create(&self, new_product: NewProduct) -> Result<Product> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Product> {
                let row: ProductDB = new_product.into();
                let inserted = diesel::insert_into(product::table)
                    .values(&row)
                    .returning(ProductDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| match Error::from(StorageError::from(e)) {
                        Error::Conflict(_) => {
                            Error::Conflict(format!("Product '{}' already exists", row.sku))
                        }
                        other => other,
                    })?;
                Ok(inserted.into())
            })
            .await
    }

    async fn update(&self, updated: Product) -> Result<Product> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Product> {
                let row: ProductDB = updated.into();
                let saved = diesel::update(product::table.find(row.sku.clone()))
                    .set(&row)
                    .returning(ProductDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| match Error::from(StorageError::from(e)) {
                        Error::NotFound(_) => Error::NotFound(format!("Product '{}'", row.sku)),
                        other => other,
                    })?;
                Ok(saved.into())
            })
            .await
    }

    async fn delete(&self, sku: &str) -> Result<usize> {
        let sku = sku.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Movements go with the product via ON DELETE CASCADE.
                diesel::delete(product::table.find(sku))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_sku(&self, sku: &str) -> Result<Option<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let row = product::table
            .find(sku)
            .select(ProductDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Product::from))
    }

    fn list(&self, filter: Option<&str>) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = product::table
            .select(ProductDB::as_select())
            .order(product::sku.asc())
            .into_boxed();
        if let Some(term) = filter {
            // SQLite LIKE is case-insensitive for ASCII.
            let pattern = format!("%{}%", term);
            query = query.filter(
                product::name
                    .like(pattern.clone())
                    .or(product::sku.like(pattern)),
            );
        }
        let rows = query.load(&mut conn).into_core()?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;

    fn new_product(sku: &str, name: &str) -> NewProduct {
        NewProduct {
            sku: sku.to_string(),
            name: name.to_string(),
            description: Some("algodão".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let db = setup();
        let repo = ProductRepository::new(db.pool.clone(), db.writer.clone());

        let created = repo.create(new_product("CAM-001", "Camiseta")).await.unwrap();
        assert_eq!(repo.get_by_sku("CAM-001").unwrap(), Some(created.clone()));

        let updated = repo
            .update(Product {
                name: "Camiseta Azul".to_string(),
                description: None,
                ..created
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Camiseta Azul");
        assert_eq!(updated.description, None);

        assert_eq!(repo.delete("CAM-001").await.unwrap(), 1);
        assert_eq!(repo.get_by_sku("CAM-001").unwrap(), None);
        assert_eq!(repo.delete("CAM-001").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_conflict() {
        let db = setup();
        let repo = ProductRepository::new(db.pool.clone(), db.writer.clone());
        repo.create(new_product("CAM-001", "Camiseta")).await.unwrap();
        let dup = repo.create(new_product("CAM-001", "Outra")).await;
        assert!(matches!(dup, Err(Error::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = setup();
        let repo = ProductRepository::new(db.pool.clone(), db.writer.clone());
        let res = repo
            .update(Product {
                sku: "NOPE".into(),
                name: "x".into(),
                description: None,
            })
            .await;
        assert!(matches!(res, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_name_or_sku() {
        let db = setup();
        let repo = ProductRepository::new(db.pool.clone(), db.writer.clone());
        repo.create(new_product("CAM-001", "Camiseta")).await.unwrap();
        repo.create(new_product("CAL-002", "Calça")).await.unwrap();
        repo.create(new_product("BON-003", "Boné")).await.unwrap();

        let all = repo.list(None).unwrap();
        let skus: Vec<&str> = all.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["BON-003", "CAL-002", "CAM-001"]);

        assert_eq!(repo.list(Some("camis")).unwrap().len(), 1);
        assert_eq!(repo.list(Some("ca")).unwrap().len(), 2);
        assert_eq!(repo.list(Some("bon-")).unwrap().len(), 1);
    }
}
