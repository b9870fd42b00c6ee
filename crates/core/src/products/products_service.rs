use log::debug;
use std::sync::Arc;

use super::products_model::{NewProduct, Product, ProductUpdate};
use super::products_traits::{ProductRepositoryTrait, ProductServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing the product catalog.
pub struct ProductService {
    repository: Arc<dyn ProductRepositoryTrait>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl ProductServiceTrait for ProductService {
    async fn create_product(&self, new_product: NewProduct) -> Result<Product> {
        let new_product = new_product.normalized()?;
        debug!("Creating product {}", new_product.sku);
        self.repository.create(new_product).await
    }

    async fn update_product(&self, sku: &str, update: ProductUpdate) -> Result<Product> {
        update.validate()?;
        let existing = self.get_product(sku)?;
        let updated = update.apply_to(&existing);
        if updated == existing {
            return Ok(existing);
        }
        self.repository.update(updated).await
    }

    async fn delete_product(&self, sku: &str) -> Result<()> {
        let deleted = self.repository.delete(sku).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Product with SKU '{}'", sku)));
        }
        debug!("Deleted product {} and its movements", sku);
        Ok(())
    }

    fn get_product(&self, sku: &str) -> Result<Product> {
        self.repository
            .get_by_sku(sku)?
            .ok_or_else(|| Error::NotFound(format!("Product with SKU '{}'", sku)))
    }

    fn list_products(&self, filter: Option<&str>) -> Result<Vec<Product>> {
        let filter = filter.map(str::trim).filter(|f| !f.is_empty());
        self.repository.list(filter)
    }
}
