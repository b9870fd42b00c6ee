//! Product repository and service traits.

use async_trait::async_trait;

use super::products_model::{NewProduct, Product, ProductUpdate};
use crate::errors::Result;

/// Contract for product persistence.
#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    /// Inserts a product. Fails with `Error::Conflict` when the SKU exists.
    async fn create(&self, new_product: NewProduct) -> Result<Product>;

    /// Persists the full state of an existing product.
    async fn update(&self, product: Product) -> Result<Product>;

    /// Deletes a product together with its movements.
    ///
    /// Returns the number of deleted product rows.
    async fn delete(&self, sku: &str) -> Result<usize>;

    fn get_by_sku(&self, sku: &str) -> Result<Option<Product>>;

    /// Lists products ordered by SKU, optionally keeping only those whose
    /// name or SKU contains `filter` (case-insensitive).
    fn list(&self, filter: Option<&str>) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    async fn create_product(&self, new_product: NewProduct) -> Result<Product>;
    async fn update_product(&self, sku: &str, update: ProductUpdate) -> Result<Product>;
    async fn delete_product(&self, sku: &str) -> Result<()>;
    fn get_product(&self, sku: &str) -> Result<Product>;
    fn list_products(&self, filter: Option<&str>) -> Result<Vec<Product>>;
}
