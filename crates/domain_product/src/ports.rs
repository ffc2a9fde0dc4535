//! Product store port

use async_trait::async_trait;

use core_kernel::{HealthCheckable, ProductId, StoreError};
use crate::filter::ProductFilter;
use crate::product::Product;

/// Operations backing the `/products` resource
#[async_trait]
pub trait ProductStore: HealthCheckable {
    /// Returns every product in the order the store yields them
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Returns the products matching every criterion set on the filter
    async fn list_products_filtered(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// Returns one product
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no row has the identifier
    async fn get_product(&self, id: ProductId) -> Result<Product, StoreError>;

    /// Inserts a product and returns it with the assigned identifier
    ///
    /// # Errors
    ///
    /// `StoreError::CreationFailed` wrapping whatever made the insert fail
    async fn create_product(&self, product: Product) -> Result<Product, StoreError>;

    /// Replaces every non-identifier column of an existing product
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no row was affected
    async fn update_product(&self, id: ProductId, product: Product) -> Result<Product, StoreError>;

    /// Deletes a product
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no row was affected
    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError>;
}
