//! Product repository implementation
//!
//! Database access for the `products` table. Updates are derived from the
//! product field table through [`ReflectiveUpdate`]; the hand-written
//! equivalent is available from [`fixed_column_update`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use core_kernel::{HealthCheckable, ProductId, Record, SqlValue, StoreError};
use domain_product::{Product, ProductFilter, ProductStore};

use crate::mapper::RowMapper;
use crate::pool::{verify_connection, DatabasePool};
use crate::statement::{execute_for_id, fetch_record, fetch_records, insert_params, insert_returning_id};
use crate::update::{FixedColumnUpdate, ReflectiveUpdate, UpdateStrategy};

const SELECT_ALL: &str = "SELECT * FROM products";

const SELECT_FILTERED: &str = r#"
    SELECT * FROM products
    WHERE ($1::text IS NULL OR category = $1)
      AND ($2::boolean IS NULL OR active = $2)
"#;

const SELECT_BY_ID: &str = "SELECT * FROM products WHERE id = $1";

const INSERT: &str = r#"
    INSERT INTO products (name, description, price, category, stock, active)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id
"#;

const DELETE: &str = "DELETE FROM products WHERE id = $1";

/// Returns a hand-written UPDATE equivalent to the reflective one
pub fn fixed_column_update() -> FixedColumnUpdate<Product> {
    FixedColumnUpdate::new(
        "UPDATE products SET name = $1, description = $2, price = $3, category = $4, \
         stock = $5, active = $6 WHERE id = $7",
        |p: &Product| {
            vec![
                SqlValue::Text(p.name.clone()),
                SqlValue::Text(p.description.clone()),
                SqlValue::Decimal(p.price),
                SqlValue::Text(p.category.clone()),
                SqlValue::BigInt(p.stock),
                SqlValue::Bool(p.active),
            ]
        },
    )
}

/// PostgreSQL-backed [`ProductStore`]
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: DatabasePool,
    mapper: RowMapper,
    updates: Arc<dyn UpdateStrategy<Product>>,
}

impl ProductRepository {
    /// Creates a repository with the lenient mapper and the reflective UPDATE
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            mapper: RowMapper::default(),
            updates: Arc::new(ReflectiveUpdate::<Product>::new()),
        }
    }

    pub fn with_mapper(mut self, mapper: RowMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Replaces the strategy used to build UPDATE statements
    pub fn with_update_strategy(mut self, strategy: impl UpdateStrategy<Product> + 'static) -> Self {
        self.updates = Arc::new(strategy);
        self
    }

    pub fn update_strategy(&self) -> &dyn UpdateStrategy<Product> {
        self.updates.as_ref()
    }
}

#[async_trait]
impl HealthCheckable for ProductRepository {
    async fn health_check(&self) -> Result<(), StoreError> {
        verify_connection(&self.pool).await.map_err(StoreError::from)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = fetch_records(&self.pool, &self.mapper, SELECT_ALL, Vec::new()).await?;
        Ok(products)
    }

    async fn list_products_filtered(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        if filter.is_empty() {
            return self.list_products().await;
        }

        debug!(category = ?filter.category, active = ?filter.active, "Listing products by filter");
        let params = vec![SqlValue::Text(filter.category.clone()), SqlValue::Bool(filter.active)];
        let products = fetch_records(&self.pool, &self.mapper, SELECT_FILTERED, params).await?;
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, StoreError> {
        let product = fetch_record(&self.pool, &self.mapper, SELECT_BY_ID, id.value()).await?;
        Ok(product)
    }

    async fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        let product = product.without_id();

        match insert_returning_id(&self.pool, Product::ENTITY, INSERT, insert_params(&product)).await {
            Ok(Some(id)) => {
                debug!(id, "Product created");
                Ok(product.with_id(ProductId::new(id)))
            }
            Ok(None) => Ok(product),
            Err(e) => {
                error!(error = %e, "Error creating product");
                Err(StoreError::creation_failed(Product::ENTITY, e.to_string()))
            }
        }
    }

    async fn update_product(&self, id: ProductId, product: Product) -> Result<Product, StoreError> {
        let statement = self.updates.build(id.value(), &product);
        debug!(strategy = self.updates.name(), sql = %statement.sql, "Updating product");

        execute_for_id(&self.pool, Product::ENTITY, id.value(), &statement.sql, statement.params).await?;
        Ok(product.with_id(id))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let params = vec![SqlValue::BigInt(Some(id.value()))];
        execute_for_id(&self.pool, Product::ENTITY, id.value(), DELETE, params).await?;
        Ok(())
    }
}
