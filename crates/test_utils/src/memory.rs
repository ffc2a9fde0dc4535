//! In-memory store implementations
//!
//! Back the HTTP tests without a database. Identifiers are assigned from a
//! counter starting at 1, rows are listed in identifier order, and a store can
//! be told to fail every create to exercise failure masking.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{EmployeeId, HealthCheckable, ProductId, StoreError};
use domain_employee::{Employee, EmployeeStore};
use domain_product::{Product, ProductFilter, ProductStore};

/// Shared bookkeeping of both in-memory stores
#[derive(Debug)]
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
    fail_creates: AtomicBool,
    unhealthy: AtomicBool,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            fail_creates: AtomicBool::new(false),
            unhealthy: AtomicBool::new(false),
        }
    }

    async fn insert_at(&self, id: i64, row: T) {
        self.rows.write().await.insert(id, row);
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn list(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    async fn get(&self, entity: &str, id: i64) -> Result<T, StoreError> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(entity, id))
    }

    async fn replace(&self, entity: &str, id: i64, row: T) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => Err(StoreError::not_found(entity, id)),
        }
    }

    async fn remove(&self, entity: &str, id: i64) -> Result<(), StoreError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(entity, id))
    }

    fn check_create(&self, entity: &str) -> Result<(), StoreError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::creation_failed(entity, "insert rejected by test store"));
        }
        Ok(())
    }

    fn check_health(&self) -> Result<(), StoreError> {
        if self.unhealthy.load(Ordering::SeqCst) {
            return Err(StoreError::Connection {
                message: "test store marked unhealthy".to_string(),
            });
        }
        Ok(())
    }
}

/// In-memory [`EmployeeStore`]
#[derive(Debug)]
pub struct InMemoryEmployeeStore {
    table: Table<Employee>,
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }

    /// Stores an employee under a fixed identifier
    pub async fn seed(&self, id: i64, employee: Employee) -> Employee {
        let employee = employee.with_id(EmployeeId::new(id));
        self.table.insert_at(id, employee.clone()).await;
        employee
    }

    /// Makes every following create fail
    pub fn fail_creates(&self, fail: bool) {
        self.table.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Makes every following health check fail
    pub fn set_unhealthy(&self, unhealthy: bool) {
        self.table.unhealthy.store(unhealthy, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.table.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HealthCheckable for InMemoryEmployeeStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.table.check_health()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.table.list().await)
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError> {
        self.table.get(EmployeeId::entity(), id.value()).await
    }

    async fn create_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        self.table.check_create(EmployeeId::entity())?;
        let id = self.table.allocate_id();
        Ok(self.seed(id, employee).await)
    }

    async fn update_employee(&self, id: EmployeeId, employee: Employee) -> Result<Employee, StoreError> {
        let employee = employee.with_id(id);
        self.table.replace(EmployeeId::entity(), id.value(), employee.clone()).await?;
        Ok(employee)
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), StoreError> {
        self.table.remove(EmployeeId::entity(), id.value()).await
    }
}

/// In-memory [`ProductStore`]
#[derive(Debug)]
pub struct InMemoryProductStore {
    table: Table<Product>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }

    /// Stores a product under a fixed identifier
    pub async fn seed(&self, id: i64, product: Product) -> Product {
        let product = product.with_id(ProductId::new(id));
        self.table.insert_at(id, product.clone()).await;
        product
    }

    /// Makes every following create fail
    pub fn fail_creates(&self, fail: bool) {
        self.table.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Makes every following health check fail
    pub fn set_unhealthy(&self, unhealthy: bool) {
        self.table.unhealthy.store(unhealthy, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.table.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HealthCheckable for InMemoryProductStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.table.check_health()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.table.list().await)
    }

    async fn list_products_filtered(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .table
            .list()
            .await
            .into_iter()
            .filter(|p| filter.matches(p.category.as_deref(), p.active))
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, StoreError> {
        self.table.get(ProductId::entity(), id.value()).await
    }

    async fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        self.table.check_create(ProductId::entity())?;
        let id = self.table.allocate_id();
        Ok(self.seed(id, product).await)
    }

    async fn update_product(&self, id: ProductId, product: Product) -> Result<Product, StoreError> {
        let product = product.with_id(id);
        self.table.replace(ProductId::entity(), id.value(), product.clone()).await?;
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        self.table.remove(ProductId::entity(), id.value()).await
    }
}
