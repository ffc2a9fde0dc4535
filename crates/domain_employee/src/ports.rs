//! Employee store port
//!
//! The HTTP layer only talks to this trait. `infra_db` provides the
//! PostgreSQL implementation; `test_utils` provides an in-memory one.

use async_trait::async_trait;

use core_kernel::{EmployeeId, HealthCheckable, StoreError};
use crate::employee::Employee;

/// Operations backing the `/employees` resource
///
/// Every operation is a single, independent round trip to the backing store.
#[async_trait]
pub trait EmployeeStore: HealthCheckable {
    /// Returns every employee in the order the store yields them
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Returns one employee
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no row has the identifier
    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError>;

    /// Inserts an employee and returns it with the assigned identifier
    ///
    /// Any identifier on the input is ignored.
    ///
    /// # Errors
    ///
    /// `StoreError::CreationFailed` wrapping whatever made the insert fail
    async fn create_employee(&self, employee: Employee) -> Result<Employee, StoreError>;

    /// Replaces every non-identifier column of an existing employee
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no row was affected
    async fn update_employee(&self, id: EmployeeId, employee: Employee) -> Result<Employee, StoreError>;

    /// Deletes an employee
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no row was affected
    async fn delete_employee(&self, id: EmployeeId) -> Result<(), StoreError>;
}
