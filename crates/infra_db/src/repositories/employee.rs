//! Employee repository implementation
//!
//! Database access for the `employees` table. Updates go through a
//! [`FixedColumnUpdate`] by default.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use core_kernel::{EmployeeId, HealthCheckable, Record, SqlValue, StoreError};
use domain_employee::{Employee, EmployeeStore};

use crate::mapper::RowMapper;
use crate::pool::{verify_connection, DatabasePool};
use crate::statement::{execute_for_id, fetch_record, fetch_records, insert_params, insert_returning_id};
use crate::update::{FixedColumnUpdate, UpdateStrategy};

const SELECT_ALL: &str = "SELECT * FROM employees";

const SELECT_BY_ID: &str = "SELECT * FROM employees WHERE id = $1";

const INSERT: &str = r#"
    INSERT INTO employees (first_name, last_name, email, department_id, hire_date)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

const UPDATE: &str = "UPDATE employees SET first_name = $1, last_name = $2, email = $3, \
                      department_id = $4, hire_date = $5 WHERE id = $6";

const DELETE: &str = "DELETE FROM employees WHERE id = $1";

/// Returns the hand-written UPDATE used for employees
pub fn fixed_column_update() -> FixedColumnUpdate<Employee> {
    FixedColumnUpdate::new(UPDATE, |e: &Employee| {
        vec![
            SqlValue::Text(e.first_name.clone()),
            SqlValue::Text(e.last_name.clone()),
            SqlValue::Text(e.email.clone()),
            SqlValue::Text(e.department_id.clone()),
            SqlValue::Text(e.hire_date.clone()),
        ]
    })
}

/// PostgreSQL-backed [`EmployeeStore`]
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: DatabasePool,
    mapper: RowMapper,
    updates: Arc<dyn UpdateStrategy<Employee>>,
}

impl EmployeeRepository {
    /// Creates a repository with the lenient mapper and the fixed UPDATE
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            mapper: RowMapper::default(),
            updates: Arc::new(fixed_column_update()),
        }
    }

    pub fn with_mapper(mut self, mapper: RowMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Replaces the strategy used to build UPDATE statements
    pub fn with_update_strategy(mut self, strategy: impl UpdateStrategy<Employee> + 'static) -> Self {
        self.updates = Arc::new(strategy);
        self
    }

    pub fn update_strategy(&self) -> &dyn UpdateStrategy<Employee> {
        self.updates.as_ref()
    }
}

#[async_trait]
impl HealthCheckable for EmployeeRepository {
    async fn health_check(&self) -> Result<(), StoreError> {
        verify_connection(&self.pool).await.map_err(StoreError::from)
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = fetch_records(&self.pool, &self.mapper, SELECT_ALL, Vec::new()).await?;
        Ok(employees)
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError> {
        let employee = fetch_record(&self.pool, &self.mapper, SELECT_BY_ID, id.value()).await?;
        Ok(employee)
    }

    async fn create_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        let employee = employee.without_id();

        match insert_returning_id(&self.pool, Employee::ENTITY, INSERT, insert_params(&employee)).await {
            Ok(Some(id)) => {
                debug!(id, "Employee created");
                Ok(employee.with_id(EmployeeId::new(id)))
            }
            Ok(None) => Ok(employee),
            Err(e) => {
                error!(error = %e, "Error creating employee");
                Err(StoreError::creation_failed(Employee::ENTITY, e.to_string()))
            }
        }
    }

    async fn update_employee(&self, id: EmployeeId, employee: Employee) -> Result<Employee, StoreError> {
        let statement = self.updates.build(id.value(), &employee);
        debug!(strategy = self.updates.name(), sql = %statement.sql, "Updating employee");

        execute_for_id(&self.pool, Employee::ENTITY, id.value(), &statement.sql, statement.params).await?;
        Ok(employee.with_id(id))
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), StoreError> {
        let params = vec![SqlValue::BigInt(Some(id.value()))];
        execute_for_id(&self.pool, Employee::ENTITY, id.value(), DELETE, params).await?;
        Ok(())
    }
}
