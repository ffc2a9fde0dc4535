//! Ports shared by the domain stores
//!
//! Each domain defines its own store trait (e.g. `EmployeeStore`) on top of
//! the types here. Adapters implement those traits either against PostgreSQL
//! or, in tests, against memory.
//!
//! ```rust,ignore
//! // In domain_employee/src/ports.rs
//! #[async_trait]
//! pub trait EmployeeStore: HealthCheckable {
//!     async fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError>;
//! }
//!
//! // In infra_db - internal adapter
//! impl EmployeeStore for EmployeeRepository { ... }
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for store operations
///
/// A unified error type that every store implementation returns, so the HTTP
/// layer can translate outcomes without knowing which adapter produced them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matches the identifier
    #[error("{entity} not found with id: {id}")]
    NotFound {
        entity: String,
        id: String,
    },

    /// The insert failed; the cause is carried as text
    #[error("Error creating {entity}: {message}")]
    CreationFailed {
        entity: String,
        message: String,
    },

    /// A column could not be converted into its field (strict mapping only)
    #[error("Cannot map column '{column}' of {entity}: {message}")]
    Conversion {
        entity: String,
        column: String,
        message: String,
    },

    /// The backing store could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
    },

    /// Any other failure reported by the backing store
    #[error("Store error: {message}")]
    Backend {
        message: String,
    },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a CreationFailed error
    pub fn creation_failed(entity: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::CreationFailed {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Creates a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this error is a failed insert
    pub fn is_creation_failure(&self) -> bool {
        matches!(self, StoreError::CreationFailed { .. })
    }
}

/// Trait for stores that can report whether their backend is reachable
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check against the backend
    ///
    /// # Errors
    ///
    /// Returns the error that made the backend unreachable
    async fn health_check(&self) -> Result<(), StoreError>;
}
