//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL side of the catalog services using SQLx.
//!
//! # Architecture
//!
//! - **Row mapper**: turns a result row into a record by walking the record's
//!   field table and matching snake_case column names
//! - **Update strategies**: a fixed, hand-written UPDATE and a reflective one
//!   derived from the field table, behind one trait
//! - **Repositories**: one per entity, implementing the domain store ports
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, EmployeeRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/catalog")).await?;
//! let repo = EmployeeRepository::new(pool);
//! ```

pub mod error;
pub mod mapper;
pub mod pool;
pub mod repositories;
pub mod statement;
pub mod update;

pub use error::DatabaseError;
pub use mapper::{map_row, ColumnSource, ConversionSkip, MappedRow, MappingPolicy, RowMapper};
pub use pool::{create_pool, verify_connection, DatabaseConfig, DatabasePool};
pub use repositories::{EmployeeRepository, ProductRepository};
pub use update::{FixedColumnUpdate, ReflectiveUpdate, UpdateStatement, UpdateStrategy};
