//! Core Kernel - Foundational types shared by the catalog services
//!
//! This crate provides the building blocks used by every domain and by the
//! database layer:
//! - Strongly-typed numeric identifiers
//! - The camelCase to snake_case naming rule used to locate columns
//! - A small SQL value model with type coercion
//! - Static field tables that describe how a record maps onto a table
//! - The store error shared by all domain ports

pub mod error;
pub mod identifiers;
pub mod naming;
pub mod ports;
pub mod record;
pub mod value;

pub use error::CoreError;
pub use identifiers::{EmployeeId, ProductId};
pub use naming::camel_to_snake;
pub use ports::{HealthCheckable, StoreError};
pub use record::{FieldMapping, FieldRole, Record};
pub use value::{coerce, ConversionError, FieldKind, SqlValue};
