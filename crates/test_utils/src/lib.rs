//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! catalog services test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built employees and products
//! - `builders`: Builder patterns for test data construction
//! - `memory`: In-memory implementations of the store ports
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers comparing records field by field
//! - `generators`: Property-based test data generators

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;
pub mod memory;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
pub use memory::*;
