//! Employee Domain
//!
//! This crate defines the employee record exposed by the `/employees`
//! resource, the static field table that maps it onto the `employees` table,
//! and the [`EmployeeStore`] port implemented by the database layer.

pub mod employee;
pub mod ports;

pub use employee::Employee;
pub use ports::EmployeeStore;
