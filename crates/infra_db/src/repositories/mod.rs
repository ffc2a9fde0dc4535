//! PostgreSQL entity stores
//!
//! One repository per entity, each implementing its domain store port.
//! Repositories hold the pool, the row mapper and the UPDATE strategy; they
//! keep no other state between calls.

pub mod employee;
pub mod product;

pub use employee::EmployeeRepository;
pub use product::ProductRepository;
