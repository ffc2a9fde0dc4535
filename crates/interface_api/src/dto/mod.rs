//! Request data transfer objects
//!
//! Employees and products travel as their domain records; only the product
//! list query needs its own shape.

pub mod product;
