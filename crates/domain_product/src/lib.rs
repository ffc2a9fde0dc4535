//! Product Domain
//!
//! This crate defines the product record exposed by the `/products`
//! resource, the static field table that maps it onto the `products` table,
//! the optional category/active list filter, and the [`ProductStore`] port.

pub mod filter;
pub mod ports;
pub mod product;

pub use filter::ProductFilter;
pub use ports::ProductStore;
pub use product::Product;
