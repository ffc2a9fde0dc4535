//! Pre-built Test Fixtures
//!
//! Ready-to-use employees and products. Fixtures never carry an identifier;
//! stores assign one on create.

use domain_employee::Employee;
use domain_product::Product;
use rust_decimal_macros::dec;

/// Fixture for employee test data
pub struct EmployeeFixtures;

impl EmployeeFixtures {
    /// Ada Lovelace in engineering
    pub fn ada() -> Employee {
        Employee {
            id: None,
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@x.io".to_string()),
            department_id: Some("ENG".to_string()),
            hire_date: Some("2020-01-01".to_string()),
        }
    }

    /// Grace Hopper in research
    pub fn grace() -> Employee {
        Employee {
            id: None,
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            email: Some("grace@x.io".to_string()),
            department_id: Some("RES".to_string()),
            hire_date: Some("2019-06-15".to_string()),
        }
    }

    /// An employee with only a last name
    pub fn sparse() -> Employee {
        Employee {
            last_name: Some("Nobody".to_string()),
            ..Employee::default()
        }
    }
}

/// Fixture for product test data
pub struct ProductFixtures;

impl ProductFixtures {
    /// An active tool priced at 10.00
    pub fn widget() -> Product {
        Product {
            id: None,
            name: Some("Widget".to_string()),
            description: Some("A general purpose widget".to_string()),
            price: Some(dec!(10.00)),
            category: Some("tools".to_string()),
            stock: Some(40),
            active: Some(true),
        }
    }

    /// An inactive tool
    pub fn retired_gadget() -> Product {
        Product {
            id: None,
            name: Some("Gadget".to_string()),
            description: None,
            price: Some(dec!(4.75)),
            category: Some("tools".to_string()),
            stock: Some(0),
            active: Some(false),
        }
    }

    /// An active book
    pub fn handbook() -> Product {
        Product {
            id: None,
            name: Some("Handbook".to_string()),
            description: Some("Operations handbook".to_string()),
            price: Some(dec!(29.90)),
            category: Some("books".to_string()),
            stock: Some(12),
            active: Some(true),
        }
    }
}
