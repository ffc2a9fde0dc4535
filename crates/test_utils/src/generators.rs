//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating employees, products and the
//! camelCase identifiers the naming rule operates on.

use proptest::option;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_employee::Employee;
use domain_product::Product;

/// Strategy for short printable text values
pub fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .@-]{1,24}"
}

/// Strategy for ISO calendar dates stored as text
pub fn date_text_strategy() -> impl Strategy<Value = String> {
    (1990u32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

/// Strategy for non-negative prices of any scale up to six decimal places
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000, 0u32..=6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy for camelCase identifiers such as `departmentId`
pub fn camel_case_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}", prop::collection::vec("[A-Z][a-z]{1,6}", 0..4))
        .prop_map(|(head, tail)| format!("{head}{}", tail.concat()))
}

/// Strategy for employees without an identifier; any field may be unset
pub fn employee_strategy() -> impl Strategy<Value = Employee> {
    (
        option::of(text_strategy()),
        option::of(text_strategy()),
        option::of(text_strategy()),
        option::of("[A-Z]{2,4}"),
        option::of(date_text_strategy()),
    )
        .prop_map(|(first_name, last_name, email, department_id, hire_date)| Employee {
            id: None,
            first_name,
            last_name,
            email,
            department_id,
            hire_date,
        })
}

/// Strategy for products without an identifier; any field may be unset
pub fn product_strategy() -> impl Strategy<Value = Product> {
    (
        option::of(text_strategy()),
        option::of(text_strategy()),
        option::of(price_strategy()),
        option::of("[a-z]{3,10}"),
        option::of(any::<i64>()),
        option::of(any::<bool>()),
    )
        .prop_map(|(name, description, price, category, stock, active)| Product {
            id: None,
            name,
            description,
            price,
            category,
            stock,
            active,
        })
}
