//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! Defaults are generated with `fake`, so tests specify only the fields they
//! care about.

use fake::faker::company::en::{Buzzword, Industry};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;

use core_kernel::{EmployeeId, ProductId};
use domain_employee::Employee;
use domain_product::Product;

/// Builder for constructing test employees
pub struct EmployeeBuilder {
    employee: Employee,
}

impl Default for EmployeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeBuilder {
    /// Creates a builder with every field filled with fake data
    pub fn new() -> Self {
        Self {
            employee: Employee {
                id: None,
                first_name: Some(FirstName().fake()),
                last_name: Some(LastName().fake()),
                email: Some(SafeEmail().fake()),
                department_id: Some(format!("D{:03}", (1..1000).fake::<u16>())),
                hire_date: Some(format!(
                    "20{:02}-{:02}-{:02}",
                    (10..25).fake::<u8>(),
                    (1..13).fake::<u8>(),
                    (1..29).fake::<u8>()
                )),
            },
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.employee.id = Some(EmployeeId::new(id));
        self
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.employee.first_name = Some(name.into());
        self
    }

    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.employee.last_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.employee.email = Some(email.into());
        self
    }

    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.employee.department_id = Some(department_id.into());
        self
    }

    pub fn with_hire_date(mut self, hire_date: impl Into<String>) -> Self {
        self.employee.hire_date = Some(hire_date.into());
        self
    }

    /// Clears the hire date
    pub fn without_hire_date(mut self) -> Self {
        self.employee.hire_date = None;
        self
    }

    pub fn build(self) -> Employee {
        self.employee
    }
}

/// Builder for constructing test products
pub struct ProductBuilder {
    product: Product,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBuilder {
    /// Creates an active product with fake name, description, category and stock
    pub fn new() -> Self {
        let cents: i64 = (100..100_000).fake();
        Self {
            product: Product {
                id: None,
                name: Some(Buzzword().fake()),
                description: Some(Sentence(3..8).fake()),
                price: Some(Decimal::new(cents, 2)),
                category: Some(Industry().fake()),
                stock: Some((0..500).fake()),
                active: Some(true),
            },
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.product.id = Some(ProductId::new(id));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.product.price = Some(price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product.category = Some(category.into());
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.product.stock = Some(stock);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.product.active = Some(active);
        self
    }

    /// Clears the description
    pub fn without_description(mut self) -> Self {
        self.product.description = None;
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_employee_builder_fills_every_field() {
        let employee = EmployeeBuilder::new().build();

        assert!(employee.id.is_none());
        assert!(employee.first_name.is_some());
        assert!(employee.email.as_deref().is_some_and(|e| e.contains('@')));
        assert_eq!(employee.hire_date.as_deref().map(str::len), Some(10));
    }

    #[test]
    fn test_product_builder_overrides() {
        let product = ProductBuilder::new()
            .with_id(5)
            .with_price(dec!(12.50))
            .active(false)
            .without_description()
            .build();

        assert_eq!(product.id, Some(ProductId::new(5)));
        assert_eq!(product.price, Some(dec!(12.50)));
        assert_eq!(product.active, Some(false));
        assert!(product.description.is_none());
    }
}
