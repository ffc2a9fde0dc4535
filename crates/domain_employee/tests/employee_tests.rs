//! Tests for the employee record and its field table

use core_kernel::{EmployeeId, FieldMapping, FieldRole, Record, SqlValue};
use domain_employee::Employee;
use proptest::prelude::*;
use serde_json::json;

fn ada() -> Employee {
    Employee {
        id: None,
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some("ada@x.io".to_string()),
        department_id: Some("ENG".to_string()),
        hire_date: Some("2020-01-01".to_string()),
    }
}

mod field_table_tests {
    use super::*;

    #[test]
    fn test_columns_match_employees_table() {
        let columns: Vec<String> = Employee::fields().iter().map(FieldMapping::column).collect();

        assert_eq!(
            columns,
            vec!["id", "first_name", "last_name", "email", "department_id", "hire_date"]
        );
        assert_eq!(Employee::TABLE, "employees");
    }

    #[test]
    fn test_only_id_is_identifier() {
        let identifiers: Vec<&str> = Employee::fields()
            .iter()
            .filter(|m| m.role == FieldRole::Identifier)
            .map(|m| m.field)
            .collect();

        assert_eq!(identifiers, vec!["id"]);
        assert_eq!(Employee::writable_fields().len(), 5);
    }

    #[test]
    fn test_getters_expose_values() {
        let employee = ada().with_id(EmployeeId::new(3));
        let values: Vec<SqlValue> = Employee::fields().iter().map(|m| (m.get)(&employee)).collect();

        assert_eq!(values[0], SqlValue::BigInt(Some(3)));
        assert_eq!(values[4], SqlValue::Text(Some("ENG".to_string())));
    }

    #[test]
    fn test_assign_identifier() {
        let mut employee = ada();
        employee.assign_identifier(11);

        assert_eq!(employee.identifier(), Some(11));
        assert_eq!(employee.id, Some(EmployeeId::new(11)));
    }
}

mod serialization_tests {
    use super::*;

    #[test]
    fn test_json_uses_camel_case() {
        let value = serde_json::to_value(ada().with_id(EmployeeId::new(1))).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@x.io",
                "departmentId": "ENG",
                "hireDate": "2020-01-01"
            })
        );
    }

    #[test]
    fn test_missing_properties_deserialize_as_none() {
        let employee: Employee = serde_json::from_value(json!({ "firstName": "Grace" })).unwrap();

        assert_eq!(employee.first_name.as_deref(), Some("Grace"));
        assert!(employee.id.is_none());
        assert!(employee.hire_date.is_none());
    }

    #[test]
    fn test_unset_fields_serialize_as_null() {
        let value = serde_json::to_value(Employee::default()).unwrap();

        assert!(value["email"].is_null());
        assert!(value["id"].is_null());
    }
}

fn text_field() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z0-9@. -]{0,16}")
}

prop_compose! {
    fn employee_strategy()(
        id in proptest::option::of(1i64..1_000_000),
        first_name in text_field(),
        last_name in text_field(),
        email in text_field(),
        department_id in text_field(),
        hire_date in text_field(),
    ) -> Employee {
        Employee { id: id.map(EmployeeId::new), first_name, last_name, email, department_id, hire_date }
    }
}

proptest! {
    #[test]
    fn prop_field_table_copies_every_field(employee in employee_strategy()) {
        let mut copy = Employee::default();
        for mapping in Employee::fields() {
            (mapping.set)(&mut copy, (mapping.get)(&employee)).unwrap();
        }
        prop_assert_eq!(copy, employee);
    }
}
