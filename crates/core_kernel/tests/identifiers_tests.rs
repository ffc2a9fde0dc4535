//! Tests for strongly-typed identifiers

use core_kernel::{EmployeeId, ProductId};
use proptest::prelude::*;

#[test]
fn test_identifier_serializes_as_plain_number() {
    let id = EmployeeId::new(17);
    let json = serde_json::to_string(&id).unwrap();

    assert_eq!(json, "17");
}

#[test]
fn test_identifier_deserializes_from_number() {
    let id: ProductId = serde_json::from_str("5").unwrap();

    assert_eq!(id.value(), 5);
}

#[test]
fn test_identifier_rejects_string_payload() {
    let result: Result<ProductId, _> = serde_json::from_str("\"five\"");

    assert!(result.is_err());
}

#[test]
fn test_i64_conversions() {
    let id = EmployeeId::from(3);
    let raw: i64 = id.into();

    assert_eq!(raw, 3);
}

#[test]
fn test_identifiers_order_by_value() {
    let mut ids = vec![ProductId::new(9), ProductId::new(1), ProductId::new(5)];
    ids.sort();

    assert_eq!(ids, vec![ProductId::new(1), ProductId::new(5), ProductId::new(9)]);
}

proptest! {
    #[test]
    fn prop_display_then_parse_is_identity(raw in any::<i64>()) {
        let id = EmployeeId::new(raw);
        let parsed: EmployeeId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
