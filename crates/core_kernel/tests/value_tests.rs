//! Tests for SQL value coercion

use chrono::{NaiveDate, NaiveDateTime};
use core_kernel::{coerce, ConversionError, FieldKind, SqlValue};
use proptest::prelude::*;
use rust_decimal_macros::dec;

const ALL_KINDS: [FieldKind; 9] = [
    FieldKind::BigInt,
    FieldKind::Int,
    FieldKind::Text,
    FieldKind::Bool,
    FieldKind::Date,
    FieldKind::DateTime,
    FieldKind::Double,
    FieldKind::Float,
    FieldKind::Decimal,
];

#[test]
fn test_null_coerces_to_every_kind() {
    for kind in ALL_KINDS {
        let coerced = coerce(SqlValue::Text(None), kind).unwrap();
        assert_eq!(coerced.kind(), kind);
        assert!(coerced.is_null());
    }
}

#[test]
fn test_integer_column_into_decimal_field() {
    let coerced = coerce(SqlValue::Int(Some(10)), FieldKind::Decimal).unwrap();

    assert_eq!(coerced, SqlValue::Decimal(Some(dec!(10))));
}

#[test]
fn test_numeric_column_into_double_field() {
    let coerced = coerce(SqlValue::Decimal(Some(dec!(12.5))), FieldKind::Double).unwrap();

    assert_eq!(coerced, SqlValue::Double(Some(12.5)));
}

#[test]
fn test_integer_into_bool_is_nonzero() {
    assert_eq!(coerce(SqlValue::Int(Some(0)), FieldKind::Bool).unwrap(), SqlValue::Bool(Some(false)));
    assert_eq!(coerce(SqlValue::BigInt(Some(-3)), FieldKind::Bool).unwrap(), SqlValue::Bool(Some(true)));
}

#[test]
fn test_date_and_date_time_interconvert() {
    let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();

    assert_eq!(coerce(SqlValue::Date(Some(date)), FieldKind::DateTime).unwrap(), SqlValue::DateTime(Some(midnight)));
    assert_eq!(coerce(SqlValue::DateTime(Some(midnight)), FieldKind::Date).unwrap(), SqlValue::Date(Some(date)));
}

#[test]
fn test_text_into_temporal_kinds() {
    let date = coerce(SqlValue::Text(Some("2020-01-01".to_string())), FieldKind::Date).unwrap();
    assert_eq!(date, SqlValue::Date(NaiveDate::from_ymd_opt(2020, 1, 1)));

    let stamp = coerce(SqlValue::Text(Some("2020-01-01 08:30:00".to_string())), FieldKind::DateTime).unwrap();
    let expected = NaiveDateTime::parse_from_str("2020-01-01T08:30:00", "%Y-%m-%dT%H:%M:%S").unwrap();
    assert_eq!(stamp, SqlValue::DateTime(Some(expected)));
}

#[test]
fn test_malformed_text_is_reported() {
    let err = coerce(SqlValue::Text(Some("01/02/2020".to_string())), FieldKind::Date).unwrap_err();

    assert_eq!(
        err,
        ConversionError::Unparseable { value: "01/02/2020".to_string(), to: FieldKind::Date }
    );
}

#[test]
fn test_bool_into_date_is_incompatible() {
    let err = coerce(SqlValue::Bool(Some(true)), FieldKind::Date).unwrap_err();

    assert!(matches!(err, ConversionError::Incompatible { .. }));
    assert!(err.to_string().contains("bool"));
}

proptest! {
    #[test]
    fn prop_int_widening_preserves_value(v in any::<i32>()) {
        let widened = coerce(SqlValue::Int(Some(v)), FieldKind::BigInt).unwrap();
        prop_assert_eq!(widened, SqlValue::BigInt(Some(i64::from(v))));
    }

    #[test]
    fn prop_integer_text_round_trip(v in any::<i64>()) {
        let text = coerce(SqlValue::BigInt(Some(v)), FieldKind::Text).unwrap();
        let back = coerce(text, FieldKind::BigInt).unwrap();
        prop_assert_eq!(back, SqlValue::BigInt(Some(v)));
    }
}
