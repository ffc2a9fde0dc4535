//! Custom Test Assertions
//!
//! Compare records field by field through their field tables, so a failure
//! names the column that differs instead of dumping both structs.

use core_kernel::Record;

/// Asserts that two records agree on every data field, ignoring identifiers
///
/// # Panics
///
/// Panics naming the first field whose values differ
pub fn assert_same_data<R: Record>(actual: &R, expected: &R) {
    for mapping in R::writable_fields() {
        let got = (mapping.get)(actual);
        let want = (mapping.get)(expected);
        assert_eq!(
            got, want,
            "{}.{} differs: actual={:?}, expected={:?}",
            R::ENTITY, mapping.field, got, want
        );
    }
}

/// Asserts that a record carries a store-assigned identifier
///
/// # Panics
///
/// Panics if the identifier is unset or not positive
pub fn assert_has_identifier<R: Record>(record: &R) -> i64 {
    match record.identifier() {
        Some(id) if id > 0 => id,
        other => panic!("Expected {} to carry a positive identifier, got {:?}", R::ENTITY, other),
    }
}

/// Asserts that a created record echoes its input plus an identifier
///
/// Returns the identifier.
pub fn assert_created_from<R: Record>(created: &R, input: &R) -> i64 {
    assert_same_data(created, input);
    assert_has_identifier(created)
}
