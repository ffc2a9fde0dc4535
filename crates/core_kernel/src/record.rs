//! Static field tables
//!
//! A [`Record`] describes how it maps onto its table through a static list of
//! [`FieldMapping`] entries: the camelCase field name, its [`FieldKind`], its
//! role, and a getter/setter pair working in [`SqlValue`]s. The row mapper and
//! the reflective update builder walk this table instead of inspecting types
//! at runtime, so a renamed or retyped field is a compile error rather than a
//! silently skipped column.

use std::fmt;

use crate::naming::camel_to_snake;
use crate::value::{ConversionError, FieldKind, SqlValue};

/// How a field participates in SQL statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// The server-generated key; never inserted or updated
    Identifier,
    /// A regular persisted column
    Data,
    /// Bookkeeping that is read back but never written
    Internal,
}

/// One entry of a record's field table
pub struct FieldMapping<R> {
    /// Field name as it appears on the record (camelCase)
    pub field: &'static str,
    pub kind: FieldKind,
    pub role: FieldRole,
    /// Reads the field as a value of `kind`
    pub get: fn(&R) -> SqlValue,
    /// Writes a value already coerced to `kind`
    pub set: fn(&mut R, SqlValue) -> Result<(), ConversionError>,
}

impl<R> FieldMapping<R> {
    /// Returns the column this field is stored in
    pub fn column(&self) -> String {
        camel_to_snake(self.field)
    }

    /// Returns true if the field is written by INSERT and UPDATE statements
    pub fn is_writable(&self) -> bool {
        self.role == FieldRole::Data
    }
}

impl<R> fmt::Debug for FieldMapping<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("role", &self.role)
            .finish()
    }
}

/// A persisted record with a static field table
pub trait Record: Default + Clone + Send + Sync + 'static {
    /// Entity name used in messages (e.g. "Employee")
    const ENTITY: &'static str;
    /// Backing table name
    const TABLE: &'static str;

    /// Returns the field table, in declaration order
    fn fields() -> &'static [FieldMapping<Self>];

    /// Returns the raw identifier, if one has been assigned
    fn identifier(&self) -> Option<i64>;

    /// Attaches a store-assigned identifier
    fn assign_identifier(&mut self, id: i64);

    /// Returns the identifier column name
    fn identifier_column() -> String {
        Self::fields()
            .iter()
            .find(|mapping| mapping.role == FieldRole::Identifier)
            .map(FieldMapping::column)
            .unwrap_or_else(|| "id".to_string())
    }

    /// Returns the writable fields in declaration order
    fn writable_fields() -> Vec<&'static FieldMapping<Self>> {
        Self::fields().iter().filter(|mapping| mapping.is_writable()).collect()
    }
}
