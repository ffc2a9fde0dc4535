//! Row mapper
//!
//! Converts one result row into a record by walking the record's field table.
//! For each field the column name is derived with the camelCase to snake_case
//! rule; a missing column leaves the field unset, a present column is read in
//! its native SQL type and coerced to the field's kind.
//!
//! A column that exists but cannot be converted produces a [`ConversionSkip`].
//! What happens next is a policy decision made by [`RowMapper`]:
//! - [`MappingPolicy::Lenient`] leaves the field unset and logs a warning
//! - [`MappingPolicy::Strict`] fails the whole row

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo};
use tracing::warn;

use core_kernel::{coerce, ConversionError, Record, SqlValue};

use crate::error::DatabaseError;

/// A source of named column values
///
/// Implemented for PostgreSQL rows; tests implement it over plain maps.
pub trait ColumnSource {
    /// Returns true if the row has a column with this name
    fn has_column(&self, column: &str) -> bool;

    /// Reads a column in its native SQL type
    ///
    /// # Errors
    ///
    /// `ConversionError::Unreadable` if the driver cannot decode the column
    fn read_value(&self, column: &str) -> Result<SqlValue, ConversionError>;
}

impl ColumnSource for PgRow {
    fn has_column(&self, column: &str) -> bool {
        self.columns().iter().any(|c| c.name() == column)
    }

    fn read_value(&self, column: &str) -> Result<SqlValue, ConversionError> {
        let type_name = self
            .try_column(column)
            .map_err(unreadable)?
            .type_info()
            .name()
            .to_string();

        let value = match type_name.as_str() {
            "INT8" => SqlValue::BigInt(self.try_get::<Option<i64>, _>(column).map_err(unreadable)?),
            "INT4" => SqlValue::Int(self.try_get::<Option<i32>, _>(column).map_err(unreadable)?),
            "INT2" => SqlValue::Int(
                self.try_get::<Option<i16>, _>(column)
                    .map_err(unreadable)?
                    .map(i32::from),
            ),
            "BOOL" => SqlValue::Bool(self.try_get::<Option<bool>, _>(column).map_err(unreadable)?),
            "FLOAT8" => SqlValue::Double(self.try_get::<Option<f64>, _>(column).map_err(unreadable)?),
            "FLOAT4" => SqlValue::Float(self.try_get::<Option<f32>, _>(column).map_err(unreadable)?),
            "NUMERIC" => SqlValue::Decimal(self.try_get::<Option<Decimal>, _>(column).map_err(unreadable)?),
            "DATE" => SqlValue::Date(self.try_get::<Option<NaiveDate>, _>(column).map_err(unreadable)?),
            "TIMESTAMP" => SqlValue::DateTime(
                self.try_get::<Option<NaiveDateTime>, _>(column).map_err(unreadable)?,
            ),
            "TIMESTAMPTZ" => SqlValue::DateTime(
                self.try_get::<Option<DateTime<Utc>>, _>(column)
                    .map_err(unreadable)?
                    .map(|ts| ts.naive_utc()),
            ),
            // TEXT, VARCHAR, BPCHAR, NAME; anything else fails to decode here
            _ => SqlValue::Text(self.try_get::<Option<String>, _>(column).map_err(unreadable)?),
        };

        Ok(value)
    }
}

fn unreadable(error: sqlx::Error) -> ConversionError {
    ConversionError::Unreadable(error.to_string())
}

/// What to do with a column that exists but cannot be mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingPolicy {
    /// Leave the field unset and log a warning
    #[default]
    Lenient,
    /// Fail the row
    Strict,
}

/// A field that was left unset because its column could not be converted
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSkip {
    pub field: &'static str,
    pub column: String,
    pub reason: ConversionError,
}

/// A mapped record together with the fields that were skipped
#[derive(Debug)]
pub struct MappedRow<R> {
    pub record: R,
    pub skipped: Vec<ConversionSkip>,
}

impl<R> MappedRow<R> {
    /// Returns true if every present column was mapped
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Maps one row onto a fresh record, collecting every per-field failure
pub fn map_row<R, S>(row: &S) -> MappedRow<R>
where
    R: Record,
    S: ColumnSource + ?Sized,
{
    let mut record = R::default();
    let mut skipped = Vec::new();

    for mapping in R::fields() {
        let column = mapping.column();
        if !row.has_column(&column) {
            continue;
        }

        let outcome = row
            .read_value(&column)
            .and_then(|value| coerce(value, mapping.kind))
            .and_then(|value| (mapping.set)(&mut record, value));

        if let Err(error) = outcome {
            skipped.push(ConversionSkip {
                field: mapping.field,
                column,
                reason: error,
            });
        }
    }

    MappedRow { record, skipped }
}

/// Row mapper applying a [`MappingPolicy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RowMapper {
    policy: MappingPolicy,
}

impl RowMapper {
    pub fn new(policy: MappingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MappingPolicy {
        self.policy
    }

    /// Maps one row
    ///
    /// # Errors
    ///
    /// `DatabaseError::Conversion` for the first skipped field under the strict policy
    pub fn map<R, S>(&self, row: &S) -> Result<R, DatabaseError>
    where
        R: Record,
        S: ColumnSource + ?Sized,
    {
        let MappedRow { record, skipped } = map_row::<R, S>(row);

        if self.policy == MappingPolicy::Strict {
            if let Some(skip) = skipped.into_iter().next() {
                return Err(DatabaseError::Conversion {
                    entity: R::ENTITY.to_string(),
                    column: skip.column,
                    message: skip.reason.to_string(),
                });
            }
            return Ok(record);
        }

        for skip in &skipped {
            warn!(
                entity = R::ENTITY,
                field = skip.field,
                column = %skip.column,
                reason = %skip.reason,
                "Column could not be mapped, field left unset"
            );
        }
        Ok(record)
    }

    /// Maps every row, preserving order
    ///
    /// # Errors
    ///
    /// The first error returned by [`RowMapper::map`]
    pub fn map_all<R, S>(&self, rows: &[S]) -> Result<Vec<R>, DatabaseError>
    where
        R: Record,
        S: ColumnSource,
    {
        rows.iter().map(|row| self.map(row)).collect()
    }
}
