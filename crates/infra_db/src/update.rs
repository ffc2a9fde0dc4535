//! UPDATE statement strategies
//!
//! An update overwrites every non-identifier column of one row. Two ways of
//! producing that statement sit behind [`UpdateStrategy`]:
//!
//! - [`FixedColumnUpdate`] pairs a hand-written statement with a binder that
//!   lists the parameters explicitly
//! - [`ReflectiveUpdate`] derives the column list from the record's field
//!   table, skipping the identifier and internal fields
//!
//! Both append the identifier as the last parameter.

use std::fmt;
use std::marker::PhantomData;

use core_kernel::{Record, SqlValue};

/// A ready-to-bind UPDATE statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    /// Values for `$1..$n`; the identifier is last
    pub params: Vec<SqlValue>,
}

/// Builds the UPDATE statement for one record
pub trait UpdateStrategy<R: Record>: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Builds the statement that overwrites row `id` with `record`
    fn build(&self, id: i64, record: &R) -> UpdateStatement;
}

/// A hand-written UPDATE statement with an explicit parameter binder
pub struct FixedColumnUpdate<R> {
    sql: &'static str,
    bind: fn(&R) -> Vec<SqlValue>,
}

impl<R> FixedColumnUpdate<R> {
    /// `sql` must end with `WHERE id = $n` where `n` is one past the binder's output
    pub const fn new(sql: &'static str, bind: fn(&R) -> Vec<SqlValue>) -> Self {
        Self { sql, bind }
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }
}

impl<R> fmt::Debug for FixedColumnUpdate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedColumnUpdate").field("sql", &self.sql).finish()
    }
}

impl<R: Record> UpdateStrategy<R> for FixedColumnUpdate<R> {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn build(&self, id: i64, record: &R) -> UpdateStatement {
        let mut params = (self.bind)(record);
        params.push(SqlValue::BigInt(Some(id)));
        UpdateStatement {
            sql: self.sql.to_string(),
            params,
        }
    }
}

/// UPDATE derived from the record's field table
pub struct ReflectiveUpdate<R> {
    _record: PhantomData<fn() -> R>,
}

impl<R> ReflectiveUpdate<R> {
    pub const fn new() -> Self {
        Self { _record: PhantomData }
    }
}

impl<R> Default for ReflectiveUpdate<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for ReflectiveUpdate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReflectiveUpdate")
    }
}

impl<R: Record> ReflectiveUpdate<R> {
    /// Returns the statement text this strategy produces for `R`
    pub fn sql(&self) -> String {
        let id_column = R::identifier_column();
        let writable = R::writable_fields();

        let assignments = if writable.is_empty() {
            // Still a valid statement, and still reports whether the row exists
            format!("{id_column} = {id_column}")
        } else {
            writable
                .iter()
                .enumerate()
                .map(|(i, mapping)| format!("{} = ${}", mapping.column(), i + 1))
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            R::TABLE,
            assignments,
            id_column,
            writable.len() + 1
        )
    }
}

impl<R: Record> UpdateStrategy<R> for ReflectiveUpdate<R> {
    fn name(&self) -> &'static str {
        "reflective"
    }

    fn build(&self, id: i64, record: &R) -> UpdateStatement {
        let mut params: Vec<SqlValue> = R::writable_fields()
            .iter()
            .map(|mapping| (mapping.get)(record))
            .collect();
        params.push(SqlValue::BigInt(Some(id)));

        UpdateStatement {
            sql: self.sql(),
            params,
        }
    }
}
