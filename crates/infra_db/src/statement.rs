//! Statement execution helpers
//!
//! Binds [`SqlValue`] parameters onto SQLx queries and runs the handful of
//! statement shapes the repositories need. Every helper issues exactly one
//! statement on one pooled connection.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use tracing::{debug, warn};

use core_kernel::{Record, SqlValue};

use crate::error::DatabaseError;
use crate::mapper::RowMapper;
use crate::pool::DatabasePool;

pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Binds one value, keeping the SQL type of NULLs
pub fn bind_value(query: PgQuery<'_>, value: SqlValue) -> PgQuery<'_> {
    match value {
        SqlValue::BigInt(v) => query.bind(v),
        SqlValue::Int(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Bool(v) => query.bind(v),
        SqlValue::Date(v) => query.bind(v),
        SqlValue::DateTime(v) => query.bind(v),
        SqlValue::Double(v) => query.bind(v),
        SqlValue::Float(v) => query.bind(v),
        SqlValue::Decimal(v) => query.bind(v),
    }
}

/// Binds values in order as `$1..$n`
pub fn bind_all(sql: &str, params: Vec<SqlValue>) -> PgQuery<'_> {
    params.into_iter().fold(sqlx::query(sql), bind_value)
}

/// Collects the insert parameters of a record: every writable field, in table order
pub fn insert_params<R: Record>(record: &R) -> Vec<SqlValue> {
    R::writable_fields().iter().map(|mapping| (mapping.get)(record)).collect()
}

/// Runs a query and maps every returned row
pub async fn fetch_records<R: Record>(
    pool: &DatabasePool,
    mapper: &RowMapper,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<Vec<R>, DatabaseError> {
    let rows: Vec<PgRow> = bind_all(sql, params).fetch_all(pool).await?;
    debug!(entity = R::ENTITY, rows = rows.len(), "Fetched rows");
    mapper.map_all(&rows)
}

/// Runs a keyed query; no row is `DatabaseError::NotFound`
pub async fn fetch_record<R: Record>(
    pool: &DatabasePool,
    mapper: &RowMapper,
    sql: &str,
    id: i64,
) -> Result<R, DatabaseError> {
    let row = sqlx::query(sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found(R::ENTITY, id))?;

    mapper.map(&row)
}

/// Runs an INSERT ... RETURNING statement and reads back the generated key
///
/// Returns `None` when the statement produced no key.
pub async fn insert_returning_id(
    pool: &DatabasePool,
    entity: &str,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<Option<i64>, DatabaseError> {
    let row = bind_all(sql, params).fetch_optional(pool).await?;

    let id = match row {
        Some(row) => row.try_get::<Option<i64>, _>(0)?,
        None => None,
    };

    if id.is_none() {
        warn!(entity, "Insert returned no generated key");
    }
    Ok(id)
}

/// Executes a statement that targets one row; zero rows affected is `NotFound`
pub async fn execute_for_id(
    pool: &DatabasePool,
    entity: &str,
    id: i64,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<(), DatabaseError> {
    let result = bind_all(sql, params).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found(entity, id));
    }

    debug!(entity, id, rows = result.rows_affected(), "Statement applied");
    Ok(())
}
