//! SQL value model and type coercion
//!
//! A column read from the database arrives as a [`SqlValue`] in its native
//! SQL type. Before it is assigned to a record field it is coerced to the
//! field's [`FieldKind`]. Every variant carries an `Option` so that SQL NULL
//! survives coercion and can be bound back as a typed NULL.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Semantic type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// 64-bit integer
    BigInt,
    /// 32-bit integer
    Int,
    Text,
    Bool,
    /// Calendar date
    Date,
    /// Date-time without zone
    DateTime,
    /// 64-bit float
    Double,
    /// 32-bit float
    Float,
    /// Exact decimal
    Decimal,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::BigInt => "bigint",
            FieldKind::Int => "int",
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Double => "double",
            FieldKind::Float => "float",
            FieldKind::Decimal => "decimal",
        };
        f.write_str(name)
    }
}

/// A single nullable SQL value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    BigInt(Option<i64>),
    Int(Option<i32>),
    Text(Option<String>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
    DateTime(Option<NaiveDateTime>),
    Double(Option<f64>),
    Float(Option<f32>),
    Decimal(Option<Decimal>),
}

/// Errors raised while converting a value between kinds
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("cannot convert {from} to {to}")]
    Incompatible { from: FieldKind, to: FieldKind },

    #[error("value {value} is out of range for {to}")]
    OutOfRange { value: String, to: FieldKind },

    #[error("cannot parse '{value}' as {to}")]
    Unparseable { value: String, to: FieldKind },

    #[error("expected a {expected} value, found {found}")]
    UnexpectedKind { expected: FieldKind, found: FieldKind },

    #[error("column could not be read: {0}")]
    Unreadable(String),
}

impl SqlValue {
    /// Returns the SQL NULL of the given kind
    pub fn null(kind: FieldKind) -> Self {
        match kind {
            FieldKind::BigInt => SqlValue::BigInt(None),
            FieldKind::Int => SqlValue::Int(None),
            FieldKind::Text => SqlValue::Text(None),
            FieldKind::Bool => SqlValue::Bool(None),
            FieldKind::Date => SqlValue::Date(None),
            FieldKind::DateTime => SqlValue::DateTime(None),
            FieldKind::Double => SqlValue::Double(None),
            FieldKind::Float => SqlValue::Float(None),
            FieldKind::Decimal => SqlValue::Decimal(None),
        }
    }

    /// Returns the kind of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            SqlValue::BigInt(_) => FieldKind::BigInt,
            SqlValue::Int(_) => FieldKind::Int,
            SqlValue::Text(_) => FieldKind::Text,
            SqlValue::Bool(_) => FieldKind::Bool,
            SqlValue::Date(_) => FieldKind::Date,
            SqlValue::DateTime(_) => FieldKind::DateTime,
            SqlValue::Double(_) => FieldKind::Double,
            SqlValue::Float(_) => FieldKind::Float,
            SqlValue::Decimal(_) => FieldKind::Decimal,
        }
    }

    /// Returns true if this value is SQL NULL
    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::BigInt(v) => v.is_none(),
            SqlValue::Int(v) => v.is_none(),
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Bool(v) => v.is_none(),
            SqlValue::Date(v) => v.is_none(),
            SqlValue::DateTime(v) => v.is_none(),
            SqlValue::Double(v) => v.is_none(),
            SqlValue::Float(v) => v.is_none(),
            SqlValue::Decimal(v) => v.is_none(),
        }
    }

    /// Renders a non-null value as text, the way a driver's string getter would
    fn render(&self) -> Option<String> {
        match self {
            SqlValue::BigInt(v) => v.map(|v| v.to_string()),
            SqlValue::Int(v) => v.map(|v| v.to_string()),
            SqlValue::Text(v) => v.clone(),
            SqlValue::Bool(v) => v.map(|v| v.to_string()),
            SqlValue::Date(v) => v.map(|v| v.format(DATE_FORMAT).to_string()),
            SqlValue::DateTime(v) => v.map(|v| v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            SqlValue::Double(v) => v.map(|v| v.to_string()),
            SqlValue::Float(v) => v.map(|v| v.to_string()),
            SqlValue::Decimal(v) => v.map(|v| v.to_string()),
        }
    }

    pub fn into_big_int(self) -> Result<Option<i64>, ConversionError> {
        match self {
            SqlValue::BigInt(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::BigInt)),
        }
    }

    pub fn into_int(self) -> Result<Option<i32>, ConversionError> {
        match self {
            SqlValue::Int(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::Int)),
        }
    }

    pub fn into_text(self) -> Result<Option<String>, ConversionError> {
        match self {
            SqlValue::Text(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::Text)),
        }
    }

    pub fn into_bool(self) -> Result<Option<bool>, ConversionError> {
        match self {
            SqlValue::Bool(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::Bool)),
        }
    }

    pub fn into_date(self) -> Result<Option<NaiveDate>, ConversionError> {
        match self {
            SqlValue::Date(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::Date)),
        }
    }

    pub fn into_date_time(self) -> Result<Option<NaiveDateTime>, ConversionError> {
        match self {
            SqlValue::DateTime(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::DateTime)),
        }
    }

    pub fn into_double(self) -> Result<Option<f64>, ConversionError> {
        match self {
            SqlValue::Double(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::Double)),
        }
    }

    pub fn into_float(self) -> Result<Option<f32>, ConversionError> {
        match self {
            SqlValue::Float(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::Float)),
        }
    }

    pub fn into_decimal(self) -> Result<Option<Decimal>, ConversionError> {
        match self {
            SqlValue::Decimal(v) => Ok(v),
            other => Err(other.unexpected(FieldKind::Decimal)),
        }
    }

    fn unexpected(&self, expected: FieldKind) -> ConversionError {
        ConversionError::UnexpectedKind {
            expected,
            found: self.kind(),
        }
    }
}

/// Coerces a value to the requested kind
///
/// NULL of any kind becomes NULL of the target kind. Conversions that lose
/// information silently (a fractional decimal into an integer, an integer
/// outside the target range) are rejected instead.
///
/// # Errors
///
/// Returns a [`ConversionError`] when no sensible conversion exists.
pub fn coerce(value: SqlValue, kind: FieldKind) -> Result<SqlValue, ConversionError> {
    if value.kind() == kind {
        return Ok(value);
    }
    if value.is_null() {
        return Ok(SqlValue::null(kind));
    }

    let from = value.kind();
    let incompatible = || ConversionError::Incompatible { from, to: kind };

    if kind == FieldKind::Text {
        return Ok(SqlValue::Text(value.render()));
    }

    match (value, kind) {
        (SqlValue::Text(Some(text)), _) => parse_text(&text, kind),

        (SqlValue::Int(Some(v)), FieldKind::BigInt) => Ok(SqlValue::BigInt(Some(i64::from(v)))),
        (SqlValue::BigInt(Some(v)), FieldKind::Int) => i32::try_from(v)
            .map(|v| SqlValue::Int(Some(v)))
            .map_err(|_| out_of_range(v, kind)),

        (SqlValue::BigInt(Some(v)), FieldKind::Double) => Ok(SqlValue::Double(Some(v as f64))),
        (SqlValue::Int(Some(v)), FieldKind::Double) => Ok(SqlValue::Double(Some(f64::from(v)))),
        (SqlValue::BigInt(Some(v)), FieldKind::Float) => Ok(SqlValue::Float(Some(v as f32))),
        (SqlValue::Int(Some(v)), FieldKind::Float) => Ok(SqlValue::Float(Some(v as f32))),
        (SqlValue::BigInt(Some(v)), FieldKind::Decimal) => Ok(SqlValue::Decimal(Some(Decimal::from(v)))),
        (SqlValue::Int(Some(v)), FieldKind::Decimal) => Ok(SqlValue::Decimal(Some(Decimal::from(v)))),

        (SqlValue::BigInt(Some(v)), FieldKind::Bool) => Ok(SqlValue::Bool(Some(v != 0))),
        (SqlValue::Int(Some(v)), FieldKind::Bool) => Ok(SqlValue::Bool(Some(v != 0))),
        (SqlValue::Bool(Some(v)), FieldKind::BigInt) => Ok(SqlValue::BigInt(Some(i64::from(v)))),
        (SqlValue::Bool(Some(v)), FieldKind::Int) => Ok(SqlValue::Int(Some(i32::from(v)))),

        (SqlValue::Decimal(Some(v)), FieldKind::BigInt) => integral_decimal(v, kind)
            .and_then(|d| d.to_i64().ok_or_else(|| out_of_range(d, kind)))
            .map(|v| SqlValue::BigInt(Some(v))),
        (SqlValue::Decimal(Some(v)), FieldKind::Int) => integral_decimal(v, kind)
            .and_then(|d| d.to_i32().ok_or_else(|| out_of_range(d, kind)))
            .map(|v| SqlValue::Int(Some(v))),
        (SqlValue::Decimal(Some(v)), FieldKind::Double) => v
            .to_f64()
            .map(|v| SqlValue::Double(Some(v)))
            .ok_or_else(|| out_of_range(v, kind)),
        (SqlValue::Decimal(Some(v)), FieldKind::Float) => v
            .to_f32()
            .map(|v| SqlValue::Float(Some(v)))
            .ok_or_else(|| out_of_range(v, kind)),

        (SqlValue::Double(Some(v)), FieldKind::Float) => Ok(SqlValue::Float(Some(v as f32))),
        (SqlValue::Float(Some(v)), FieldKind::Double) => Ok(SqlValue::Double(Some(f64::from(v)))),
        (SqlValue::Double(Some(v)), FieldKind::Decimal) => Decimal::from_f64(v)
            .map(|d| SqlValue::Decimal(Some(d)))
            .ok_or_else(|| out_of_range(v, kind)),
        (SqlValue::Float(Some(v)), FieldKind::Decimal) => Decimal::from_f32(v)
            .map(|d| SqlValue::Decimal(Some(d)))
            .ok_or_else(|| out_of_range(v, kind)),
        (SqlValue::Double(Some(v)), FieldKind::BigInt) => integral_float(v, kind)
            .map(|v| SqlValue::BigInt(Some(v))),
        (SqlValue::Double(Some(v)), FieldKind::Int) => integral_float(v, kind)
            .and_then(|v| i32::try_from(v).map_err(|_| out_of_range(v, kind)))
            .map(|v| SqlValue::Int(Some(v))),

        (SqlValue::DateTime(Some(v)), FieldKind::Date) => Ok(SqlValue::Date(Some(v.date()))),
        (SqlValue::Date(Some(v)), FieldKind::DateTime) => {
            Ok(SqlValue::DateTime(Some(v.and_time(NaiveTime::MIN))))
        }

        _ => Err(incompatible()),
    }
}

fn parse_text(text: &str, kind: FieldKind) -> Result<SqlValue, ConversionError> {
    let trimmed = text.trim();
    let unparseable = || ConversionError::Unparseable {
        value: text.to_string(),
        to: kind,
    };

    match kind {
        FieldKind::BigInt => trimmed.parse().map(|v| SqlValue::BigInt(Some(v))).map_err(|_| unparseable()),
        FieldKind::Int => trimmed.parse().map(|v| SqlValue::Int(Some(v))).map_err(|_| unparseable()),
        FieldKind::Double => trimmed.parse().map(|v| SqlValue::Double(Some(v))).map_err(|_| unparseable()),
        FieldKind::Float => trimmed.parse().map(|v| SqlValue::Float(Some(v))).map_err(|_| unparseable()),
        FieldKind::Decimal => trimmed.parse().map(|v| SqlValue::Decimal(Some(v))).map_err(|_| unparseable()),
        FieldKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Ok(SqlValue::Bool(Some(true))),
            "false" | "f" | "0" | "no" | "n" => Ok(SqlValue::Bool(Some(false))),
            _ => Err(unparseable()),
        },
        FieldKind::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(|v| SqlValue::Date(Some(v)))
            .map_err(|_| unparseable()),
        FieldKind::DateTime => DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|v| SqlValue::DateTime(Some(v)))
            .ok_or_else(unparseable),
        FieldKind::Text => Ok(SqlValue::Text(Some(text.to_string()))),
    }
}

fn integral_decimal(value: Decimal, kind: FieldKind) -> Result<Decimal, ConversionError> {
    if value.fract().is_zero() {
        Ok(value)
    } else {
        Err(out_of_range(value, kind))
    }
}

fn integral_float(value: f64, kind: FieldKind) -> Result<i64, ConversionError> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(out_of_range(value, kind))
    }
}

fn out_of_range(value: impl fmt::Display, to: FieldKind) -> ConversionError {
    ConversionError::OutOfRange {
        value: value.to_string(),
        to,
    }
}
