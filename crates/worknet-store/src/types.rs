//! Dialect-neutral values, parameters, and rows.
//!
//! The two backends disagree on surface details: SQLite stores booleans as
//! integers and timestamps as text, PostgreSQL has native types for both.
//! Queries bind [`SqlParam`]s and receive [`SqlRow`]s, and the conversions
//! in this module absorb those differences so repositories never branch on
//! the dialect.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{StoreError, StoreResult};

/// A value read back from either backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// A bind parameter. The shim binds each variant natively on both
/// backends, which is what keeps boolean and timestamp literals out of
/// the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Integer(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Integer(v as i64)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Real(v)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bool(v)
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<&String> for SqlParam {
    fn from(v: &String) -> Self {
        SqlParam::Text(v.clone())
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(v)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(v: NaiveDate) -> Self {
        SqlParam::Date(v)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlParam::Null,
        }
    }
}

/// Build a parameter vector from mixed Rust values.
///
/// ```
/// use worknet_store::params;
/// let p = params!["ana@example.com", true, 42i64];
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        Vec::<$crate::SqlParam>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::SqlParam::from($value)),+]
    };
}

/// Conversion out of a [`SqlValue`], lenient across dialect encodings.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: &SqlValue) -> Option<Self>;
}

impl FromSqlValue for String {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromSqlValue for f64 {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Real(f) => Some(*f),
            // SQLite happily returns 0 for a REAL column holding 0
            SqlValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Bool(b) => Some(*b),
            // SQLite boolean columns come back as 0/1 integers
            SqlValue::Integer(0) => Some(false),
            SqlValue::Integer(_) => Some(true),
            _ => None,
        }
    }
}

impl FromSqlValue for DateTime<Utc> {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Timestamp(t) => Some(*t),
            // SQLite stores timestamps as text. Accept RFC 3339, the
            // space-separated offset form sqlx writes, and the bare form
            // CURRENT_TIMESTAMP produces (taken as UTC).
            SqlValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z"))
                .map(|t| t.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                        .ok()
                        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
                }),
            _ => None,
        }
    }
}

impl FromSqlValue for NaiveDate {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Date(d) => Some(*d),
            SqlValue::Timestamp(t) => Some(t.date_naive()),
            SqlValue::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        }
    }
}

/// A normalized row: column name to value.
#[derive(Debug, Clone, Default)]
pub struct SqlRow {
    columns: HashMap<String, SqlValue>,
}

impl SqlRow {
    pub fn new(columns: HashMap<String, SqlValue>) -> Self {
        Self { columns }
    }

    /// Raw access to a column value.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    /// Typed access to a NOT NULL column. Missing columns, NULLs, and
    /// type mismatches are all decode errors.
    pub fn try_get<T: FromSqlValue>(&self, column: &str) -> StoreResult<T> {
        let value = self
            .columns
            .get(column)
            .ok_or_else(|| StoreError::decode(column, "column missing from result row"))?;
        T::from_sql_value(value)
            .ok_or_else(|| StoreError::decode(column, format!("cannot decode from {value:?}")))
    }

    /// Typed access to a nullable column: NULL becomes `None`, but a
    /// missing column or a type mismatch is still an error.
    pub fn get_opt<T: FromSqlValue>(&self, column: &str) -> StoreResult<Option<T>> {
        let value = self
            .columns
            .get(column)
            .ok_or_else(|| StoreError::decode(column, "column missing from result row"))?;
        if value.is_null() {
            return Ok(None);
        }
        T::from_sql_value(value)
            .map(Some)
            .ok_or_else(|| StoreError::decode(column, format!("cannot decode from {value:?}")))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
