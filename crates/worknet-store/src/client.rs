//! Dialect-aware execution shim.
//!
//! A [`Database`] owns one connection pool, SQLite or PostgreSQL, picked
//! from the connection URL. Repositories write SQL once, in SQLite
//! placeholder syntax; when the PostgreSQL pool is active the shim
//! rewrites `?` to `$1..$n` before binding. Autoincrement ids come from
//! `last_insert_rowid()` on SQLite and an appended `RETURNING id` on
//! PostgreSQL. Result rows are normalized into [`SqlRow`]s so callers
//! never touch backend row types.

use std::str::FromStr;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::types::{SqlParam, SqlRow, SqlValue};

/// Default pool size for file/server databases.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which backend a [`Database`] is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgresql",
        }
    }
}

#[derive(Clone)]
enum Pool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

/// Handle to the backing store. Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Connect from a URL. `postgres://` and `postgresql://` select the
    /// PostgreSQL pool; everything else is treated as a SQLite location
    /// (`sqlite://path.db`, a bare path, or `sqlite::memory:`).
    pub async fn connect(url: &str) -> StoreResult<Self> {
        if url.is_empty() {
            return Err(StoreError::UnsupportedUrl("empty database url".to_string()));
        }

        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            let pool = PgPoolOptions::new()
                .max_connections(DEFAULT_MAX_CONNECTIONS)
                .connect(url)
                .await?;
            info!("Connected to PostgreSQL");
            return Ok(Self {
                pool: Pool::Postgres(pool),
            });
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::UnsupportedUrl(format!("{url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database exists per connection; pooling more than
        // one would hand each caller a different empty store.
        let max_connections = if url.contains(":memory:") || url.contains("mode=memory") {
            1
        } else {
            DEFAULT_MAX_CONNECTIONS
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        info!("Connected to SQLite at {}", url);
        Ok(Self {
            pool: Pool::Sqlite(pool),
        })
    }

    /// Connect from `DATABASE_URL`, defaulting to a local SQLite file.
    pub async fn from_env() -> StoreResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://worknet.db".to_string());
        Self::connect(&url).await
    }

    pub fn dialect(&self) -> Dialect {
        match &self.pool {
            Pool::Sqlite(_) => Dialect::Sqlite,
            Pool::Postgres(_) => Dialect::Postgres,
        }
    }

    /// Run a statement, returning the number of affected rows.
    pub async fn execute(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<u64> {
        match &self.pool {
            Pool::Sqlite(pool) => {
                let result = bind_sqlite(sqlx::query(sql), params).execute(pool).await?;
                Ok(result.rows_affected())
            }
            Pool::Postgres(pool) => {
                let sql = rewrite_placeholders(sql);
                let result = bind_pg(sqlx::query(&sql), params).execute(pool).await?;
                Ok(result.rows_affected())
            }
        }
    }

    /// Run a query, returning all rows.
    pub async fn fetch_all(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<Vec<SqlRow>> {
        match &self.pool {
            Pool::Sqlite(pool) => {
                let rows = bind_sqlite(sqlx::query(sql), params).fetch_all(pool).await?;
                rows.iter().map(normalize_sqlite_row).collect()
            }
            Pool::Postgres(pool) => {
                let sql = rewrite_placeholders(sql);
                let rows = bind_pg(sqlx::query(&sql), params).fetch_all(pool).await?;
                rows.iter().map(normalize_pg_row).collect()
            }
        }
    }

    /// Run a query expected to match at most one row.
    pub async fn fetch_optional(
        &self,
        sql: &str,
        params: Vec<SqlParam>,
    ) -> StoreResult<Option<SqlRow>> {
        match &self.pool {
            Pool::Sqlite(pool) => {
                let row = bind_sqlite(sqlx::query(sql), params)
                    .fetch_optional(pool)
                    .await?;
                row.as_ref().map(normalize_sqlite_row).transpose()
            }
            Pool::Postgres(pool) => {
                let sql = rewrite_placeholders(sql);
                let row = bind_pg(sqlx::query(&sql), params)
                    .fetch_optional(pool)
                    .await?;
                row.as_ref().map(normalize_pg_row).transpose()
            }
        }
    }

    /// Run an INSERT and return the new row's autoincrement id.
    ///
    /// The statement must be written without a RETURNING clause; the shim
    /// appends one for PostgreSQL and reads `last_insert_rowid()` on
    /// SQLite.
    pub async fn insert(&self, sql: &str, params: Vec<SqlParam>) -> StoreResult<i64> {
        match &self.pool {
            Pool::Sqlite(pool) => {
                let result = bind_sqlite(sqlx::query(sql), params).execute(pool).await?;
                Ok(result.last_insert_rowid())
            }
            Pool::Postgres(pool) => {
                let sql = format!("{} RETURNING id", rewrite_placeholders(sql));
                let row = bind_pg(sqlx::query(&sql), params).fetch_one(pool).await?;
                Ok(row.try_get::<i64, _>(0)?)
            }
        }
    }

    /// Connectivity probe used by the readiness endpoint.
    pub async fn ping(&self) -> StoreResult<()> {
        self.fetch_optional("SELECT 1 AS one", vec![]).await?;
        Ok(())
    }
}

/// Rewrite `?` placeholders to `$1..$n` for PostgreSQL. Quote-aware:
/// placeholders inside string literals or quoted identifiers survive.
fn rewrite_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut index = 0u32;
    let mut in_string = false;
    let mut in_identifier = false;

    for c in sql.chars() {
        match c {
            '\'' if !in_identifier => {
                in_string = !in_string;
                out.push(c);
            }
            '"' if !in_string => {
                in_identifier = !in_identifier;
                out.push(c);
            }
            '?' if !in_string && !in_identifier => {
                index += 1;
                out.push('$');
                out.push_str(&index.to_string());
            }
            _ => out.push(c),
        }
    }
    out
}

fn bind_sqlite<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    params: Vec<SqlParam>,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    let mut query = query;
    for param in params {
        query = match param {
            SqlParam::Null => query.bind(None::<String>),
            SqlParam::Integer(i) => query.bind(i),
            SqlParam::Real(f) => query.bind(f),
            SqlParam::Text(s) => query.bind(s),
            SqlParam::Bool(b) => query.bind(b),
            SqlParam::Timestamp(t) => query.bind(t),
            SqlParam::Date(d) => query.bind(d),
        };
    }
    query
}

fn bind_pg<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    params: Vec<SqlParam>,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    let mut query = query;
    for param in params {
        query = match param {
            SqlParam::Null => query.bind(None::<String>),
            SqlParam::Integer(i) => query.bind(i),
            SqlParam::Real(f) => query.bind(f),
            SqlParam::Text(s) => query.bind(s),
            SqlParam::Bool(b) => query.bind(b),
            SqlParam::Timestamp(t) => query.bind(t),
            SqlParam::Date(d) => query.bind(d),
        };
    }
    query
}

fn normalize_sqlite_row(row: &SqliteRow) -> StoreResult<SqlRow> {
    let mut columns = std::collections::HashMap::with_capacity(row.len());
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            // SQLite value types are storage classes, not declared types
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get(index)?),
                "REAL" => SqlValue::Real(row.try_get(index)?),
                "TEXT" | "DATETIME" | "DATE" => SqlValue::Text(row.try_get(index)?),
                other => {
                    return Err(StoreError::decode(
                        column.name(),
                        format!("unsupported SQLite type {other}"),
                    ))
                }
            }
        };
        columns.insert(column.name().to_string(), value);
    }
    Ok(SqlRow::new(columns))
}

fn normalize_pg_row(row: &PgRow) -> StoreResult<SqlRow> {
    let mut columns = std::collections::HashMap::with_capacity(row.len());
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            match raw.type_info().name() {
                "BOOL" => SqlValue::Bool(row.try_get(index)?),
                "INT2" => SqlValue::Integer(row.try_get::<i16, _>(index)? as i64),
                "INT4" => SqlValue::Integer(row.try_get::<i32, _>(index)? as i64),
                "INT8" => SqlValue::Integer(row.try_get(index)?),
                "FLOAT4" => SqlValue::Real(row.try_get::<f32, _>(index)? as f64),
                "FLOAT8" => SqlValue::Real(row.try_get(index)?),
                "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => {
                    SqlValue::Text(row.try_get(index)?)
                }
                "TIMESTAMPTZ" => SqlValue::Timestamp(row.try_get(index)?),
                "TIMESTAMP" => {
                    let naive: chrono::NaiveDateTime = row.try_get(index)?;
                    SqlValue::Timestamp(chrono::DateTime::from_naive_utc_and_offset(
                        naive,
                        chrono::Utc,
                    ))
                }
                "DATE" => SqlValue::Date(row.try_get(index)?),
                other => {
                    return Err(StoreError::decode(
                        column.name(),
                        format!("unsupported PostgreSQL type {other}"),
                    ))
                }
            }
        };
        columns.insert(column.name().to_string(), value);
    }
    Ok(SqlRow::new(columns))
}
