//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur against either backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("column '{column}': {message}")]
    Decode { column: String, message: String },

    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// True when the error came from a UNIQUE constraint on either backend.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::AlreadyExists(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // Surface unique-constraint violations distinctly so handlers can
        // answer 409 instead of 500. SQLite reports code 2067/1555,
        // PostgreSQL 23505; sqlx folds both into the same error kind.
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return StoreError::AlreadyExists(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}
