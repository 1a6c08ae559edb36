//! # Database Errors
//!
//! Error types for database operations.
//!
//! ## Error Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error                         DbError                            │
//! │  ───────────                         ───────                            │
//! │  RowNotFound                    ──►  NotFound                           │
//! │  "UNIQUE constraint failed"     ──►  UniqueViolation                    │
//! │  "CHECK constraint failed"      ──►  ConstraintViolation                │
//! │  other database error           ──►  QueryFailed                        │
//! │  PoolTimedOut                   ──►  PoolExhausted                      │
//! │  PoolClosed                     ──►  ConnectionFailed                   │
//! │  anything else                  ──►  Internal                           │
//! │                                                                         │
//! │  bad JSON in a TEXT column      ──►  CorruptData { column }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sindean_core::cart::CartStoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Primary key or unique index collision.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A CHECK constraint rejected the row (bad enum value, negative price).
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// A stored JSON column could not be decoded (or a value not encoded).
    #[error("Corrupt data in column {column}: {reason}")]
    CorruptData { column: String, reason: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn corrupt(column: impl Into<String>, reason: impl ToString) -> Self {
        DbError::CorruptData {
            column: column.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::ColumnDecode { index, source } => {
                DbError::corrupt(index, source)
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Cart storage reports database failures as backend errors.
impl From<DbError> for CartStoreError {
    fn from(err: DbError) -> Self {
        CartStoreError::Backend(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
