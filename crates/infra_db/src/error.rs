//! Driver error translation
//!
//! Maps sqlx failures onto the kernel's `StoreError`, keyed on PostgreSQL
//! error codes where the driver surfaces them.

use core_kernel::StoreError;

/// Converts a sqlx error into the store port's error type
pub(crate) fn store_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => StoreError::Connection(error.to_string()),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL error codes
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Duplicate(db_err.message().to_string()),
                Some("23503") | Some("23514") => {
                    StoreError::Constraint(db_err.message().to_string())
                }
                _ => StoreError::Query(db_err.message().to_string()),
            }
        }
        _ => StoreError::Query(error.to_string()),
    }
}
