//! Storage-specific error types for SQLite operations.
//!
//! This module wraps Diesel and r2d2 errors and converts them into the
//! database-agnostic error types defined in `stock_analyzer_core`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use stock_analyzer_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `stock_analyzer_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Stored value could not be decoded: {0}")]
    SerializationError(String),

    /// A domain error raised inside a transaction closure. Kept intact so the
    /// caller sees the original variant once the transaction rolls back.
    #[error("{0}")]
    Core(Box<Error>),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(Box::new(err))
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(DieselError::DatabaseError(_, info))
                if is_sqlite_constraint(info.message()) =>
            {
                // SQLite reports some constraint failures without a specific kind.
                classify_constraint_message(info.message())
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::SerializationError(e) => Error::Database(DatabaseError::Internal(e)),
            StorageError::Core(e) => *e,
        }
    }
}

fn is_sqlite_constraint(message: &str) -> bool {
    message.starts_with("UNIQUE constraint failed")
        || message.starts_with("FOREIGN KEY constraint failed")
}

fn classify_constraint_message(message: &str) -> Error {
    if message.starts_with("UNIQUE") {
        Error::Database(DatabaseError::UniqueViolation(message.to_string()))
    } else {
        Error::Database(DatabaseError::ForeignKeyViolation(message.to_string()))
    }
}

/// Extension trait to convert Diesel errors to core errors.
///
/// `From<DieselError> for Error` is ruled out by the orphan rules, so the
/// conversion goes through `StorageError`.
pub trait DieselErrorExt {
    fn into_core_error(self) -> Error;
}

impl DieselErrorExt for DieselError {
    fn into_core_error(self) -> Error {
        StorageError::QueryFailed(self).into()
    }
}

impl DieselErrorExt for r2d2::Error {
    fn into_core_error(self) -> Error {
        StorageError::PoolError(self).into()
    }
}

impl DieselErrorExt for diesel::ConnectionError {
    fn into_core_error(self) -> Error {
        StorageError::ConnectionFailed(self).into()
    }
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> stock_analyzer_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> stock_analyzer_core::Result<T> {
        self.map_err(|e| e.into_core_error())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> stock_analyzer_core::Result<T> {
        self.map_err(|e| e.into_core_error())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, StorageError> {
    fn into_core(self) -> stock_analyzer_core::Result<T> {
        self.map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_analyzer_core::tickers::TickerError;

    #[test]
    fn test_not_found_maps_to_database_not_found() {
        let err: Error = StorageError::QueryFailed(DieselError::NotFound).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_core_error_survives_round_trip() {
        let original = Error::Ticker(TickerError::NotFound("aapl".to_string()));
        let err: Error = StorageError::from(original).into();
        assert!(matches!(err, Error::Ticker(TickerError::NotFound(ref s)) if s == "aapl"));
    }

    #[test]
    fn test_constraint_message_classification() {
        assert!(matches!(
            classify_constraint_message("UNIQUE constraint failed: tickers.symbol"),
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
        assert!(matches!(
            classify_constraint_message("FOREIGN KEY constraint failed"),
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
        assert!(is_sqlite_constraint("UNIQUE constraint failed: x"));
        assert!(!is_sqlite_constraint("database is locked"));
    }
}
