//! Price history error types.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// The fetched time series had no rows. Callers treat the symbol as
    /// unknown or delisted.
    #[error("No price history available for '{0}'")]
    Empty(String),

    #[error("Duplicate record for {0} in the same history")]
    DuplicateDate(NaiveDate),

    #[error("Invalid record for {date}: {reason}")]
    InvalidRecord { date: NaiveDate, reason: String },
}
