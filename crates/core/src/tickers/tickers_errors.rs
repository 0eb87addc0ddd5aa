//! Ticker registry error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickerError {
    #[error("Ticker '{0}' is already registered")]
    Duplicate(String),

    #[error("Ticker '{0}' is not registered")]
    NotFound(String),

    #[error("Invalid ticker symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),

    #[error("Ticker '{symbol}' is not followed by user '{user}'")]
    NotFollowed { symbol: String, user: String },
}
