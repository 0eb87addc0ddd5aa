//! Database models for tickers and their followers.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::errors::StorageError;
use stock_analyzer_core::errors::{Error, Result};
use stock_analyzer_core::tickers::{NewTicker, Symbol, Ticker, TickerId, UserId};

/// Database model for tickers
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::tickers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TickerDB {
    pub id: String,
    pub symbol: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

impl TickerDB {
    /// Row for a new ticker with a fresh id.
    pub fn from_new(new_ticker: NewTicker) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: new_ticker.symbol.as_str().to_string(),
            display_name: new_ticker.display_name,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn into_ticker(self, follower_count: i64) -> Result<Ticker> {
        let symbol = Symbol::parse(&self.symbol)?;
        let created_at = parse_timestamp(&self.created_at)?;
        Ok(Ticker {
            id: TickerId(self.id),
            symbol,
            display_name: self.display_name,
            follower_count: usize::try_from(follower_count).unwrap_or_default(),
            created_at,
        })
    }
}

/// Accepts RFC 3339 as written by the repository, and SQLite's
/// `CURRENT_TIMESTAMP` form for rows inserted by hand.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            Error::from(StorageError::SerializationError(format!(
                "invalid created_at '{}': {}",
                raw, e
            )))
        })
}

/// Database model for a follow edge
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::ticker_followers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TickerFollowerDB {
    pub ticker_id: String,
    pub user_id: String,
    pub created_at: String,
}

impl TickerFollowerDB {
    pub fn new(ticker_id: &TickerId, user: &UserId) -> Self {
        Self {
            ticker_id: ticker_id.as_str().to_string(),
            user_id: user.as_str().to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
