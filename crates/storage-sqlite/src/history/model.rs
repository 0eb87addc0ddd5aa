//! Database model for daily bars.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use stock_analyzer_core::constants::DATE_FORMAT;
use stock_analyzer_core::errors::{Error, Result};
use stock_analyzer_core::history::{DailyBar, NewDailyBar};
use stock_analyzer_core::tickers::TickerId;

/// Database model for daily bars. Prices are stored as decimal text so that
/// all six fractional digits survive the round trip.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::daily_bars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyBarDB {
    pub id: String,
    pub ticker_id: String,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: i64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl TryFrom<&NewDailyBar> for DailyBarDB {
    type Error = Error;

    fn try_from(bar: &NewDailyBar) -> Result<Self> {
        let volume = i64::try_from(bar.volume).map_err(|_| {
            StorageError::SerializationError(format!(
                "volume {} on {} does not fit a 64-bit integer",
                bar.volume, bar.date
            ))
        })?;
        Ok(Self {
            id: bar.bar_id(),
            ticker_id: bar.ticker_id.as_str().to_string(),
            date: bar.date.format(DATE_FORMAT).to_string(),
            open: bar.open.to_string(),
            high: bar.high.to_string(),
            low: bar.low.to_string(),
            close: bar.close.to_string(),
            volume,
            dividends: bar.dividends,
            stock_splits: bar.stock_splits,
        })
    }
}

impl TryFrom<DailyBarDB> for DailyBar {
    type Error = Error;

    fn try_from(db: DailyBarDB) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&db.date, DATE_FORMAT)?;
        let volume = u64::try_from(db.volume).map_err(|_| {
            StorageError::SerializationError(format!("negative volume in bar {}", db.id))
        })?;
        Ok(Self {
            ticker_id: TickerId(db.ticker_id),
            date,
            open: Decimal::from_str(&db.open)?,
            high: Decimal::from_str(&db.high)?,
            low: Decimal::from_str(&db.low)?,
            close: Decimal::from_str(&db.close)?,
            volume,
            dividends: db.dividends,
            stock_splits: db.stock_splits,
            id: db.id,
        })
    }
}
