//! Daily price history models.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DATE_FORMAT;
use crate::tickers::TickerId;

/// One day of a fetched time series, as handed over by a market-data client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
    #[serde(default)]
    pub dividends: f64,
    /// Split ratio of the day, 0 when there was no split.
    #[serde(default)]
    pub stock_splits: f64,
}

impl PriceRecord {
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    pub fn with_dividends(mut self, dividends: f64) -> Self {
        self.dividends = dividends;
        self
    }

    pub fn with_stock_splits(mut self, ratio: f64) -> Self {
        self.stock_splits = ratio;
        self
    }
}

/// Input model for persisting a bar. Prices are already normalized to six
/// fractional digits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDailyBar {
    pub ticker_id: TickerId,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl NewDailyBar {
    pub fn from_record(ticker_id: TickerId, record: PriceRecord) -> Self {
        Self {
            ticker_id,
            date: record.date,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
            dividends: record.dividends,
            stock_splits: record.stock_splits,
        }
    }

    /// Row identity: one bar per ticker and day.
    pub fn bar_id(&self) -> String {
        format!("{}_{}", self.ticker_id, self.date.format(DATE_FORMAT))
    }
}

/// A persisted day of trading data for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBar {
    pub id: String,
    pub ticker_id: TickerId,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl DailyBar {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Outcome of a successful ingest call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub ticker_id: TickerId,
    pub rows_written: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}
