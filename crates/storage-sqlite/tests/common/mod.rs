#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use stock_analyzer_core::history::PriceRecord;
use stock_analyzer_core::tickers::Symbol;
use stock_analyzer_core::tracking::{FetchedHistory, HistoryProvider, HistoryWindow};
use stock_analyzer_core::{Error, Result};
use stock_analyzer_storage_sqlite::{ServiceContext, StorageConfig};
use tempfile::TempDir;

/// Opens a fresh database under a temp directory; keep the `TempDir` alive
/// for the duration of the test.
pub fn open_context() -> (ServiceContext, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("db").join("app.db");
    let config = StorageConfig::new(db_path.to_string_lossy().to_string());
    let context = ServiceContext::open(&config).expect("Failed to open service context");
    (context, temp_dir)
}

/// Weekday records from `start` to `end` inclusive, closing at `base + n/100`.
pub fn weekday_series(start: NaiveDate, end: NaiveDate, base: Decimal) -> Vec<PriceRecord> {
    let mut records = Vec::new();
    let mut date = start;
    let mut n: i64 = 0;
    while date <= end {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let close = base + Decimal::new(n, 2);
            records.push(PriceRecord::new(date, close, close, close, close, 1_000 + n as u64));
            n += 1;
        }
        date += Duration::days(1);
    }
    records
}

/// Provider serving canned histories and counting fetches.
#[derive(Default)]
pub struct StaticProvider {
    histories: Vec<(String, FetchedHistory)>,
    fetches: Mutex<usize>,
    failing: bool,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, symbol: &str, name: Option<&str>, records: Vec<PriceRecord>) -> Self {
        self.histories.push((
            symbol.to_ascii_lowercase(),
            FetchedHistory {
                display_name: name.map(str::to_string),
                records,
            },
        ));
        self
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl HistoryProvider for StaticProvider {
    fn id(&self) -> &'static str {
        "STATIC"
    }

    fn daily_history(&self, symbol: &Symbol, _window: HistoryWindow) -> Result<FetchedHistory> {
        *self.fetches.lock().unwrap() += 1;
        if self.failing {
            return Err(Error::Provider("service unavailable".to_string()));
        }
        Ok(self
            .histories
            .iter()
            .find(|(s, _)| s == symbol.as_str())
            .map(|(_, h)| h.clone())
            .unwrap_or_default())
    }
}
