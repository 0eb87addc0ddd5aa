use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::history_errors::HistoryError;
use super::history_model::{DailyBar, IngestReport, NewDailyBar, PriceRecord};
use super::history_traits::{HistoryIngestorTrait, HistoryRepositoryTrait};
use crate::constants::{PRICE_MAX_DIGITS, PRICE_SCALE};
use crate::errors::Result;
use crate::tickers::{TickerError, TickerId, TickerRepositoryTrait};

/// Turns fetched time series into persisted daily bars.
pub struct HistoryIngestor {
    tickers: Arc<dyn TickerRepositoryTrait>,
    repository: Arc<dyn HistoryRepositoryTrait>,
}

impl HistoryIngestor {
    pub fn new(
        tickers: Arc<dyn TickerRepositoryTrait>,
        repository: Arc<dyn HistoryRepositoryTrait>,
    ) -> Self {
        Self {
            tickers,
            repository,
        }
    }
}

impl HistoryIngestorTrait for HistoryIngestor {
    fn ingest(&self, ticker_id: &TickerId, records: &[PriceRecord]) -> Result<IngestReport> {
        if records.is_empty() {
            return Err(HistoryError::Empty(ticker_id.to_string()).into());
        }

        let ticker = self
            .tickers
            .get_by_id(ticker_id)?
            .ok_or_else(|| TickerError::NotFound(ticker_id.to_string()))?;

        let bars: Vec<NewDailyBar> = normalize_records(records)?
            .into_iter()
            .map(|record| NewDailyBar::from_record(ticker_id.clone(), record))
            .collect();

        let (first_date, last_date) = bars
            .iter()
            .skip(1)
            .fold((bars[0].date, bars[0].date), |(lo, hi), bar| {
                (lo.min(bar.date), hi.max(bar.date))
            });

        debug!(
            "Ingesting {} bars for {} ({} to {})",
            bars.len(),
            ticker.symbol,
            first_date,
            last_date
        );
        let rows_written = self.repository.insert_bars(&bars)?;
        info!("Ingested {} bars for {}", rows_written, ticker.symbol);

        Ok(IngestReport {
            ticker_id: ticker_id.clone(),
            rows_written,
            first_date,
            last_date,
        })
    }

    fn bars(&self, ticker_id: &TickerId) -> Result<Vec<DailyBar>> {
        self.repository.list_for_ticker(ticker_id)
    }

    fn bar_count(&self, ticker_id: &TickerId) -> Result<usize> {
        self.repository.count_for_ticker(ticker_id)
    }
}

/// Validates a fetched time series and normalizes prices to the stored scale.
///
/// Every record is checked before anything is written, so a bad row rejects
/// the whole series. Dates must be unique within the series.
pub fn normalize_records(
    records: &[PriceRecord],
) -> std::result::Result<Vec<PriceRecord>, HistoryError> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| {
            if !seen.insert(record.date) {
                return Err(HistoryError::DuplicateDate(record.date));
            }
            normalize_record(record)
        })
        .collect()
}

fn normalize_record(record: &PriceRecord) -> std::result::Result<PriceRecord, HistoryError> {
    let invalid = |reason: String| HistoryError::InvalidRecord {
        date: record.date,
        reason,
    };

    if record.volume > i64::MAX as u64 {
        return Err(invalid(format!("volume {} is out of range", record.volume)));
    }
    for (field, value) in [
        ("dividends", record.dividends),
        ("stock splits", record.stock_splits),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!("{} must be a non-negative number", field)));
        }
    }

    Ok(PriceRecord {
        open: normalize_price("open", record.open).map_err(invalid)?,
        high: normalize_price("high", record.high).map_err(invalid)?,
        low: normalize_price("low", record.low).map_err(invalid)?,
        close: normalize_price("close", record.close).map_err(invalid)?,
        ..record.clone()
    })
}

/// Rounds to six fractional digits (banker's rounding) and checks the value
/// fits `DECIMAL(20, 6)`.
fn normalize_price(field: &str, value: Decimal) -> std::result::Result<Decimal, String> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(format!("{} price {} is negative", field, value));
    }

    let mut rounded = value.round_dp(PRICE_SCALE);
    rounded.rescale(PRICE_SCALE);

    let limit = Decimal::from(10u64.pow(PRICE_MAX_DIGITS - PRICE_SCALE));
    if rounded >= limit {
        return Err(format!(
            "{} price {} exceeds {} digits",
            field, value, PRICE_MAX_DIGITS
        ));
    }
    Ok(rounded)
}
