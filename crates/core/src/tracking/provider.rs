//! Seam to the external market-data client.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HISTORY_YEARS;
use crate::errors::Result;
use crate::history::PriceRecord;
use crate::tickers::Symbol;

/// How much daily history to request when a ticker is first tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryWindow {
    #[default]
    FiveYears,
    Years(u32),
    Max,
}

impl HistoryWindow {
    /// Number of years covered, `None` for the provider's full history.
    pub fn years(&self) -> Option<u32> {
        match self {
            HistoryWindow::FiveYears => Some(DEFAULT_HISTORY_YEARS),
            HistoryWindow::Years(n) => Some(*n),
            HistoryWindow::Max => None,
        }
    }

    /// First day covered by the window when it ends on `today`.
    pub fn start_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let years = self.years()?;
        today.checked_sub_months(Months::new(years.saturating_mul(12)))
    }
}

/// Daily history as returned by a provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedHistory {
    /// Company name, when the provider knows it.
    pub display_name: Option<String>,
    /// Daily records in ascending date order. Empty for unknown or delisted
    /// symbols.
    pub records: Vec<PriceRecord>,
}

/// A market-data client able to fetch daily OHLCV history.
///
/// Implementations live outside this crate. Retries and rate limiting belong
/// to the implementation; failures are reported as `Error::Provider`.
pub trait HistoryProvider: Send + Sync {
    /// Identifier used in logs, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    fn daily_history(&self, symbol: &Symbol, window: HistoryWindow) -> Result<FetchedHistory>;
}
