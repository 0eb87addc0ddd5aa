use super::history_model::{DailyBar, IngestReport, NewDailyBar, PriceRecord};
use crate::errors::Result;
use crate::tickers::TickerId;

/// Trait defining the contract for price history ingestion and lookup.
pub trait HistoryIngestorTrait: Send + Sync {
    /// Persists one bar per record, all or nothing.
    ///
    /// Re-ingesting a ticker is not deduplicated; records whose date is
    /// already stored make the whole call fail.
    fn ingest(&self, ticker_id: &TickerId, records: &[PriceRecord]) -> Result<IngestReport>;
    /// Bars of a ticker in ascending date order.
    fn bars(&self, ticker_id: &TickerId) -> Result<Vec<DailyBar>>;
    fn bar_count(&self, ticker_id: &TickerId) -> Result<usize>;
}

/// Trait defining the contract for daily bar repository operations.
pub trait HistoryRepositoryTrait: Send + Sync {
    /// Inserts every bar in a single transaction and returns the row count.
    fn insert_bars(&self, bars: &[NewDailyBar]) -> Result<usize>;
    fn list_for_ticker(&self, ticker_id: &TickerId) -> Result<Vec<DailyBar>>;
    fn count_for_ticker(&self, ticker_id: &TickerId) -> Result<usize>;
}
