//! History module - daily price bars, ingestion and per-year reshaping.

mod history_errors;
mod history_model;
mod history_service;
mod history_traits;
mod year_split;


pub use history_errors::HistoryError;
pub use history_model::{DailyBar, IngestReport, NewDailyBar, PriceRecord};
pub use history_service::{normalize_records, HistoryIngestor};
pub use history_traits::{HistoryIngestorTrait, HistoryRepositoryTrait};
pub use year_split::{split_by_year, YearSlice, YearSplit};
