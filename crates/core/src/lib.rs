//! Stock Analyzer Core - domain entities, services, and traits.
//!
//! This crate contains the ticker registry, the price history ingestion
//! pipeline and the chart data helpers. It is database-agnostic and defines
//! repository traits that are implemented by the `storage-sqlite` crate.

pub mod charts;
pub mod constants;
pub mod errors;
pub mod history;
pub mod tickers;
pub mod tracking;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
