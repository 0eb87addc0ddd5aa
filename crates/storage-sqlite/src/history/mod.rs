//! SQLite storage implementation for daily price history.

mod model;
mod repository;

pub use model::DailyBarDB;
pub use repository::HistoryRepository;
