//! SQLite storage implementation for the ticker registry.

mod model;
mod repository;

pub use model::{TickerDB, TickerFollowerDB};
pub use repository::TickerRepository;
