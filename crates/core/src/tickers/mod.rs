//! Tickers module - the registry of tracked symbols and their followers.

mod symbol;
mod tickers_errors;
mod tickers_model;
mod tickers_service;
mod tickers_traits;


pub use symbol::Symbol;
pub use tickers_errors::TickerError;
pub use tickers_model::{NewTicker, Ticker, TickerId, UserId};
pub use tickers_service::TickerRegistry;
pub use tickers_traits::{TickerRegistryTrait, TickerRepositoryTrait};
