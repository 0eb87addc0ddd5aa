use super::symbol::Symbol;
use super::tickers_model::{NewTicker, Ticker, TickerId, UserId};
use crate::errors::Result;

/// Trait defining the contract for Ticker registry operations.
///
/// Symbols are accepted as raw input and normalized by the registry.
pub trait TickerRegistryTrait: Send + Sync {
    /// Case-insensitive membership test. Input that is not a valid symbol
    /// is reported as absent.
    fn exists(&self, symbol: &str) -> Result<bool>;
    /// Registers a ticker with zero followers.
    fn register(&self, symbol: &str) -> Result<TickerId>;
    fn register_with_name(&self, symbol: &str, display_name: Option<&str>) -> Result<TickerId>;
    fn get(&self, symbol: &str) -> Result<Ticker>;
    fn get_by_id(&self, ticker_id: &TickerId) -> Result<Ticker>;
    fn list(&self) -> Result<Vec<Ticker>>;
    /// Adds the follow edge. Following twice is a no-op.
    fn follow(&self, symbol: &str, user: &UserId) -> Result<()>;
    /// Returns true if an edge was removed.
    fn unfollow(&self, symbol: &str, user: &UserId) -> Result<bool>;
    fn is_following(&self, symbol: &str, user: &UserId) -> Result<bool>;
    fn followed_by(&self, user: &UserId) -> Result<Vec<Ticker>>;
    /// Drops every follow edge of a user. Tickers are kept.
    fn forget_user(&self, user: &UserId) -> Result<usize>;
    /// Deletes a ticker together with its bars and follow edges.
    fn remove(&self, symbol: &str) -> Result<()>;
}

/// Trait defining the contract for Ticker repository operations.
///
/// Implementations must enforce uniqueness of the normalized symbol and of the
/// (ticker, user) follow pair at the storage layer.
pub trait TickerRepositoryTrait: Send + Sync {
    /// Creates the ticker. A symbol collision surfaces as
    /// `DatabaseError::UniqueViolation`.
    fn create(&self, new_ticker: NewTicker) -> Result<Ticker>;
    fn exists(&self, symbol: &Symbol) -> Result<bool>;
    fn get_by_symbol(&self, symbol: &Symbol) -> Result<Option<Ticker>>;
    fn get_by_id(&self, ticker_id: &TickerId) -> Result<Option<Ticker>>;
    fn list(&self) -> Result<Vec<Ticker>>;
    /// Returns the number of deleted tickers (0 or 1).
    fn delete(&self, ticker_id: &TickerId) -> Result<usize>;
    /// Returns true if a new edge was inserted.
    fn add_follower(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool>;
    fn remove_follower(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool>;
    fn remove_user(&self, user: &UserId) -> Result<usize>;
    fn is_followed_by(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool>;
    fn list_followed_by(&self, user: &UserId) -> Result<Vec<Ticker>>;
}
