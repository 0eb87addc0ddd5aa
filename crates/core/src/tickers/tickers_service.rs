use log::{debug, info};
use std::sync::Arc;

use super::symbol::Symbol;
use super::tickers_errors::TickerError;
use super::tickers_model::{NewTicker, Ticker, TickerId, UserId};
use super::tickers_traits::{TickerRegistryTrait, TickerRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};

/// Registry of tracked tickers and the users following them.
///
/// `exists` is only a fast path for callers. Uniqueness is enforced by the
/// repository; a unique violation from storage is reported as a duplicate.
pub struct TickerRegistry {
    repository: Arc<dyn TickerRepositoryTrait>,
}

impl TickerRegistry {
    pub fn new(repository: Arc<dyn TickerRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn require(&self, symbol: &Symbol) -> Result<Ticker> {
        self.repository
            .get_by_symbol(symbol)?
            .ok_or_else(|| TickerError::NotFound(symbol.to_string()).into())
    }
}

impl TickerRegistryTrait for TickerRegistry {
    fn exists(&self, symbol: &str) -> Result<bool> {
        match Symbol::parse(symbol) {
            Ok(symbol) => self.repository.exists(&symbol),
            Err(e) => {
                debug!("'{}' can never be registered: {}", symbol, e);
                Ok(false)
            }
        }
    }

    fn register(&self, symbol: &str) -> Result<TickerId> {
        self.register_with_name(symbol, None)
    }

    fn register_with_name(&self, symbol: &str, display_name: Option<&str>) -> Result<TickerId> {
        let symbol = Symbol::parse(symbol)?;
        let new_ticker = NewTicker::new(symbol.clone(), display_name);
        new_ticker.validate()?;

        if self.repository.exists(&symbol)? {
            return Err(TickerError::Duplicate(symbol.to_string()).into());
        }

        let ticker = self.repository.create(new_ticker).map_err(|e| match e {
            Error::Database(DatabaseError::UniqueViolation(_)) => {
                Error::Ticker(TickerError::Duplicate(symbol.to_string()))
            }
            other => other,
        })?;

        info!("Registered ticker {} ({})", ticker.symbol, ticker.id);
        Ok(ticker.id)
    }

    fn get(&self, symbol: &str) -> Result<Ticker> {
        let symbol = Symbol::parse(symbol)?;
        self.require(&symbol)
    }

    fn get_by_id(&self, ticker_id: &TickerId) -> Result<Ticker> {
        self.repository
            .get_by_id(ticker_id)?
            .ok_or_else(|| TickerError::NotFound(ticker_id.to_string()).into())
    }

    fn list(&self) -> Result<Vec<Ticker>> {
        self.repository.list()
    }

    fn follow(&self, symbol: &str, user: &UserId) -> Result<()> {
        let symbol = Symbol::parse(symbol)?;
        let ticker = self.require(&symbol)?;
        let inserted = self.repository.add_follower(&ticker.id, user)?;
        if inserted {
            debug!("User {} now follows {}", user, symbol);
        } else {
            debug!("User {} already follows {}", user, symbol);
        }
        Ok(())
    }

    fn unfollow(&self, symbol: &str, user: &UserId) -> Result<bool> {
        let symbol = Symbol::parse(symbol)?;
        let ticker = self.require(&symbol)?;
        self.repository.remove_follower(&ticker.id, user)
    }

    fn is_following(&self, symbol: &str, user: &UserId) -> Result<bool> {
        let symbol = Symbol::parse(symbol)?;
        let ticker = self.require(&symbol)?;
        self.repository.is_followed_by(&ticker.id, user)
    }

    fn followed_by(&self, user: &UserId) -> Result<Vec<Ticker>> {
        self.repository.list_followed_by(user)
    }

    fn forget_user(&self, user: &UserId) -> Result<usize> {
        let removed = self.repository.remove_user(user)?;
        debug!("Removed {} follow edges of user {}", removed, user);
        Ok(removed)
    }

    fn remove(&self, symbol: &str) -> Result<()> {
        let symbol = Symbol::parse(symbol)?;
        let ticker = self.require(&symbol)?;
        if self.repository.delete(&ticker.id)? == 0 {
            return Err(TickerError::NotFound(symbol.to_string()).into());
        }
        info!("Removed ticker {} ({})", symbol, ticker.id);
        Ok(())
    }
}
