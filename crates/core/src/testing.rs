//! In-memory repositories shared by the service tests.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::errors::{DatabaseError, Error, Result};
use crate::history::{DailyBar, HistoryRepositoryTrait, NewDailyBar, PriceRecord};
use crate::tickers::{NewTicker, Symbol, Ticker, TickerId, TickerRepositoryTrait, UserId};
use crate::tracking::{FetchedHistory, HistoryProvider, HistoryWindow};

#[derive(Default)]
struct MockState {
    next_id: usize,
    tickers: Vec<(TickerId, Symbol, Option<String>)>,
    followers: BTreeSet<(String, String)>,
    bars: Vec<DailyBar>,
    fail_on_insert: bool,
}

/// Mock store implementing both repositories over one shared state, so that
/// deleting a ticker cascades to its bars and follow edges.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_insert(&self, fail: bool) {
        self.state.lock().unwrap().fail_on_insert = fail;
    }

    pub fn bar_total(&self) -> usize {
        self.state.lock().unwrap().bars.len()
    }

    pub fn follower_total(&self) -> usize {
        self.state.lock().unwrap().followers.len()
    }

    fn to_ticker(state: &MockState, row: &(TickerId, Symbol, Option<String>)) -> Ticker {
        let follower_count = state
            .followers
            .iter()
            .filter(|(ticker_id, _)| ticker_id == row.0.as_str())
            .count();
        Ticker {
            id: row.0.clone(),
            symbol: row.1.clone(),
            display_name: row.2.clone(),
            follower_count,
            created_at: Utc.with_ymd_and_hms(2024, 10, 5, 3, 53, 0).unwrap(),
        }
    }
}

impl TickerRepositoryTrait for MockStore {
    fn create(&self, new_ticker: NewTicker) -> Result<Ticker> {
        let mut state = self.state.lock().unwrap();
        if state.tickers.iter().any(|t| t.1 == new_ticker.symbol) {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "UNIQUE constraint failed: tickers.symbol".to_string(),
            )));
        }
        state.next_id += 1;
        let row = (
            TickerId::new(format!("ticker-{}", state.next_id)),
            new_ticker.symbol,
            new_ticker.display_name,
        );
        state.tickers.push(row.clone());
        Ok(Self::to_ticker(&state, &row))
    }

    fn exists(&self, symbol: &Symbol) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.tickers.iter().any(|t| &t.1 == symbol))
    }

    fn get_by_symbol(&self, symbol: &Symbol) -> Result<Option<Ticker>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tickers
            .iter()
            .find(|t| &t.1 == symbol)
            .map(|row| Self::to_ticker(&state, row)))
    }

    fn get_by_id(&self, ticker_id: &TickerId) -> Result<Option<Ticker>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tickers
            .iter()
            .find(|t| &t.0 == ticker_id)
            .map(|row| Self::to_ticker(&state, row)))
    }

    fn list(&self) -> Result<Vec<Ticker>> {
        let state = self.state.lock().unwrap();
        let mut tickers: Vec<Ticker> = state
            .tickers
            .iter()
            .map(|row| Self::to_ticker(&state, row))
            .collect();
        tickers.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(tickers)
    }

    fn delete(&self, ticker_id: &TickerId) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.tickers.len();
        state.tickers.retain(|t| &t.0 != ticker_id);
        state.bars.retain(|b| &b.ticker_id != ticker_id);
        state.followers.retain(|(t, _)| t != ticker_id.as_str());
        Ok(before - state.tickers.len())
    }

    fn add_follower(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        if !state.tickers.iter().any(|t| &t.0 == ticker_id) {
            return Err(Error::Database(DatabaseError::ForeignKeyViolation(
                "FOREIGN KEY constraint failed".to_string(),
            )));
        }
        Ok(state
            .followers
            .insert((ticker_id.to_string(), user.to_string())))
    }

    fn remove_follower(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .followers
            .remove(&(ticker_id.to_string(), user.to_string())))
    }

    fn remove_user(&self, user: &UserId) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.followers.len();
        state.followers.retain(|(_, u)| u != user.as_str());
        Ok(before - state.followers.len())
    }

    fn is_followed_by(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .followers
            .contains(&(ticker_id.to_string(), user.to_string())))
    }

    fn list_followed_by(&self, user: &UserId) -> Result<Vec<Ticker>> {
        let state = self.state.lock().unwrap();
        let mut tickers: Vec<Ticker> = state
            .tickers
            .iter()
            .filter(|t| {
                state
                    .followers
                    .contains(&(t.0.to_string(), user.to_string()))
            })
            .map(|row| Self::to_ticker(&state, row))
            .collect();
        tickers.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(tickers)
    }
}

impl HistoryRepositoryTrait for MockStore {
    fn insert_bars(&self, bars: &[NewDailyBar]) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        if state.fail_on_insert {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "Intentional insert failure".to_string(),
            )));
        }
        for bar in bars {
            if !state.tickers.iter().any(|t| t.0 == bar.ticker_id) {
                return Err(Error::Database(DatabaseError::ForeignKeyViolation(
                    "FOREIGN KEY constraint failed".to_string(),
                )));
            }
            if state
                .bars
                .iter()
                .any(|b| b.ticker_id == bar.ticker_id && b.date == bar.date)
            {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: daily_bars.ticker_id, daily_bars.date".to_string(),
                )));
            }
        }
        for bar in bars {
            state.bars.push(DailyBar {
                id: bar.bar_id(),
                ticker_id: bar.ticker_id.clone(),
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                dividends: bar.dividends,
                stock_splits: bar.stock_splits,
            });
        }
        Ok(bars.len())
    }

    fn list_for_ticker(&self, ticker_id: &TickerId) -> Result<Vec<DailyBar>> {
        let state = self.state.lock().unwrap();
        let mut bars: Vec<DailyBar> = state
            .bars
            .iter()
            .filter(|b| &b.ticker_id == ticker_id)
            .cloned()
            .collect();
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn count_for_ticker(&self, ticker_id: &TickerId) -> Result<usize> {
        let state = self.state.lock().unwrap();
        Ok(state
            .bars
            .iter()
            .filter(|b| &b.ticker_id == ticker_id)
            .count())
    }
}

/// Provider returning canned histories keyed by normalized symbol.
#[derive(Clone, Default)]
pub struct MockProvider {
    histories: Arc<Mutex<Vec<(String, FetchedHistory)>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(self, symbol: &str, history: FetchedHistory) -> Self {
        self.histories
            .lock()
            .unwrap()
            .push((symbol.to_ascii_lowercase(), history));
        self
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HistoryProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    fn daily_history(&self, symbol: &Symbol, _window: HistoryWindow) -> Result<FetchedHistory> {
        self.calls.lock().unwrap().push(symbol.to_string());
        if *self.fail.lock().unwrap() {
            return Err(Error::Provider("connection reset".to_string()));
        }
        Ok(self
            .histories
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| s == symbol.as_str())
            .map(|(_, h)| h.clone())
            .unwrap_or_default())
    }
}

/// A record whose four prices all equal `close`.
pub fn flat_record(year: i32, month: u32, day: u32, close: Decimal) -> PriceRecord {
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    PriceRecord::new(date, close, close, close, close, 1_000)
}
