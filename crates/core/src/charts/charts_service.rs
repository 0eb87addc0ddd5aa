use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::charts_model::{AxisRange, Comparison, PricePoint, PriceSeries};
use crate::errors::Result;
use crate::history::{split_by_year, HistoryIngestorTrait};
use crate::tickers::{Ticker, TickerError, TickerRegistryTrait, UserId};

/// Prepares the five-year, per-year and comparison chart series of a ticker.
pub struct ChartService {
    registry: Arc<dyn TickerRegistryTrait>,
    history: Arc<dyn HistoryIngestorTrait>,
}

impl ChartService {
    pub fn new(
        registry: Arc<dyn TickerRegistryTrait>,
        history: Arc<dyn HistoryIngestorTrait>,
    ) -> Self {
        Self { registry, history }
    }

    /// All stored closes of a ticker on one chart.
    pub fn five_year(&self, symbol: &str) -> Result<PriceSeries> {
        let ticker = self.registry.get(symbol)?;
        self.five_year_for(&ticker)
    }

    /// One chart per calendar year, all sharing the y-axis `[0, max close]`.
    pub fn split_by_year(&self, symbol: &str) -> Result<Vec<PriceSeries>> {
        let ticker = self.registry.get(symbol)?;
        let label = ticker.symbol.display();
        let split = split_by_year(self.history.bars(&ticker.id)?);
        let y_axis = split.max_close.map(|max| AxisRange {
            min: Decimal::ZERO,
            max,
        });

        debug!("Split {} history into {} years", label, split.years.len());

        Ok(split
            .years
            .into_iter()
            .map(|slice| PriceSeries {
                title: format!("{} Data for {}", slice.year, label),
                symbol: label.clone(),
                points: slice.bars.iter().map(PricePoint::from).collect(),
                y_axis,
            })
            .collect())
    }

    /// Five-year series of two tickers the user follows.
    pub fn compare(&self, user: &UserId, first: &str, second: &str) -> Result<Comparison> {
        let first = self.followed_ticker(user, first)?;
        let second = self.followed_ticker(user, second)?;

        Ok(Comparison {
            first: self.five_year_for(&first)?,
            second: self.five_year_for(&second)?,
        })
    }

    fn followed_ticker(&self, user: &UserId, symbol: &str) -> Result<Ticker> {
        let ticker = self.registry.get(symbol)?;
        if !self.registry.is_following(ticker.symbol.as_str(), user)? {
            return Err(TickerError::NotFollowed {
                symbol: ticker.symbol.to_string(),
                user: user.to_string(),
            }
            .into());
        }
        Ok(ticker)
    }

    fn five_year_for(&self, ticker: &Ticker) -> Result<PriceSeries> {
        let label = ticker.symbol.display();
        let bars = self.history.bars(&ticker.id)?;
        Ok(PriceSeries {
            title: format!("Five Year Data for {}", label),
            symbol: label,
            points: bars.iter().map(PricePoint::from).collect(),
            y_axis: None,
        })
    }
}
