use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::provider::{HistoryProvider, HistoryWindow};
use crate::constants::MAX_DISPLAY_NAME_LEN;
use crate::errors::Result;
use crate::history::{normalize_records, HistoryError, HistoryIngestorTrait, IngestReport};
use crate::tickers::{Symbol, Ticker, TickerRegistryTrait, UserId};

/// What `track` did for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TrackOutcome {
    /// The ticker was already registered; only the follow edge was added.
    Followed { ticker: Ticker },
    /// The ticker was new: its history was fetched, stored and followed.
    Registered { ticker: Ticker, report: IngestReport },
}

impl TrackOutcome {
    pub fn ticker(&self) -> &Ticker {
        match self {
            TrackOutcome::Followed { ticker } | TrackOutcome::Registered { ticker, .. } => ticker,
        }
    }
}

/// The "add a stock" workflow: registry lookup, fetch, ingest, follow.
pub struct TrackingService {
    registry: Arc<dyn TickerRegistryTrait>,
    ingestor: Arc<dyn HistoryIngestorTrait>,
    provider: Arc<dyn HistoryProvider>,
    window: HistoryWindow,
}

impl TrackingService {
    pub fn new(
        registry: Arc<dyn TickerRegistryTrait>,
        ingestor: Arc<dyn HistoryIngestorTrait>,
        provider: Arc<dyn HistoryProvider>,
    ) -> Self {
        Self {
            registry,
            ingestor,
            provider,
            window: HistoryWindow::default(),
        }
    }

    pub fn with_window(mut self, window: HistoryWindow) -> Self {
        self.window = window;
        self
    }

    /// Makes `user` follow `raw_symbol`, ingesting its history the first time
    /// the symbol is seen.
    ///
    /// Known symbols are never refetched. An empty fetch is reported as
    /// `HistoryError::Empty` and leaves the registry untouched.
    pub fn track(&self, raw_symbol: &str, user: &UserId) -> Result<TrackOutcome> {
        let symbol = Symbol::parse(raw_symbol)?;

        if self.registry.exists(symbol.as_str())? {
            return self.follow_existing(&symbol, user);
        }

        debug!(
            "Fetching {:?} history for {} from {}",
            self.window,
            symbol,
            self.provider.id()
        );
        let fetched = self.provider.daily_history(&symbol, self.window)?;
        if fetched.records.is_empty() {
            info!("No history returned for {}, not registering it", symbol);
            return Err(HistoryError::Empty(symbol.to_string()).into());
        }
        normalize_records(&fetched.records)?;

        let display_name = provider_display_name(fetched.display_name.as_deref());
        let ticker_id = match self
            .registry
            .register_with_name(symbol.as_str(), display_name.as_deref())
        {
            Ok(id) => id,
            Err(e) if e.is_duplicate() => {
                debug!("{} was registered concurrently, following it", symbol);
                return self.follow_existing(&symbol, user);
            }
            Err(e) => return Err(e),
        };

        let report = match self.ingestor.ingest(&ticker_id, &fetched.records) {
            Ok(report) => report,
            Err(e) => {
                warn!(
                    "Ingest failed for {}, removing its registry entry: {}",
                    symbol, e
                );
                if let Err(cleanup) = self.registry.remove(symbol.as_str()) {
                    warn!("Failed to remove {} after ingest failure: {}", symbol, cleanup);
                }
                return Err(e);
            }
        };

        self.registry.follow(symbol.as_str(), user)?;
        let ticker = self.registry.get(symbol.as_str())?;
        info!(
            "Tracking {} for user {} with {} bars",
            symbol, user, report.rows_written
        );

        Ok(TrackOutcome::Registered { ticker, report })
    }

    fn follow_existing(&self, symbol: &Symbol, user: &UserId) -> Result<TrackOutcome> {
        self.registry.follow(symbol.as_str(), user)?;
        let ticker = self.registry.get(symbol.as_str())?;
        Ok(TrackOutcome::Followed { ticker })
    }
}

/// Fits a provider-supplied company name into the registry's display name limit.
///
/// Names longer than `MAX_DISPLAY_NAME_LEN` characters are cut on a char
/// boundary. Blank names become `None`.
pub(crate) fn provider_display_name(raw: Option<&str>) -> Option<String> {
    let name = raw?.trim();
    if name.chars().count() <= MAX_DISPLAY_NAME_LEN {
        return (!name.is_empty()).then(|| name.to_string());
    }

    let clipped: String = name.chars().take(MAX_DISPLAY_NAME_LEN).collect();
    debug!("Shortened provider name '{}' to '{}'", name, clipped.trim_end());
    Some(clipped.trim_end().to_string())
}
