//! Wiring of the SQLite repositories into the core services.

use log::info;
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::db::{self, DbPool};
use crate::history::HistoryRepository;
use crate::tickers::TickerRepository;
use stock_analyzer_core::charts::ChartService;
use stock_analyzer_core::errors::Result;
use stock_analyzer_core::history::{HistoryIngestor, HistoryIngestorTrait};
use stock_analyzer_core::tickers::{TickerRegistry, TickerRegistryTrait};
use stock_analyzer_core::tracking::{HistoryProvider, TrackingService};

/// Services backed by one SQLite database.
pub struct ServiceContext {
    pub pool: Arc<DbPool>,
    pub ticker_registry: Arc<dyn TickerRegistryTrait>,
    pub history_ingestor: Arc<dyn HistoryIngestorTrait>,
    pub chart_service: Arc<ChartService>,
}

impl ServiceContext {
    /// Initializes the database, applies pending migrations and builds the services.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        db::init(config)?;
        let pool = db::create_pool(config)?;
        db::run_migrations(&pool)?;

        // Instantiate Repositories
        let ticker_repository = Arc::new(TickerRepository::new(pool.clone()));
        let history_repository = Arc::new(HistoryRepository::new(pool.clone()));

        // Instantiate Services
        let ticker_registry: Arc<dyn TickerRegistryTrait> =
            Arc::new(TickerRegistry::new(ticker_repository.clone()));
        let history_ingestor: Arc<dyn HistoryIngestorTrait> = Arc::new(HistoryIngestor::new(
            ticker_repository,
            history_repository,
        ));
        let chart_service = Arc::new(ChartService::new(
            ticker_registry.clone(),
            history_ingestor.clone(),
        ));

        info!("Service context ready for {}", config.db_path);
        Ok(Self {
            pool,
            ticker_registry,
            history_ingestor,
            chart_service,
        })
    }

    /// Opens the database described by the environment.
    pub fn from_env() -> Result<Self> {
        Self::open(&StorageConfig::from_env()?)
    }

    /// Track workflow using `provider` as the market-data source.
    pub fn tracking(&self, provider: Arc<dyn HistoryProvider>) -> TrackingService {
        TrackingService::new(
            self.ticker_registry.clone(),
            self.history_ingestor.clone(),
            provider,
        )
    }
}
