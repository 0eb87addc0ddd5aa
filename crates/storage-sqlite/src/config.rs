use std::time::Duration;

use stock_analyzer_core::errors::{Error, Result};

pub const DB_PATH_VAR: &str = "STOCK_ANALYZER_DB_PATH";
pub const DB_POOL_SIZE_VAR: &str = "STOCK_ANALYZER_DB_POOL_SIZE";
pub const DB_BUSY_TIMEOUT_VAR: &str = "STOCK_ANALYZER_DB_BUSY_TIMEOUT_MS";

const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 30_000;

/// Where the database lives and how connections to it are pooled.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub db_path: String,
    pub pool_size: u32,
    pub busy_timeout: Duration,
}

impl StorageConfig {
    /// Config for `db_path` with default pool settings.
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }

    /// Reads the process environment, honouring a `.env` file when present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(DB_PATH_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let pool_size = match lookup(DB_POOL_SIZE_VAR) {
            Some(raw) => parse_var::<u32>(DB_POOL_SIZE_VAR, &raw)?,
            None => DEFAULT_POOL_SIZE,
        };
        if pool_size == 0 {
            return Err(Error::InvalidConfigValue(format!(
                "{} must be greater than zero",
                DB_POOL_SIZE_VAR
            )));
        }

        let busy_timeout_ms = match lookup(DB_BUSY_TIMEOUT_VAR) {
            Some(raw) => parse_var::<u64>(DB_BUSY_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        Ok(Self {
            db_path,
            pool_size,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidConfigValue(format!("{}='{}'", key, raw)))
}
