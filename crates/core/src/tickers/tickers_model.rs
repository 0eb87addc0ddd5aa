//! Ticker domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::symbol::Symbol;
use super::tickers_errors::TickerError;
use crate::constants::MAX_DISPLAY_NAME_LEN;

/// Internal identity of a registered ticker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerId(pub String);

impl TickerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TickerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TickerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identity of a user, owned by the external authentication layer.
///
/// The registry only stores it on follow edges; no user rows live here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A registered ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub id: TickerId,
    pub symbol: Symbol,
    pub display_name: Option<String>,
    pub follower_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Input model for registering a ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicker {
    pub symbol: Symbol,
    pub display_name: Option<String>,
}

impl NewTicker {
    pub fn new(symbol: Symbol, display_name: Option<&str>) -> Self {
        Self {
            symbol,
            display_name: display_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }

    pub fn validate(&self) -> Result<(), TickerError> {
        if let Some(name) = &self.display_name {
            if name.chars().count() > MAX_DISPLAY_NAME_LEN {
                return Err(TickerError::InvalidDisplayName(format!(
                    "'{}' is longer than {} characters",
                    name, MAX_DISPLAY_NAME_LEN
                )));
            }
        }
        Ok(())
    }
}
