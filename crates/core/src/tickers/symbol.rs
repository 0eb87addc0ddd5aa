//! Normalized exchange symbols.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tickers_errors::TickerError;
use crate::constants::MAX_SYMBOL_LEN;

/// A validated, case-folded ticker symbol.
///
/// The stored form is lower-case; `display()` renders the upper-case form used
/// in chart titles. Two symbols that differ only in case are the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parses raw user or provider input into a normalized symbol.
    pub fn parse(raw: &str) -> Result<Self, TickerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TickerError::InvalidSymbol(
                "symbol cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_SYMBOL_LEN {
            return Err(TickerError::InvalidSymbol(format!(
                "'{}' is longer than {} characters",
                trimmed, MAX_SYMBOL_LEN
            )));
        }
        if let Some(bad) = trimmed.chars().find(|c| !is_symbol_char(*c)) {
            return Err(TickerError::InvalidSymbol(format!(
                "'{}' contains unsupported character '{}'",
                trimmed, bad
            )));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case form for titles and labels.
    pub fn display(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = TickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = TickerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Symbol::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}
