//! SQLite storage implementation for Stock Analyzer.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `stock-analyzer-core` and contains:
//! - Database connection pooling and configuration
//! - Diesel migrations
//! - Repository implementations for tickers, follow edges and daily bars
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!             │
//!             ▼
//!  storage-sqlite (this crate)
//!             │
//!             ▼
//!         SQLite DB
//! ```

pub mod config;
pub mod context;
pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod history;
pub mod tickers;

pub use config::StorageConfig;
pub use context::ServiceContext;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, DbConnection, DbPool,
    DbTransactionExecutor,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from stock-analyzer-core for convenience
pub use stock_analyzer_core::errors::{DatabaseError, Error, Result};
