//! Tracking module - the workflow that adds a stock to a user's list.

mod provider;
mod tracking_service;


pub use provider::{FetchedHistory, HistoryProvider, HistoryWindow};
pub use tracking_service::{TrackOutcome, TrackingService};
