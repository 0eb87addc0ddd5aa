//! Charts module - series data for the five-year, per-year and comparison views.

mod charts_model;
mod charts_service;


pub use charts_model::{AxisRange, Comparison, PricePoint, PriceSeries};
pub use charts_service::ChartService;
