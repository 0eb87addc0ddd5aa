//! Chart-ready series handed to the rendering layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::history::DailyBar;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

impl From<&DailyBar> for PricePoint {
    fn from(bar: &DailyBar) -> Self {
        Self {
            date: bar.date,
            close: bar.close,
        }
    }
}

/// Fixed y-axis range shared by a group of charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// One line chart: closing prices over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeries {
    pub title: String,
    /// Upper-case symbol, e.g. "AAPL".
    pub symbol: String,
    pub points: Vec<PricePoint>,
    /// `None` lets the renderer scale the axis to the data.
    pub y_axis: Option<AxisRange>,
}

/// Two five-year series shown side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub first: PriceSeries,
    pub second: PriceSeries,
}
