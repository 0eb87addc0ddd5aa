//! Reshapes a ticker's stored history into per-year slices for charting.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::history_model::DailyBar;

/// Bars of one calendar year, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSlice {
    pub year: i32,
    pub bars: Vec<DailyBar>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSplit {
    /// Years in the order first encountered.
    pub years: Vec<YearSlice>,
    /// Highest close across every input bar, `None` for an empty input.
    /// Callers use it as the shared y-axis ceiling of the per-year charts.
    pub max_close: Option<Decimal>,
}

/// Groups bars by calendar year.
///
/// Input is expected in ascending date order, which makes the years ascending
/// too. Out-of-order input is still grouped correctly: each bar joins the
/// slice of its year and keeps its relative position there.
pub fn split_by_year<I>(bars: I) -> YearSplit
where
    I: IntoIterator<Item = DailyBar>,
{
    let mut split = YearSplit::default();
    let mut slot_by_year: HashMap<i32, usize> = HashMap::new();

    for bar in bars {
        split.max_close = Some(match split.max_close {
            Some(current) if current >= bar.close => current,
            _ => bar.close,
        });

        let year = bar.year();
        let slot = *slot_by_year.entry(year).or_insert_with(|| {
            split.years.push(YearSlice {
                year,
                bars: Vec::new(),
            });
            split.years.len() - 1
        });
        split.years[slot].bars.push(bar);
    }

    split
}
