use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::DailyBarDB;
use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::IntoCore;
use crate::schema::daily_bars;
use stock_analyzer_core::errors::Result;
use stock_analyzer_core::history::{DailyBar, HistoryRepositoryTrait, NewDailyBar};
use stock_analyzer_core::tickers::TickerId;

/// Rows per INSERT statement, well below SQLite's bind parameter limit.
const INSERT_CHUNK_SIZE: usize = 500;

/// Repository for daily bars
pub struct HistoryRepository {
    pool: Arc<DbPool>,
}

impl HistoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl HistoryRepositoryTrait for HistoryRepository {
    fn insert_bars(&self, bars: &[NewDailyBar]) -> Result<usize> {
        let rows = bars
            .iter()
            .map(DailyBarDB::try_from)
            .collect::<Result<Vec<_>>>()?;

        let written = self.pool.execute(move |conn| {
            let mut written = 0;
            for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                written += diesel::insert_into(daily_bars::table)
                    .values(chunk)
                    .execute(conn)
                    .into_core()?;
            }
            Ok(written)
        })?;

        debug!("Inserted {} daily bars", written);
        Ok(written)
    }

    fn list_for_ticker(&self, ticker_id: &TickerId) -> Result<Vec<DailyBar>> {
        let mut conn = get_connection(&self.pool)?;
        daily_bars::table
            .filter(daily_bars::ticker_id.eq(ticker_id.as_str()))
            .select(DailyBarDB::as_select())
            .order(daily_bars::date.asc())
            .load::<DailyBarDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(DailyBar::try_from)
            .collect()
    }

    fn count_for_ticker(&self, ticker_id: &TickerId) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let count = daily_bars::table
            .filter(daily_bars::ticker_id.eq(ticker_id.as_str()))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
