use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use super::model::{TickerDB, TickerFollowerDB};
use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::IntoCore;
use crate::schema::{ticker_followers, tickers};
use stock_analyzer_core::errors::Result;
use stock_analyzer_core::tickers::{
    NewTicker, Symbol, Ticker, TickerId, TickerRepositoryTrait, UserId,
};

/// Repository for tickers and their follow edges
pub struct TickerRepository {
    pool: Arc<DbPool>,
}

impl TickerRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn follower_count(conn: &mut SqliteConnection, id: &str) -> Result<i64> {
        ticker_followers::table
            .filter(ticker_followers::ticker_id.eq(id))
            .count()
            .get_result::<i64>(conn)
            .into_core()
    }

    /// Attaches follower counts to a batch of rows with one grouped query.
    fn with_follower_counts(
        conn: &mut SqliteConnection,
        rows: Vec<TickerDB>,
    ) -> Result<Vec<Ticker>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        let counts: HashMap<String, i64> = ticker_followers::table
            .filter(ticker_followers::ticker_id.eq_any(ids))
            .group_by(ticker_followers::ticker_id)
            .select((ticker_followers::ticker_id, count_star()))
            .load::<(String, i64)>(conn)
            .into_core()?
            .into_iter()
            .collect();

        rows.into_iter()
            .map(|row| {
                let count = counts.get(&row.id).copied().unwrap_or(0);
                row.into_ticker(count)
            })
            .collect()
    }

    fn load_one(conn: &mut SqliteConnection, row: Option<TickerDB>) -> Result<Option<Ticker>> {
        match row {
            Some(row) => {
                let count = Self::follower_count(conn, &row.id)?;
                row.into_ticker(count).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl TickerRepositoryTrait for TickerRepository {
    fn create(&self, new_ticker: NewTicker) -> Result<Ticker> {
        let row = TickerDB::from_new(new_ticker);
        let inserted = row.clone();
        self.pool.execute(move |conn| {
            diesel::insert_into(tickers::table)
                .values(&inserted)
                .execute(conn)
                .into_core()?;
            Ok(())
        })?;
        debug!("Inserted ticker row {} ({})", row.id, row.symbol);
        row.into_ticker(0)
    }

    fn exists(&self, symbol: &Symbol) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(exists(
            tickers::table.filter(tickers::symbol.eq(symbol.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()
    }

    fn get_by_symbol(&self, symbol: &Symbol) -> Result<Option<Ticker>> {
        let mut conn = get_connection(&self.pool)?;
        let row = tickers::table
            .filter(tickers::symbol.eq(symbol.as_str()))
            .select(TickerDB::as_select())
            .first::<TickerDB>(&mut conn)
            .optional()
            .into_core()?;
        Self::load_one(&mut conn, row)
    }

    fn get_by_id(&self, ticker_id: &TickerId) -> Result<Option<Ticker>> {
        let mut conn = get_connection(&self.pool)?;
        let row = tickers::table
            .find(ticker_id.as_str())
            .select(TickerDB::as_select())
            .first::<TickerDB>(&mut conn)
            .optional()
            .into_core()?;
        Self::load_one(&mut conn, row)
    }

    fn list(&self) -> Result<Vec<Ticker>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tickers::table
            .select(TickerDB::as_select())
            .order(tickers::symbol.asc())
            .load::<TickerDB>(&mut conn)
            .into_core()?;
        Self::with_follower_counts(&mut conn, rows)
    }

    fn delete(&self, ticker_id: &TickerId) -> Result<usize> {
        let id = ticker_id.as_str().to_string();
        self.pool.execute(move |conn| {
            diesel::delete(tickers::table.find(id))
                .execute(conn)
                .into_core()
        })
    }

    fn add_follower(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool> {
        let edge = TickerFollowerDB::new(ticker_id, user);
        let inserted = self.pool.execute(move |conn| {
            diesel::insert_or_ignore_into(ticker_followers::table)
                .values(&edge)
                .execute(conn)
                .into_core()
        })?;
        Ok(inserted > 0)
    }

    fn remove_follower(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool> {
        let id = ticker_id.as_str().to_string();
        let user_id = user.as_str().to_string();
        let removed = self.pool.execute(move |conn| {
            diesel::delete(
                ticker_followers::table
                    .filter(ticker_followers::ticker_id.eq(id))
                    .filter(ticker_followers::user_id.eq(user_id)),
            )
            .execute(conn)
            .into_core()
        })?;
        Ok(removed > 0)
    }

    fn remove_user(&self, user: &UserId) -> Result<usize> {
        let user_id = user.as_str().to_string();
        self.pool.execute(move |conn| {
            diesel::delete(ticker_followers::table.filter(ticker_followers::user_id.eq(user_id)))
                .execute(conn)
                .into_core()
        })
    }

    fn is_followed_by(&self, ticker_id: &TickerId, user: &UserId) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(exists(
            ticker_followers::table
                .filter(ticker_followers::ticker_id.eq(ticker_id.as_str()))
                .filter(ticker_followers::user_id.eq(user.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()
    }

    fn list_followed_by(&self, user: &UserId) -> Result<Vec<Ticker>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tickers::table
            .inner_join(ticker_followers::table)
            .filter(ticker_followers::user_id.eq(user.as_str()))
            .select(TickerDB::as_select())
            .order(tickers::symbol.asc())
            .load::<TickerDB>(&mut conn)
            .into_core()?;
        Self::with_follower_counts(&mut conn, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::db::{create_pool, run_migrations};
    use stock_analyzer_core::errors::{DatabaseError, Error};
    use tempfile::tempdir;

    fn create_test_repository() -> (TickerRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let config = StorageConfig::new(db_path.to_string_lossy().to_string());

        let pool = create_pool(&config).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        (TickerRepository::new(pool), temp_dir)
    }

    fn new_ticker(symbol: &str, name: Option<&str>) -> NewTicker {
        NewTicker::new(Symbol::parse(symbol).unwrap(), name)
    }

    #[test]
    fn test_create_and_lookup() {
        let (repo, _dir) = create_test_repository();

        let created = repo.create(new_ticker("AAPL", Some("Apple Inc."))).unwrap();
        let symbol = Symbol::parse("aapl").unwrap();

        assert!(repo.exists(&symbol).unwrap());
        let by_symbol = repo.get_by_symbol(&symbol).unwrap().unwrap();
        assert_eq!(by_symbol.id, created.id);
        assert_eq!(by_symbol.display_name.as_deref(), Some("Apple Inc."));
        let by_id = repo.get_by_id(&created.id).unwrap().unwrap();
        assert_eq!(by_id.symbol, symbol);
        assert!(repo.get_by_id(&TickerId::new("missing")).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_symbol_is_unique_violation() {
        let (repo, _dir) = create_test_repository();
        repo.create(new_ticker("msft", None)).unwrap();

        let err = repo.create(new_ticker("MSFT", None)).unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_follow_edges() {
        let (repo, _dir) = create_test_repository();
        let aapl = repo.create(new_ticker("aapl", None)).unwrap();
        let msft = repo.create(new_ticker("msft", None)).unwrap();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        assert!(repo.add_follower(&msft.id, &alice).unwrap());
        assert!(!repo.add_follower(&msft.id, &alice).unwrap());
        assert!(repo.add_follower(&aapl.id, &alice).unwrap());
        assert!(repo.add_follower(&aapl.id, &bob).unwrap());

        let followed = repo.list_followed_by(&alice).unwrap();
        let symbols: Vec<&str> = followed.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["aapl", "msft"]);
        assert_eq!(followed[0].follower_count, 2);
        assert_eq!(followed[1].follower_count, 1);

        assert!(repo.is_followed_by(&aapl.id, &bob).unwrap());
        assert!(repo.remove_follower(&aapl.id, &bob).unwrap());
        assert!(!repo.is_followed_by(&aapl.id, &bob).unwrap());

        assert_eq!(repo.remove_user(&alice).unwrap(), 2);
        assert!(repo.list_followed_by(&alice).unwrap().is_empty());
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn test_follow_unknown_ticker_is_foreign_key_violation() {
        let (repo, _dir) = create_test_repository();

        let err = repo
            .add_follower(&TickerId::new("ghost"), &UserId::new("alice"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }

    #[test]
    fn test_delete_cascades_follow_edges() {
        let (repo, _dir) = create_test_repository();
        let meta = repo.create(new_ticker("meta", None)).unwrap();
        let user = UserId::new("alice");
        repo.add_follower(&meta.id, &user).unwrap();

        assert_eq!(repo.delete(&meta.id).unwrap(), 1);
        assert_eq!(repo.delete(&meta.id).unwrap(), 0);
        assert!(!repo.is_followed_by(&meta.id, &user).unwrap());
        assert!(repo.list_followed_by(&user).unwrap().is_empty());
    }
}
