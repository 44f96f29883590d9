//! SQLite-backed aggregate store.
//!
//! Three tables: an append-only `streamed_messages` log plus two
//! derived summary tables keyed by category and author. Every append
//! runs as one transaction that inserts the message row and refreshes
//! both affected averages, so the derived tables always reflect the
//! full log up to the last committed append.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::{debug, info};

use crate::record::SentimentRecord;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error types.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be opened or its tables created.
    #[error("failed to open store at {path}: {source}")]
    Open {
        /// Storage location that failed to open.
        path: String,
        /// Underlying SQLite error.
        source: rusqlite::Error,
    },

    /// A statement failed mid-append; the transaction was rolled back.
    #[error("append transaction failed: {0}")]
    Append(#[from] rusqlite::Error),
}

/// One row of the append-only message log.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    /// Surrogate key assigned at insertion, monotonically increasing.
    pub id: i64,
    /// Category as persisted.
    pub category: String,
    /// Author as persisted.
    pub author: String,
    /// Sentiment score as persisted.
    pub sentiment: f64,
    /// Producer timestamp as persisted, if the message carried one.
    pub timestamp: Option<String>,
}

/// Handle to the sentiment database.
///
/// The connection is exclusively owned by one consumer process for
/// writes; concurrent external readers are tolerated but not enforced.
pub struct SentimentStore {
    conn: Connection,
}

impl SentimentStore {
    /// Open the store at `path`, creating the tables if needed.
    ///
    /// Idempotent: reopening an existing database leaves its rows
    /// untouched, nothing is ever dropped or truncated here.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening sentiment store");

        let open = |source| StoreError::Open {
            path: path.display().to_string(),
            source,
        };

        let conn = Connection::open(path).map_err(open)?;
        let store = Self { conn };
        store.init_schema().map_err(open)?;

        debug!("schema ready");
        Ok(store)
    }

    fn init_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS streamed_messages (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 category TEXT,
                 author TEXT,
                 sentiment REAL,
                 timestamp TEXT
             );
             CREATE TABLE IF NOT EXISTS category_sentiment (
                 category TEXT PRIMARY KEY,
                 avg_sentiment REAL
             );
             CREATE TABLE IF NOT EXISTS author_sentiment (
                 author TEXT PRIMARY KEY,
                 avg_sentiment REAL
             );",
        )
    }

    /// Append one record and refresh both affected averages.
    ///
    /// The message insert and the two upserts commit together or not at
    /// all. Averages are recomputed as a full `AVG` over the log rather
    /// than maintained incrementally, so a key's summary row always
    /// equals the mean of every persisted message sharing that key,
    /// including the row inserted by this call.
    pub fn append(&mut self, record: &SentimentRecord) -> StoreResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO streamed_messages (category, author, sentiment, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.category,
                record.author,
                record.sentiment,
                record.timestamp,
            ],
        )?;

        tx.execute(
            "INSERT INTO category_sentiment (category, avg_sentiment)
             VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET avg_sentiment = (
                 SELECT AVG(sentiment) FROM streamed_messages WHERE category = ?1
             )",
            params![record.category, record.sentiment],
        )?;

        tx.execute(
            "INSERT INTO author_sentiment (author, avg_sentiment)
             VALUES (?1, ?2)
             ON CONFLICT(author) DO UPDATE SET avg_sentiment = (
                 SELECT AVG(sentiment) FROM streamed_messages WHERE author = ?1
             )",
            params![record.author, record.sentiment],
        )?;

        tx.commit()?;

        debug!(
            category = %record.category,
            author = %record.author,
            sentiment = record.sentiment,
            "record appended",
        );
        Ok(())
    }

    /// Average sentiment recorded for a category, if any message
    /// carried it.
    pub fn category_average(&self, category: &str) -> StoreResult<Option<f64>> {
        self.query_average(
            "SELECT avg_sentiment FROM category_sentiment WHERE category = ?1",
            category,
        )
    }

    /// Average sentiment recorded for an author, if any message carried
    /// it.
    pub fn author_average(&self, author: &str) -> StoreResult<Option<f64>> {
        self.query_average(
            "SELECT avg_sentiment FROM author_sentiment WHERE author = ?1",
            author,
        )
    }

    fn query_average(&self, sql: &str, key: &str) -> StoreResult<Option<f64>> {
        Ok(self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?)
    }

    /// Total number of persisted messages.
    pub fn message_count(&self) -> StoreResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM streamed_messages", [], |row| {
                row.get(0)
            })?)
    }

    /// Oldest-first slice of the message log, up to `limit` rows.
    pub fn messages(&self, limit: i64) -> StoreResult<Vec<StoredMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, author, sentiment, timestamp
             FROM streamed_messages
             ORDER BY id ASC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit], |row| {
            Ok(StoredMessage {
                id: row.get(0)?,
                category: row.get(1)?,
                author: row.get(2)?,
                sentiment: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
