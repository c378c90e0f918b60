//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the storage traits.

use crate::storage::schema::{initialize_schema, table_name};
use crate::storage::traits::{
    FrontierStore, SessionStore, StorageError, StorageResult, TallyStore,
};
use crate::storage::{FrequencyRecord, SessionRecord, SessionStatus};
use crate::text::{Observation, UnitKind};
use crate::HeceError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// Parent directories of `path` are created if missing.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(HeceError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, HeceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        conn.busy_timeout(Duration::from_secs(10))?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, HeceError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Applies one observation: increment and overwrite of the latest example
fn upsert_unit(
    conn: &Connection,
    kind: UnitKind,
    unit: &str,
    word: &str,
    url: &str,
) -> rusqlite::Result<()> {
    let sql = format!(
        "INSERT INTO {} (unit, frequency, last_word, last_url) VALUES (?1, 1, ?2, ?3)
         ON CONFLICT(unit) DO UPDATE SET
             frequency = frequency + 1,
             last_word = excluded.last_word,
             last_url = excluded.last_url",
        table_name(kind)
    );
    conn.prepare_cached(&sql)?
        .execute(params![unit, word, url])?;
    Ok(())
}

fn frequency_record(row: &Row<'_>) -> rusqlite::Result<FrequencyRecord> {
    Ok(FrequencyRecord {
        unit: row.get(0)?,
        frequency: row.get::<_, i64>(1)? as u64,
        last_word: row.get(2)?,
        last_url: row.get(3)?,
    })
}

fn session_record(row: &Row<'_>) -> rusqlite::Result<SessionRecord> {
    Ok(SessionRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        status: SessionStatus::from_db_string(&row.get::<_, String>(4)?)
            .unwrap_or(SessionStatus::Failed),
        pages_crawled: row.get::<_, i64>(5)? as u64,
    })
}

impl SqliteStorage {
    fn count(&self, sql: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl TallyStore for SqliteStorage {
    fn record(&mut self, kind: UnitKind, unit: &str, word: &str, url: &str) -> StorageResult<()> {
        upsert_unit(&self.conn, kind, unit, word, url)?;
        Ok(())
    }

    fn record_word(
        &mut self,
        word: &str,
        url: &str,
        observations: &[Observation],
    ) -> StorageResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("INSERT OR IGNORE INTO words (word) VALUES (?1)", params![word])?;
        for observation in observations {
            upsert_unit(&tx, observation.kind, &observation.unit, word, url)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn snapshot(&self, kind: UnitKind) -> StorageResult<Vec<FrequencyRecord>> {
        let sql = format!(
            "SELECT unit, frequency, last_word, last_url FROM {}
             ORDER BY frequency DESC, unit ASC",
            table_name(kind)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], frequency_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn top(&self, kind: UnitKind, limit: usize) -> StorageResult<Vec<FrequencyRecord>> {
        let sql = format!(
            "SELECT unit, frequency, last_word, last_url FROM {}
             ORDER BY frequency DESC, unit ASC LIMIT ?1",
            table_name(kind)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![limit as i64], frequency_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn get_record(&self, kind: UnitKind, unit: &str) -> StorageResult<Option<FrequencyRecord>> {
        let sql = format!(
            "SELECT unit, frequency, last_word, last_url FROM {} WHERE unit = ?1",
            table_name(kind)
        );
        let record = self
            .conn
            .query_row(&sql, params![unit], frequency_record)
            .optional()?;
        Ok(record)
    }

    fn count_units(&self, kind: UnitKind) -> StorageResult<u64> {
        self.count(&format!("SELECT COUNT(*) FROM {}", table_name(kind)))
    }

    fn total_occurrences(&self, kind: UnitKind) -> StorageResult<u64> {
        self.count(&format!(
            "SELECT COALESCE(SUM(frequency), 0) FROM {}",
            table_name(kind)
        ))
    }

    fn count_words(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM words")
    }

    fn sample_words(&self, limit: usize) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT word FROM words ORDER BY RANDOM() LIMIT ?1")?;
        let words = stmt
            .query_map(params![limit as i64], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(words)
    }
}

impl FrontierStore for SqliteStorage {
    fn enqueue(&mut self, url: &str) -> StorageResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO frontier (url)
             SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM visited_urls WHERE url = ?1)",
            params![url],
        )?;
        Ok(inserted == 1)
    }

    fn dequeue(&mut self) -> StorageResult<Option<String>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let next: Option<(i64, String)> = tx
            .query_row(
                "SELECT id, url FROM frontier WHERE claimed = 0 ORDER BY id LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        if let Some((id, _)) = &next {
            tx.execute("UPDATE frontier SET claimed = 1 WHERE id = ?1", params![id])?;
        }

        tx.commit()?;
        Ok(next.map(|(_, url)| url))
    }

    fn mark_visited(&mut self, url: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM frontier WHERE url = ?1", params![url])?;
        tx.execute(
            "INSERT OR IGNORE INTO visited_urls (url, visited_at) VALUES (?1, ?2)",
            params![url, now],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn is_visited(&self, url: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM visited_urls WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn is_queued(&self, url: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM frontier WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn release_claimed(&mut self) -> StorageResult<u64> {
        let released = self
            .conn
            .execute("UPDATE frontier SET claimed = 0 WHERE claimed = 1", [])?;
        Ok(released as u64)
    }

    fn queued_len(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM frontier")
    }

    fn visited_len(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM visited_urls")
    }

    fn clear_frontier(&mut self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM frontier", [])?;
        Ok(())
    }
}

impl SessionStore for SqliteStorage {
    fn create_session(&mut self, config_hash: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO sessions (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, SessionStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn finish_session(
        &mut self,
        session_id: i64,
        status: SessionStatus,
        pages_crawled: u64,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE sessions SET status = ?1, finished_at = ?2, pages_crawled = ?3 WHERE id = ?4",
            params![
                status.to_db_string(),
                now,
                pages_crawled as i64,
                session_id
            ],
        )?;
        if updated == 0 {
            return Err(StorageError::SessionNotFound(session_id));
        }
        Ok(())
    }

    fn get_session(&self, session_id: i64) -> StorageResult<SessionRecord> {
        self.conn
            .query_row(
                "SELECT id, started_at, finished_at, config_hash, status, pages_crawled
                 FROM sessions WHERE id = ?1",
                params![session_id],
                session_record,
            )
            .optional()?
            .ok_or(StorageError::SessionNotFound(session_id))
    }

    fn latest_session(&self) -> StorageResult<Option<SessionRecord>> {
        let session = self
            .conn
            .query_row(
                "SELECT id, started_at, finished_at, config_hash, status, pages_crawled
                 FROM sessions ORDER BY id DESC LIMIT 1",
                [],
                session_record,
            )
            .optional()?;
        Ok(session)
    }
}
