//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the hece database.

use crate::text::UnitKind;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Frequency tables, one per unit kind
CREATE TABLE IF NOT EXISTS syllables (
    unit TEXT PRIMARY KEY,
    frequency INTEGER NOT NULL DEFAULT 0,
    last_word TEXT NOT NULL,
    last_url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS monographs (
    unit TEXT PRIMARY KEY,
    frequency INTEGER NOT NULL DEFAULT 0,
    last_word TEXT NOT NULL,
    last_url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS digraphs (
    unit TEXT PRIMARY KEY,
    frequency INTEGER NOT NULL DEFAULT 0,
    last_word TEXT NOT NULL,
    last_url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS trigraphs (
    unit TEXT PRIMARY KEY,
    frequency INTEGER NOT NULL DEFAULT 0,
    last_word TEXT NOT NULL,
    last_url TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_syllables_freq ON syllables(frequency DESC);
CREATE INDEX IF NOT EXISTS idx_monographs_freq ON monographs(frequency DESC);
CREATE INDEX IF NOT EXISTS idx_digraphs_freq ON digraphs(frequency DESC);
CREATE INDEX IF NOT EXISTS idx_trigraphs_freq ON trigraphs(frequency DESC);

-- Every distinct word that produced observations
CREATE TABLE IF NOT EXISTS words (
    word TEXT PRIMARY KEY
);

-- URLs waiting to be fetched; claimed rows are in flight
CREATE TABLE IF NOT EXISTS frontier (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    claimed INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_frontier_claimed ON frontier(claimed, id);

-- Append-only visit history
CREATE TABLE IF NOT EXISTS visited_urls (
    url TEXT PRIMARY KEY,
    visited_at TEXT NOT NULL
);

-- Crawl sessions
CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    pages_crawled INTEGER NOT NULL DEFAULT 0
);
"#;

/// Name of the frequency table holding units of `kind`
pub fn table_name(kind: UnitKind) -> &'static str {
    kind.plural()
}

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        let result = initialize_schema(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize_schema(&conn).unwrap();
        let result = initialize_schema(&conn);

        assert!(result.is_ok());
    }

    #[test]
    fn test_tables_exist_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let mut tables: Vec<&str> = UnitKind::ALL.iter().map(|k| table_name(*k)).collect();
        tables.extend(["words", "frontier", "visited_urls", "sessions"]);

        for table in tables {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table {} should exist", table);
        }
    }
}
