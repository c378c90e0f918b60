//! Storage traits and error types
//!
//! The crawl path talks to storage through two traits: `TallyStore` for the
//! frequency tables and `FrontierStore` for the URL queue and visit history.
//! `SessionStore` keeps crawl session rows. `SqliteStorage` implements all
//! three, and `Storage` names the combination.

use crate::storage::{FrequencyRecord, SessionRecord, SessionStatus};
use crate::text::{Observation, UnitKind};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session not found: {0}")]
    SessionNotFound(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable frequency counters keyed by unit
///
/// Every write is a single atomic step: the increment and the overwrite of
/// `last_word`/`last_url` land together or not at all.
pub trait TallyStore {
    /// Increments `unit` in the `kind` table, creating it with frequency 1,
    /// and records `word`/`url` as its latest example
    fn record(&mut self, kind: UnitKind, unit: &str, word: &str, url: &str) -> StorageResult<()>;

    /// Stores a word and applies all of its observations in one transaction
    fn record_word(
        &mut self,
        word: &str,
        url: &str,
        observations: &[Observation],
    ) -> StorageResult<()>;

    /// All records of a table, highest frequency first
    fn snapshot(&self, kind: UnitKind) -> StorageResult<Vec<FrequencyRecord>>;

    /// The `limit` most frequent records of a table
    fn top(&self, kind: UnitKind, limit: usize) -> StorageResult<Vec<FrequencyRecord>>;

    /// Gets the record for one unit
    fn get_record(&self, kind: UnitKind, unit: &str) -> StorageResult<Option<FrequencyRecord>>;

    /// Number of distinct units in a table
    fn count_units(&self, kind: UnitKind) -> StorageResult<u64>;

    /// Sum of all frequencies in a table
    fn total_occurrences(&self, kind: UnitKind) -> StorageResult<u64>;

    /// Number of distinct words seen
    fn count_words(&self) -> StorageResult<u64>;

    /// A random sample of distinct words
    fn sample_words(&self, limit: usize) -> StorageResult<Vec<String>>;
}

/// Durable URL frontier
///
/// A URL is either queued (possibly claimed by a worker) or visited, never
/// both. Visited URLs are never queued again.
pub trait FrontierStore {
    /// Queues a URL unless it is already queued or visited
    ///
    /// Returns true if the URL was newly queued.
    fn enqueue(&mut self, url: &str) -> StorageResult<bool>;

    /// Claims the oldest unclaimed URL
    fn dequeue(&mut self) -> StorageResult<Option<String>>;

    /// Moves a URL out of the queue into the visit history
    fn mark_visited(&mut self, url: &str) -> StorageResult<()>;

    /// Returns true if the URL has been visited
    fn is_visited(&self, url: &str) -> StorageResult<bool>;

    /// Returns true if the URL is queued, claimed or not
    fn is_queued(&self, url: &str) -> StorageResult<bool>;

    /// Returns claimed URLs to the queue (used after a crash)
    fn release_claimed(&mut self) -> StorageResult<u64>;

    /// Number of queued URLs, claimed ones included
    fn queued_len(&self) -> StorageResult<u64>;

    /// Number of visited URLs
    fn visited_len(&self) -> StorageResult<u64>;

    /// Empties the queue, keeping the visit history
    fn clear_frontier(&mut self) -> StorageResult<()>;
}

/// Crawl session bookkeeping
pub trait SessionStore {
    /// Opens a new running session
    fn create_session(&mut self, config_hash: &str) -> StorageResult<i64>;

    /// Closes a session with its final status and page count
    fn finish_session(
        &mut self,
        session_id: i64,
        status: SessionStatus,
        pages_crawled: u64,
    ) -> StorageResult<()>;

    /// Gets a session by ID
    fn get_session(&self, session_id: i64) -> StorageResult<SessionRecord>;

    /// Gets the most recent session
    fn latest_session(&self) -> StorageResult<Option<SessionRecord>>;
}

/// Everything the crawl, statistics and export paths need from a backend
pub trait Storage: TallyStore + FrontierStore + SessionStore {}

impl<T: TallyStore + FrontierStore + SessionStore> Storage for T {}
