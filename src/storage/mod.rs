//! Storage module for persisting counts and crawl state
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Frequency tables for syllables, monographs, digraphs and trigraphs
//! - The URL frontier and visit history
//! - Session tracking

mod schema;
mod sqlite;
mod traits;

pub use schema::table_name;
pub use sqlite::SqliteStorage;
pub use traits::{
    FrontierStore, SessionStore, Storage, StorageError, StorageResult, TallyStore,
};

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage handle shared between the coordinator and its workers
pub type SharedStorage = Arc<Mutex<SqliteStorage>>;

/// Wraps a storage backend for sharing between tasks
pub fn share(storage: SqliteStorage) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}

/// Locks shared storage, recovering a poisoned lock
///
/// Each storage call is its own transaction.
pub fn lock(storage: &SharedStorage) -> MutexGuard<'_, SqliteStorage> {
    match storage.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRecord {
    pub unit: String,
    pub frequency: u64,
    pub last_word: String,
    pub last_url: String,
}

/// Represents a crawl session
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: SessionStatus,
    pub pages_crawled: u64,
}

/// Status of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Running,
    Completed,
    Interrupted,
    Failed,
}

impl SessionStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "interrupted" => Some(Self::Interrupted),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}
