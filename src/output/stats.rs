//! Statistics generation from the crawl database
//!
//! This module provides functionality for extracting and displaying
//! crawl statistics from the storage layer.

use crate::storage::{
    FrequencyRecord, FrontierStore, SessionRecord, SessionStore, Storage, TallyStore,
};
use crate::text::UnitKind;
use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rows shown per table by `print_report`
pub const REPORT_TOP: usize = 15;

/// Size of one frequency table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    /// Distinct units
    pub unique: u64,

    /// Sum of all frequencies
    pub total: u64,
}

/// Crawl statistics summary
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStatistics {
    /// Pages in the visit history
    pub pages: u64,

    /// Distinct words seen
    pub words: u64,

    /// URLs waiting in the frontier
    pub queue: u64,

    /// Per-table sizes keyed by table name
    #[serde(flatten)]
    pub tables: BTreeMap<&'static str, TableStats>,
}

impl CrawlStatistics {
    /// Size of the table holding units of `kind`
    pub fn table(&self, kind: UnitKind) -> TableStats {
        self.tables.get(kind.plural()).copied().unwrap_or_default()
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Successfully loaded statistics
/// * `Err(HeceError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn Storage) -> Result<CrawlStatistics> {
    let mut tables = BTreeMap::new();
    for kind in UnitKind::ALL {
        tables.insert(
            kind.plural(),
            TableStats {
                unique: storage.count_units(kind)?,
                total: storage.total_occurrences(kind)?,
            },
        );
    }

    Ok(CrawlStatistics {
        pages: storage.visited_len()?,
        words: storage.count_words()?,
        queue: storage.queued_len()?,
        tables,
    })
}

/// Prints statistics, the latest session and the top units of each table
///
/// # Arguments
///
/// * `storage` - The storage backend to query
pub fn print_report(storage: &dyn Storage) -> Result<()> {
    let stats = load_statistics(storage)?;
    print_statistics(&stats);

    if let Some(session) = storage.latest_session()? {
        print_session(&session);
    }

    for kind in UnitKind::ALL {
        let top = storage.top(kind, REPORT_TOP)?;
        print_top(kind, &top);
    }

    Ok(())
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.pages);
    println!("  Turkish words: {}", stats.words);
    println!("  Queue: {}", stats.queue);
    println!();

    println!("Tables:");
    for kind in UnitKind::ALL {
        let table = stats.table(kind);
        println!(
            "  {:<11} {:>8} unique {:>12} total",
            kind.plural(),
            table.unique,
            table.total
        );
    }
    println!();
}

fn print_session(session: &SessionRecord) {
    println!("Latest Session:");
    println!("  ID: {}", session.id);
    println!("  Status: {}", session.status.to_db_string());
    println!("  Started: {}", session.started_at);
    if let Some(finished) = &session.finished_at {
        println!("  Finished: {}", finished);
    }
    println!("  Pages: {}", session.pages_crawled);
    println!();
}

fn print_top(kind: UnitKind, records: &[FrequencyRecord]) {
    println!("Top {} {}:", records.len(), kind.plural());
    if records.is_empty() {
        println!("  (none)");
    }
    for (rank, record) in records.iter().enumerate() {
        println!(
            "  {:>2}. {:<6} {:>10}  ({})",
            rank + 1,
            record.unit,
            record.frequency,
            record.last_word
        );
    }
    println!();
}
