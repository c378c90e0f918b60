//! JSON export of the frequency tables
//!
//! Produces the read-only snapshot consumed by a downstream dashboard:
//! statistics, the most frequent units of each table, a random sample of
//! words and a UTC timestamp.

use crate::output::stats::{load_statistics, CrawlStatistics};
use crate::storage::{FrequencyRecord, Storage, TallyStore};
use crate::text::UnitKind;
use crate::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Snapshot written by `--export`
#[derive(Debug, Clone, Serialize)]
pub struct ExportSnapshot {
    pub stats: CrawlStatistics,
    pub top_syllables: Vec<FrequencyRecord>,
    pub top_monographs: Vec<FrequencyRecord>,
    pub top_digraphs: Vec<FrequencyRecord>,
    pub top_trigraphs: Vec<FrequencyRecord>,
    pub random_words: Vec<String>,
    pub last_updated: String,
}

impl ExportSnapshot {
    /// Top records of the table holding `kind`
    pub fn top(&self, kind: UnitKind) -> &[FrequencyRecord] {
        match kind {
            UnitKind::Syllable => &self.top_syllables,
            UnitKind::Monograph => &self.top_monographs,
            UnitKind::Digraph => &self.top_digraphs,
            UnitKind::Trigraph => &self.top_trigraphs,
        }
    }
}

/// Reads a snapshot from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to read
/// * `top` - Records per table
/// * `sample_words` - Size of the random word sample
pub fn build_snapshot(
    storage: &dyn Storage,
    top: usize,
    sample_words: usize,
) -> Result<ExportSnapshot> {
    Ok(ExportSnapshot {
        stats: load_statistics(storage)?,
        top_syllables: storage.top(UnitKind::Syllable, top)?,
        top_monographs: storage.top(UnitKind::Monograph, top)?,
        top_digraphs: storage.top(UnitKind::Digraph, top)?,
        top_trigraphs: storage.top(UnitKind::Trigraph, top)?,
        random_words: storage.sample_words(sample_words)?,
        last_updated: Utc::now().to_rfc3339(),
    })
}

/// Writes a snapshot as JSON, creating parent directories
pub fn write_snapshot(snapshot: &ExportSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Builds a snapshot and writes it to `path`
pub fn export_snapshot(
    storage: &dyn Storage,
    path: &Path,
    top: usize,
    sample_words: usize,
) -> Result<ExportSnapshot> {
    let snapshot = build_snapshot(storage, top, sample_words)?;
    write_snapshot(&snapshot, path)?;
    tracing::info!(
        "Exported {} pages, {} words to {}",
        snapshot.stats.pages,
        snapshot.stats.words,
        path.display()
    );
    Ok(snapshot)
}
