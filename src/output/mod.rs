//! Output module for statistics and snapshot export
//!
//! This module handles:
//! - Loading and printing crawl statistics
//! - Exporting the frequency tables as JSON for a downstream dashboard

pub mod export;
pub mod stats;

pub use export::{build_snapshot, export_snapshot, write_snapshot, ExportSnapshot};
pub use stats::{load_statistics, print_report, print_statistics, CrawlStatistics, TableStats};
