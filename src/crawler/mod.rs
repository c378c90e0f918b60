//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing for visible text and links
//! - Per-host politeness
//! - The shared frontier handle
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod throttle;

pub use coordinator::{run_crawl, Coordinator, CrawlReport, PageSummary};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use frontier::Frontier;
pub use parser::{parse_page, ParsedPage};
pub use throttle::HostThrottle;

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the database and recover unfinished URLs
/// 2. Enqueue the seeds and open a session
/// 3. Run the worker pool until interrupted, drained or out of page budget
/// 4. Close the session
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - SHA-256 of the configuration file
/// * `fresh` - Empty the frontier before seeding
pub async fn crawl(config: Config, config_hash: &str, fresh: bool) -> Result<CrawlReport> {
    run_crawl(config, config_hash, fresh).await
}
