//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the storage and frontier handles and runs a fixed
//! pool of workers. Each worker loops:
//! - claim a URL from the frontier (idle-waiting when it is empty)
//! - wait for the host's politeness slot, then fetch
//! - record every word of the visible text across the four tables
//! - enqueue in-scope links
//! - mark the URL visited, whether the fetch worked or not

use crate::config::Config;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_page;
use crate::crawler::throttle::HostThrottle;
use crate::crawler::{build_http_client, fetch_url, FetchOutcome};
use crate::storage::{
    lock, share, FrontierStore, SessionStatus, SessionStore, SharedStorage, SqliteStorage,
    TallyStore,
};
use crate::text::{extract, extract_distinct_words, extract_words, TokenizerOptions};
use crate::url::{classify_link, extract_host, normalize_url};
use crate::Result;
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

/// Pages between two progress log lines
const PROGRESS_INTERVAL: u64 = 10;

/// Summary of a finished crawl session
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub session_id: i64,
    pub status: SessionStatus,
    pub pages_crawled: u64,
    pub pages_failed: u64,
    pub words_recorded: u64,
    pub links_queued: u64,
    pub elapsed: Duration,
}

/// What happened to one claimed URL
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub fetched: bool,
    pub words: u64,
    pub links_queued: u64,
}

#[derive(Debug, Default)]
struct Counters {
    budget_claimed: AtomicU64,
    pages: AtomicU64,
    failed: AtomicU64,
    words: AtomicU64,
    links: AtomicU64,
}

/// Everything a worker needs, shared behind one `Arc`
struct CrawlContext {
    config: Config,
    storage: SharedStorage,
    frontier: Frontier,
    throttle: HostThrottle,
    client: Client,
    tokenizer: TokenizerOptions,
    counters: Counters,
    interrupted: AtomicBool,
    started: Instant,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    storage: SharedStorage,
    client: Client,
    session_id: i64,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Opens the database, returns URLs claimed by an earlier crashed run to
    /// the queue, opens a session and enqueues the seeds.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `config_hash` - Hash of the configuration file, recorded on the session
    /// * `fresh` - Whether to empty the frontier first (counts and history are kept)
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HeceError)` - Failed to initialize
    pub fn new(config: Config, config_hash: &str, fresh: bool) -> Result<Self> {
        let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
        Self::with_storage(config, storage, config_hash, fresh)
    }

    /// Creates a coordinator over an already opened storage backend
    pub fn with_storage(
        config: Config,
        mut storage: SqliteStorage,
        config_hash: &str,
        fresh: bool,
    ) -> Result<Self> {
        if fresh {
            storage.clear_frontier()?;
            info!("Cleared frontier for a fresh crawl");
        }

        let released = storage.release_claimed()?;
        if released > 0 {
            info!("Returned {} unfinished URLs to the frontier", released);
        }

        let mut seeded = 0;
        for seed in &config.scope.seeds {
            let normalized = normalize_url(seed)?;
            if storage.enqueue(normalized.as_str())? {
                seeded += 1;
            }
        }
        info!(
            "Frontier holds {} URLs ({} new seeds)",
            storage.queued_len()?,
            seeded
        );

        let session_id = storage.create_session(config_hash)?;

        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;

        Ok(Self {
            config,
            storage: share(storage),
            client,
            session_id,
        })
    }

    /// Shared storage handle (for statistics after the crawl)
    pub fn storage(&self) -> SharedStorage {
        Arc::clone(&self.storage)
    }

    /// ID of the session opened for this crawl
    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    /// Runs the crawl until interrupted, drained or out of page budget
    ///
    /// The session row is closed with `completed`, or `interrupted` on Ctrl-C.
    pub async fn run(self) -> Result<CrawlReport> {
        let workers = self.config.crawler.workers;
        info!(
            "Starting crawl session {} with {} workers",
            self.session_id, workers
        );

        let ctx = Arc::new(CrawlContext {
            frontier: Frontier::new(
                Arc::clone(&self.storage),
                Duration::from_millis(self.config.crawler.idle_wait_ms),
            ),
            throttle: HostThrottle::new(Duration::from_millis(self.config.crawler.host_delay_ms)),
            tokenizer: TokenizerOptions {
                min_word_length: self.config.text.min_word_length,
                skip_capitalized: self.config.text.skip_capitalized,
            },
            storage: Arc::clone(&self.storage),
            client: self.client.clone(),
            config: self.config,
            counters: Counters::default(),
            interrupted: AtomicBool::new(false),
            started: Instant::now(),
        });

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let shutdown_tx = Arc::new(shutdown_tx);

        let signal_task = {
            let ctx = Arc::clone(&ctx);
            let shutdown_tx = Arc::clone(&shutdown_tx);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupt received, stopping workers");
                    ctx.interrupted.store(true, Ordering::SeqCst);
                    let _ = shutdown_tx.send(true);
                    ctx.frontier.wake_all();
                }
            })
        };

        let mut set = JoinSet::new();
        for worker_id in 0..workers {
            let ctx = Arc::clone(&ctx);
            let shutdown_tx = Arc::clone(&shutdown_tx);
            let shutdown_rx = shutdown_rx.clone();
            set.spawn(async move { worker_loop(worker_id, ctx, shutdown_tx, shutdown_rx).await });
        }

        while let Some(joined) = set.join_next().await {
            if let Err(e) = joined {
                warn!("Worker task ended abnormally: {}", e);
            }
        }
        signal_task.abort();

        let status = if ctx.interrupted.load(Ordering::SeqCst) {
            SessionStatus::Interrupted
        } else {
            SessionStatus::Completed
        };

        let report = CrawlReport {
            session_id: self.session_id,
            status,
            pages_crawled: ctx.counters.pages.load(Ordering::SeqCst),
            pages_failed: ctx.counters.failed.load(Ordering::SeqCst),
            words_recorded: ctx.counters.words.load(Ordering::SeqCst),
            links_queued: ctx.counters.links.load(Ordering::SeqCst),
            elapsed: ctx.started.elapsed(),
        };

        lock(&self.storage).finish_session(self.session_id, status, report.pages_crawled)?;

        info!(
            "Crawl session {} {}: {} pages ({} failed), {} words in {:.1}s",
            report.session_id,
            status.to_db_string(),
            report.pages_crawled,
            report.pages_failed,
            report.words_recorded,
            report.elapsed.as_secs_f64()
        );

        Ok(report)
    }
}

async fn worker_loop(
    worker_id: u32,
    ctx: Arc<CrawlContext>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    debug!("Worker {} started", worker_id);

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        if !claim_page_budget(&ctx) {
            debug!("Worker {} found the page budget spent", worker_id);
            break;
        }

        let url = match ctx.frontier.pop().await {
            Ok(Some(url)) => url,
            Ok(None) => {
                release_page_budget(&ctx);
                if ctx.config.crawler.stop_when_drained && frontier_drained(&ctx) {
                    info!("Frontier drained, stopping");
                    let _ = shutdown_tx.send(true);
                    ctx.frontier.wake_all();
                    break;
                }
                continue;
            }
            Err(e) => {
                release_page_budget(&ctx);
                warn!("Worker {} could not read the frontier: {}", worker_id, e);
                tokio::time::sleep(Duration::from_millis(ctx.config.crawler.idle_wait_ms)).await;
                continue;
            }
        };

        // A claimed URL left unfinished here is released on the next startup
        let summary = tokio::select! {
            summary = visit(&ctx, &url) => summary,
            _ = shutdown_rx.changed() => break,
        };

        ctx.counters.words.fetch_add(summary.words, Ordering::SeqCst);
        ctx.counters.links.fetch_add(summary.links_queued, Ordering::SeqCst);
        if !summary.fetched {
            ctx.counters.failed.fetch_add(1, Ordering::SeqCst);
        }
        let pages = ctx.counters.pages.fetch_add(1, Ordering::SeqCst) + 1;

        if pages % PROGRESS_INTERVAL == 0 {
            let rate = pages as f64 / ctx.started.elapsed().as_secs_f64().max(0.001);
            info!(
                "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                pages,
                ctx.frontier.queued_len().unwrap_or(0),
                rate
            );
        }

        let max_pages = ctx.config.crawler.max_pages;
        if max_pages > 0 && pages >= max_pages {
            info!("Reached page limit of {}", max_pages);
            let _ = shutdown_tx.send(true);
            ctx.frontier.wake_all();
            break;
        }
    }

    debug!("Worker {} stopped", worker_id);
}

/// Reserves one page of the `max-pages` budget before a URL is claimed
fn claim_page_budget(ctx: &CrawlContext) -> bool {
    let max_pages = ctx.config.crawler.max_pages;
    max_pages == 0
        || ctx
            .counters
            .budget_claimed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < max_pages).then_some(n + 1)
            })
            .is_ok()
}

fn release_page_budget(ctx: &CrawlContext) {
    if ctx.config.crawler.max_pages > 0 {
        ctx.counters.budget_claimed.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Nothing queued and nothing claimed
fn frontier_drained(ctx: &CrawlContext) -> bool {
    matches!(ctx.frontier.queued_len(), Ok(0))
}

/// Fetches and processes one claimed URL, then marks it visited
async fn visit(ctx: &CrawlContext, url: &str) -> PageSummary {
    let mut summary = PageSummary::default();

    let host = match Url::parse(url).ok().as_ref().and_then(extract_host) {
        Some(host) => host,
        None => {
            warn!("Skipping unparseable URL {}", url);
            complete(ctx, url);
            return summary;
        }
    };

    ctx.throttle.wait_turn(&host).await;

    match fetch_url(&ctx.client, url).await {
        FetchOutcome::Page { final_url, body } => {
            summary.fetched = true;
            let redirected = final_url.as_str() != url;
            if redirected && already_visited(ctx, final_url.as_str()) {
                debug!("{} redirects to visited page {}", url, final_url);
                complete(ctx, url);
                return summary;
            }

            let page = parse_page(&body, &final_url);
            let page_host = extract_host(&final_url).unwrap_or(host);

            summary.words = record_text(ctx, &page.text, final_url.as_str());
            summary.links_queued = enqueue_links(ctx, &page_host, &page.links);

            debug!(
                "Processed {} ({}): {} words, {} new links",
                url,
                page.title.as_deref().unwrap_or("untitled"),
                summary.words,
                summary.links_queued
            );

            if redirected {
                complete(ctx, final_url.as_str());
            }
        }
        failure => {
            warn!("Failed to fetch {}: {}", url, failure);
            ctx.throttle.record_failure(&host);
        }
    }

    complete(ctx, url);
    summary
}

fn already_visited(ctx: &CrawlContext, url: &str) -> bool {
    match lock(&ctx.storage).is_visited(url) {
        Ok(visited) => visited,
        Err(e) => {
            warn!("Could not check whether {} was visited: {}", url, e);
            false
        }
    }
}

fn complete(ctx: &CrawlContext, url: &str) {
    if let Err(e) = ctx.frontier.complete(url) {
        warn!("Could not mark {} visited: {}", url, e);
    }
}

/// Records every accepted word of `text`; returns the number recorded
fn record_text(ctx: &CrawlContext, text: &str, url: &str) -> u64 {
    let words = if ctx.config.text.dedupe_per_page {
        extract_distinct_words(text, ctx.tokenizer)
    } else {
        extract_words(text, ctx.tokenizer)
    };

    let mut recorded = 0;
    for word in &words {
        let units = match extract(word) {
            Ok(units) => units,
            Err(e) => {
                debug!("Skipping word {:?}: {}", word, e);
                continue;
            }
        };

        match lock(&ctx.storage).record_word(word, url, &units.observations()) {
            Ok(()) => recorded += 1,
            Err(e) => warn!("Could not record {:?} from {}: {}", word, url, e),
        }
    }
    recorded
}

/// Enqueues in-scope links up to the per-page cap; returns the number newly queued
fn enqueue_links(ctx: &CrawlContext, page_host: &str, links: &[Url]) -> u64 {
    let mut queued = 0;
    let in_scope = links
        .iter()
        .filter(|link| classify_link(link, page_host, &ctx.config.scope).should_follow())
        .take(ctx.config.crawler.max_links_per_page);

    for link in in_scope {
        match ctx.frontier.push(link.as_str()) {
            Ok(true) => queued += 1,
            Ok(false) => {}
            Err(e) => warn!("Could not enqueue {}: {}", link, e),
        }
    }
    queued
}

/// Runs a complete crawl
///
/// # Example
///
/// ```no_run
/// use hece::config::load_config_with_hash;
/// use hece::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (config, hash) = load_config_with_hash(Path::new("hece.toml"))?;
/// let report = run_crawl(config, &hash, false).await?;
/// println!("Crawled {} pages", report.pages_crawled);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, config_hash: &str, fresh: bool) -> Result<CrawlReport> {
    let coordinator = Coordinator::new(config, config_hash, fresh)?;
    coordinator.run().await
}
