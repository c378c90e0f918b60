//! Hece main entry point
//!
//! This is the command-line interface for the Hece syllable crawler.

use anyhow::Context;
use clap::Parser;
use hece::config::{load_config_with_hash, Config};
use hece::crawler::crawl;
use hece::output::{export_snapshot, print_report};
use hece::storage::SqliteStorage;
use hece::text::{hyphenate, turkish_lowercase};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Hece: a Turkish syllable and n-gram frequency crawler
///
/// Hece crawls Turkish web pages, splits every word into syllables and
/// character n-grams, and keeps running frequency tables in SQLite.
#[derive(Parser, Debug)]
#[command(name = "hece")]
#[command(version)]
#[command(about = "A Turkish syllable and n-gram frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Empty the frontier before seeding (counts and visit history are kept)
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "export", "syllabify"])]
    dry_run: bool,

    /// Show statistics and the most frequent units, then exit
    #[arg(long, conflicts_with_all = ["dry_run", "export", "syllabify"])]
    stats: bool,

    /// Write the JSON snapshot to the configured export path, then exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "syllabify"])]
    export: bool,

    /// Print the syllables of the given words, then exit
    #[arg(long, value_name = "WORD", num_args = 1.., conflicts_with_all = ["dry_run", "stats", "export"])]
    syllabify: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.export {
        handle_export(&config)?;
    } else if !cli.syllabify.is_empty() {
        handle_syllabify(&cli.syllabify);
    } else {
        handle_crawl(config, &config_hash, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hece=info,warn"),
            1 => EnvFilter::new("hece=debug,info"),
            2 => EnvFilter::new("hece=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Hece Dry Run ===\n");

    println!("Crawler:");
    println!("  Workers: {}", config.crawler.workers);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Delay per host: {}ms", config.crawler.host_delay_ms);
    println!("  Links per page: {}", config.crawler.max_links_per_page);
    match config.crawler.max_pages {
        0 => println!("  Page limit: none"),
        n => println!("  Page limit: {}", n),
    }
    println!("  Stop when drained: {}", config.crawler.stop_when_drained);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nText:");
    println!("  Minimum word length: {}", config.text.min_word_length);
    println!("  Skip capitalized: {}", config.text.skip_capitalized);
    println!("  Count once per page: {}", config.text.dedupe_per_page);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Export: {}", config.output.export_path);

    println!("\nSeeds ({}):", config.scope.seeds.len());
    for seed in &config.scope.seeds {
        println!("  - {}", seed);
    }

    println!("\nAllowed Domains ({}):", config.scope.allowed_domains.len());
    for pattern in &config.scope.allowed_domains {
        println!("  - {}", pattern);
    }

    println!("\nBlocked Domains ({}):", config.scope.blocked_domains.len());
    for pattern in &config.scope.blocked_domains {
        println!("  - {}", pattern);
    }

    println!(
        "\nFollow Turkish-looking links: {}",
        config.scope.follow_turkish_hints
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))
        .with_context(|| format!("opening database {}", config.output.database_path))?;
    print_report(&storage)?;

    Ok(())
}

/// Handles the --export mode: writes the JSON snapshot
fn handle_export(config: &Config) -> anyhow::Result<()> {
    let storage = SqliteStorage::new(Path::new(&config.output.database_path))
        .with_context(|| format!("opening database {}", config.output.database_path))?;
    let path = Path::new(&config.output.export_path);

    export_snapshot(
        &storage,
        path,
        config.output.export_top,
        config.output.export_sample_words,
    )
    .with_context(|| format!("exporting snapshot to {}", path.display()))?;

    println!("✓ Snapshot exported to: {}", path.display());
    Ok(())
}

/// Handles the --syllabify mode: prints hyphenations
fn handle_syllabify(words: &[String]) {
    for word in words {
        let lowered = turkish_lowercase(word);
        match hyphenate(&lowered) {
            Ok(hyphenated) => println!("{} -> {}", word, hyphenated),
            Err(e) => println!("{} -> error: {}", word, e),
        }
    }
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    config_hash: &str,
    fresh: bool,
) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (frontier cleared, counts kept)");
    } else {
        tracing::info!("Starting crawl (resuming the stored frontier)");
    }

    tracing::info!(
        "Seeds: {}, allowed: {}, blocked: {}",
        config.scope.seeds.len(),
        config.scope.allowed_domains.len(),
        config.scope.blocked_domains.len()
    );

    let storage_path = config.output.database_path.clone();

    match crawl(config, config_hash, fresh).await {
        Ok(report) => {
            tracing::info!(
                "Crawl finished ({}): {} pages, {} new links",
                report.status.to_db_string(),
                report.pages_crawled,
                report.links_queued
            );
            let storage = SqliteStorage::new(Path::new(&storage_path))
                .with_context(|| format!("reopening database {}", storage_path))?;
            print_report(&storage)?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
