use serde::Deserialize;

/// Main configuration structure for Hece
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub text: TextConfig,
    pub scope: ScopeConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent workers
    pub workers: u32,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Minimum time between requests to the same host (milliseconds)
    #[serde(rename = "host-delay-ms")]
    pub host_delay_ms: u64,

    /// How long a worker waits on an empty frontier before checking again
    #[serde(rename = "idle-wait-ms", default = "default_idle_wait_ms")]
    pub idle_wait_ms: u64,

    /// Maximum links enqueued from one page
    #[serde(rename = "max-links-per-page", default = "default_max_links_per_page")]
    pub max_links_per_page: usize,

    /// Stop after this many pages in one session (0 = unlimited)
    #[serde(rename = "max-pages", default)]
    pub max_pages: u64,

    /// Stop once the frontier is empty and no worker is busy
    #[serde(rename = "stop-when-drained", default)]
    pub stop_when_drained: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path of the JSON snapshot written by `--export`
    #[serde(rename = "export-path")]
    pub export_path: String,

    /// Records per table included in the export
    #[serde(rename = "export-top", default = "default_export_top")]
    pub export_top: usize,

    /// Random words included in the export
    #[serde(rename = "export-sample-words", default = "default_export_sample_words")]
    pub export_sample_words: usize,
}

/// Word extraction settings
#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    /// Words shorter than this many letters are dropped
    #[serde(rename = "min-word-length", default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Skip words starting with an uppercase letter (likely proper names)
    #[serde(rename = "skip-capitalized", default = "default_true")]
    pub skip_capitalized: bool,

    /// Count each distinct word once per page
    #[serde(rename = "dedupe-per-page", default = "default_true")]
    pub dedupe_per_page: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_word_length: default_min_word_length(),
            skip_capitalized: true,
            dedupe_per_page: true,
        }
    }
}

/// Crawl scope: where to start and which links to follow
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Seed URLs enqueued at startup
    pub seeds: Vec<String>,

    /// Host patterns that are always followed (e.g. "*.edu.tr")
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Host patterns that are never followed
    #[serde(rename = "blocked-domains", default)]
    pub blocked_domains: Vec<String>,

    /// Follow off-host links whose URL looks Turkish
    #[serde(rename = "follow-turkish-hints", default = "default_true")]
    pub follow_turkish_hints: bool,
}

fn default_idle_wait_ms() -> u64 {
    500
}

fn default_max_links_per_page() -> usize {
    50
}

fn default_export_top() -> usize {
    20
}

fn default_export_sample_words() -> usize {
    50
}

fn default_min_word_length() -> usize {
    2
}

fn default_true() -> bool {
    true
}
