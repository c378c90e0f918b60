//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the crawler's user agent
//! - GET requests with a per-request timeout
//! - Classifying failures so the worker can log and move on

use crate::config::UserAgentConfig;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 5;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched an HTML page
    Page {
        /// Final URL after redirects
        final_url: Url,
        /// Decoded page body
        body: String,
    },

    /// Server answered with a non-success status
    Status(u16),

    /// Response is not HTML
    NotHtml(String),

    /// Request did not complete within the timeout
    Timeout,

    /// Connection, DNS, TLS or redirect failure
    Transport(String),

    /// Response body could not be read or decoded
    Body(String),
}

impl FetchOutcome {
    /// Returns true if a page body is available
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page { .. })
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page { final_url, body } => {
                write!(f, "page {} ({} bytes)", final_url, body.len())
            }
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::NotHtml(content_type) => write!(f, "not HTML ({})", content_type),
            Self::Timeout => write!(f, "timed out"),
            Self::Transport(error) => write!(f, "transport error: {}", error),
            Self::Body(error) => write!(f, "body error: {}", error),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total time allowed for one request
///
/// # Example
///
/// ```no_run
/// use hece::config::UserAgentConfig;
/// use hece::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "HeceBot".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once; failures are not retried
///
/// A missing `Content-Type` is treated as HTML.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => return FetchOutcome::Timeout,
        Err(e) => return FetchOutcome::Transport(e.to_string()),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Status(status.as_u16());
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if !content_type.is_empty() && !content_type.contains("html") {
        return FetchOutcome::NotHtml(content_type);
    }

    let final_url = response.url().clone();

    match response.text().await {
        Ok(body) => FetchOutcome::Page { final_url, body },
        Err(e) if e.is_timeout() => FetchOutcome::Timeout,
        Err(e) => FetchOutcome::Body(e.to_string()),
    }
}
