//! URL handling module for Hece
//!
//! This module provides URL normalization, host extraction, wildcard matching,
//! and the scope check that decides which discovered links are followed.

mod host;
mod matcher;
mod normalize;

use crate::config::ScopeConfig;
use url::Url;

// Re-export main functions
pub use host::extract_host;
pub use matcher::{matches_any, matches_wildcard};
pub use normalize::{normalize_url, resolve_and_normalize};

/// Path and keyword markers of Turkish-language pages
const TURKISH_PATH_MARKERS: &[&str] = &["/tr/", "/tr?"];
const TURKISH_KEYWORDS: &[&str] = &["turkish", "turkiye", "istanbul"];

/// Why a discovered link is or is not followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// Host matches a blocked pattern
    Blocked,
    /// Same host as the page it was found on
    SameHost,
    /// Host matches an allowed pattern
    Allowed,
    /// Off-host, but the URL looks Turkish
    TurkishHint,
    /// None of the above
    OutOfScope,
}

impl LinkScope {
    /// Returns true if the link should be enqueued
    pub fn should_follow(&self) -> bool {
        matches!(self, Self::SameHost | Self::Allowed | Self::TurkishHint)
    }
}

/// Returns true if the URL carries a Turkish-language hint
///
/// Hints are a `.tr` top-level domain, a `tr.` language subdomain
/// (`tr.wikipedia.org`), a `/tr/` path segment, or one of the keywords
/// `turkish`, `turkiye`, `istanbul` anywhere in the URL.
pub fn is_turkish_hint(url: &Url) -> bool {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    if host.ends_with(".tr") || host.starts_with("tr.") {
        return true;
    }

    let path = url.path().to_lowercase();
    if path == "/tr" || path.ends_with("/tr") {
        return true;
    }

    let full = url.as_str().to_lowercase();
    TURKISH_PATH_MARKERS.iter().any(|m| full.contains(m))
        || TURKISH_KEYWORDS.iter().any(|k| full.contains(k))
}

/// Classifies a discovered link relative to the page it was found on
///
/// Checks run in priority order: blocked patterns, same host, allowed
/// patterns, Turkish hints (when enabled).
///
/// # Arguments
///
/// * `link` - The normalized link
/// * `page_host` - Lowercase host of the page containing the link
/// * `scope` - Scope configuration
///
/// # Examples
///
/// ```no_run
/// use hece::config::Config;
/// use hece::url::{classify_link, LinkScope};
/// use url::Url;
///
/// # fn example(config: &Config) {
/// let link = Url::parse("https://www.haber.com.tr/gundem").unwrap();
/// let scope = classify_link(&link, "tr.wikipedia.org", &config.scope);
/// assert_eq!(scope, LinkScope::TurkishHint);
/// # }
/// ```
pub fn classify_link(link: &Url, page_host: &str, scope: &ScopeConfig) -> LinkScope {
    let host = match extract_host(link) {
        Some(host) => host,
        None => return LinkScope::OutOfScope,
    };

    if matches_any(&scope.blocked_domains, &host) {
        return LinkScope::Blocked;
    }

    if host == page_host {
        return LinkScope::SameHost;
    }

    if matches_any(&scope.allowed_domains, &host) {
        return LinkScope::Allowed;
    }

    if scope.follow_turkish_hints && is_turkish_hint(link) {
        return LinkScope::TurkishHint;
    }

    LinkScope::OutOfScope
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_scope() -> ScopeConfig {
        ScopeConfig {
            seeds: vec!["https://tr.wikipedia.org/wiki/Ankara".to_string()],
            allowed_domains: vec!["*.example.org".to_string()],
            blocked_domains: vec!["*.facebook.com".to_string(), "spam.com.tr".to_string()],
            follow_turkish_hints: true,
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_turkish_hints() {
        assert!(is_turkish_hint(&url("https://www.haber.com.tr/")));
        assert!(is_turkish_hint(&url("https://tr.wikipedia.org/wiki/Konya")));
        assert!(is_turkish_hint(&url("https://example.com/tr/hakkimizda")));
        assert!(is_turkish_hint(&url("https://example.com/tr")));
        assert!(is_turkish_hint(&url("https://example.com/?lang=x&p=/tr?")));
        assert!(is_turkish_hint(&url("https://visit-istanbul.com/")));
        assert!(is_turkish_hint(&url("https://example.com/Turkish-Food")));

        assert!(!is_turkish_hint(&url("https://en.wikipedia.org/wiki/Ankara")));
        assert!(!is_turkish_hint(&url("https://example.com/trains")));
        assert!(!is_turkish_hint(&url("https://example.trade/")));
    }

    #[test]
    fn test_same_host() {
        let scope = create_test_scope();
        let link = url("https://en.wikipedia.org/wiki/Paris");
        assert_eq!(
            classify_link(&link, "en.wikipedia.org", &scope),
            LinkScope::SameHost
        );
    }

    #[test]
    fn test_blocked_beats_same_host() {
        let scope = create_test_scope();
        let link = url("https://m.facebook.com/sayfa");
        assert_eq!(
            classify_link(&link, "m.facebook.com", &scope),
            LinkScope::Blocked
        );

        let link = url("https://spam.com.tr/");
        assert_eq!(
            classify_link(&link, "tr.wikipedia.org", &scope),
            LinkScope::Blocked
        );
    }

    #[test]
    fn test_allowed_domain() {
        let scope = create_test_scope();
        let link = url("https://docs.example.org/guide");
        assert_eq!(
            classify_link(&link, "tr.wikipedia.org", &scope),
            LinkScope::Allowed
        );
    }

    #[test]
    fn test_hint_and_out_of_scope() {
        let mut scope = create_test_scope();
        let turkish = url("https://www.haber.com.tr/gundem");
        let foreign = url("https://www.bbc.co.uk/news");

        assert_eq!(
            classify_link(&turkish, "tr.wikipedia.org", &scope),
            LinkScope::TurkishHint
        );
        assert_eq!(
            classify_link(&foreign, "tr.wikipedia.org", &scope),
            LinkScope::OutOfScope
        );

        scope.follow_turkish_hints = false;
        assert_eq!(
            classify_link(&turkish, "tr.wikipedia.org", &scope),
            LinkScope::OutOfScope
        );
    }

    #[test]
    fn test_should_follow() {
        assert!(LinkScope::SameHost.should_follow());
        assert!(LinkScope::Allowed.should_follow());
        assert!(LinkScope::TurkishHint.should_follow());
        assert!(!LinkScope::Blocked.should_follow());
        assert!(!LinkScope::OutOfScope.should_follow());
    }
}
