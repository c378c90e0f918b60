/// Checks if a host matches a domain pattern
///
/// `"example.com"` matches only itself. `"*.example.com"` matches the bare
/// domain and every subdomain at any depth. Hosts are expected lowercase.
///
/// # Examples
///
/// ```
/// use hece::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.edu.tr", "metu.edu.tr"));
/// assert!(matches_wildcard("*.edu.tr", "edu.tr"));
/// assert!(!matches_wildcard("*.edu.tr", "example.tr"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .map_or(false, |prefix| prefix.ends_with('.'))
        }
        None => candidate == pattern,
    }
}

/// Returns true if the host matches any of the patterns
pub fn matches_any(patterns: &[String], candidate: &str) -> bool {
    patterns.iter().any(|p| matches_wildcard(p, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches_wildcard("tr.wikipedia.org", "tr.wikipedia.org"));
        assert!(!matches_wildcard("wikipedia.org", "tr.wikipedia.org"));
        assert!(!matches_wildcard("tr.wikipedia.org", "wikipedia.org"));
    }

    #[test]
    fn test_wildcard_depths() {
        assert!(matches_wildcard("*.gov.tr", "gov.tr"));
        assert!(matches_wildcard("*.gov.tr", "tbmm.gov.tr"));
        assert!(matches_wildcard("*.gov.tr", "www.tbmm.gov.tr"));
    }

    #[test]
    fn test_wildcard_no_partial_label() {
        assert!(!matches_wildcard("*.gov.tr", "xgov.tr"));
        assert!(!matches_wildcard("*.gov.tr", "gov.tr.example.com"));
        assert!(!matches_wildcard("*.gov.tr", ""));
    }

    #[test]
    fn test_matches_any() {
        let patterns = vec!["*.facebook.com".to_string(), "twitter.com".to_string()];
        assert!(matches_any(&patterns, "m.facebook.com"));
        assert!(matches_any(&patterns, "twitter.com"));
        assert!(!matches_any(&patterns, "x.com"));
        assert!(!matches_any(&[], "x.com"));
    }
}
