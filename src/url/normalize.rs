use crate::UrlError;
use url::Url;

/// Query parameters that only carry tracking data
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "yclid", "igshid"];

/// Normalizes a URL for use as a frontier key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Require a host (the `url` crate lowercases it and resolves dot segments)
/// 3. Remove the fragment
/// 4. Remove tracking query parameters (`utm_*`, `fbclid`, ...), keeping the
///    order of the rest
/// 5. Remove an empty query string
///
/// Scheme, `www.` prefixes and trailing slashes are kept as-is so that the
/// key still points at the page the server actually serves.
///
/// # Examples
///
/// ```
/// use hece::url::normalize_url;
///
/// let url = normalize_url("https://TR.Wikipedia.org/wiki/Ankara#Tarih").unwrap();
/// assert_eq!(url.as_str(), "https://tr.wikipedia.org/wiki/Ankara");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Resolves `href` against `base` and normalizes the result
pub fn resolve_and_normalize(base: &Url, href: &str) -> Result<Url, UrlError> {
    let url = base
        .join(href)
        .map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    if url.query().is_some() {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
    }

    Ok(url)
}

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_scheme_and_www() {
        let result = normalize_url("http://www.example.com.tr/haber").unwrap();
        assert_eq!(result.as_str(), "http://www.example.com.tr/haber");
    }

    #[test]
    fn test_keeps_trailing_slash() {
        let result = normalize_url("https://example.com/kategori/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/kategori/");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_remove_fragment() {
        let result = normalize_url("https://tr.wikipedia.org/wiki/Ankara#Tarih").unwrap();
        assert_eq!(result.as_str(), "https://tr.wikipedia.org/wiki/Ankara");
    }

    #[test]
    fn test_lowercase_host_only() {
        let result = normalize_url("https://TR.WIKIPEDIA.ORG/wiki/Ankara").unwrap();
        assert_eq!(result.as_str(), "https://tr.wikipedia.org/wiki/Ankara");
    }

    #[test]
    fn test_dot_segments_resolved() {
        let result = normalize_url("https://example.com/a/../b/./c").unwrap();
        assert_eq!(result.as_str(), "https://example.com/b/c");
    }

    #[test]
    fn test_tracking_params_removed_order_kept() {
        let result =
            normalize_url("https://example.com/ara?q=elma&utm_source=x&sayfa=2&fbclid=1").unwrap();
        assert_eq!(result.as_str(), "https://example.com/ara?q=elma&sayfa=2");
    }

    #[test]
    fn test_only_tracking_params() {
        let result = normalize_url("https://example.com/?utm_medium=a&gclid=b").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_non_ascii_path_is_percent_encoded() {
        let result = normalize_url("https://tr.wikipedia.org/wiki/Türkiye").unwrap();
        assert_eq!(
            result.as_str(),
            "https://tr.wikipedia.org/wiki/T%C3%BCrkiye"
        );
    }

    #[test]
    fn test_resolve_relative() {
        let base = Url::parse("https://tr.wikipedia.org/wiki/Ankara").unwrap();
        let result = resolve_and_normalize(&base, "/wiki/%C4%B0stanbul#Nufus").unwrap();
        assert_eq!(
            result.as_str(),
            "https://tr.wikipedia.org/wiki/%C4%B0stanbul"
        );

        let result = resolve_and_normalize(&base, "Konya").unwrap();
        assert_eq!(result.as_str(), "https://tr.wikipedia.org/wiki/Konya");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));

        let base = Url::parse("https://example.com/").unwrap();
        let result = resolve_and_normalize(&base, "mailto:biri@example.com");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_malformed_url() {
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Parse(_))));
    }
}
