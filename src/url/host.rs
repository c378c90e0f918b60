use url::Url;

/// Extracts the lowercase host from a URL
///
/// The port is not part of the host, so two servers on the same machine
/// share politeness state.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use hece::url::extract_host;
///
/// let url = Url::parse("https://TR.Wikipedia.org/wiki/Ankara").unwrap();
/// assert_eq!(extract_host(&url), Some("tr.wikipedia.org".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://tr.wikipedia.org/wiki/Konya").unwrap();
        assert_eq!(extract_host(&url), Some("tr.wikipedia.org".to_string()));
    }

    #[test]
    fn test_extract_ignores_port() {
        let url = Url::parse("http://127.0.0.1:8080/sayfa").unwrap();
        assert_eq!(extract_host(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_no_host() {
        let url = Url::parse("data:text/plain,merhaba").unwrap();
        assert_eq!(extract_host(&url), None);
    }
}
