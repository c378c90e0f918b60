//! HTML parser for extracting visible text and links
//!
//! This module handles parsing HTML content to extract:
//! - The page title
//! - Visible text (the word source)
//! - Links to follow (from `<a>` tags)

use crate::url::resolve_and_normalize;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "footer", "header", "template",
];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible text, whitespace-separated across element boundaries
    pub text: String,

    /// Distinct normalized links in document order
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts text and links
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` anywhere in the document, resolved against
/// `base_url` and normalized.
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:`, `data:` links
/// - Fragment-only links
/// - Anything that is not HTTP(S) after resolution
///
/// # Example
///
/// ```
/// use hece::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Deneme</title></head>
///     <body><p>Merhaba</p><script>var x;</script><a href="/sayfa">bağlantı</a></body></html>"#;
/// let base_url = Url::parse("https://example.com.tr/").unwrap();
/// let parsed = parse_page(html, &base_url);
/// assert_eq!(parsed.title.as_deref(), Some("Deneme"));
/// assert!(parsed.text.contains("Merhaba"));
/// assert!(!parsed.text.contains("var"));
/// assert_eq!(parsed.links[0].as_str(), "https://example.com.tr/sayfa");
/// ```
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_visible_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_visible_text(document: &Html) -> String {
    let mut text = String::new();
    collect_text(document.root_element(), &mut text);
    text
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            out.push_str(fragment);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !HIDDEN_ELEMENTS.contains(&child_element.value().name()) {
                collect_text(child_element, out);
            }
        }
    }
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    for element in document.select(&a_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(url) = resolve_link(href, base_url) {
            if seen.insert(url.as_str().to_string()) {
                links.push(url);
            }
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    resolve_and_normalize(base_url, href).ok()
}
