//! HTML link extraction for the HTTP fetcher
//!
//! Pulls the outbound links and the `<title>` out of a fetched page. Links
//! come back absolute, fragment-free, in order of first appearance, each at
//! most once.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Links and title extracted from one HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Trimmed `<title>` text, if the page has a non-empty one
    pub title: Option<String>,

    /// Absolute http(s) URLs of every followable `<a href>`
    pub links: Vec<String>,
}

/// Parses `html` and resolves its links against `base_url`
///
/// **Skipped hrefs:** empty, `javascript:`, `mailto:`, `tel:`, `data:`,
/// fragment-only (`#...`), anchors carrying `download`, and anything that
/// does not resolve to http or https.
///
/// # Example
///
/// ```
/// use ripple_crawl::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<title>Home</title><a href="/docs#intro">Docs</a>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base);
/// assert_eq!(parsed.title.as_deref(), Some("Home"));
/// assert_eq!(parsed.links, vec!["https://example.com/docs"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, base_url),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(absolute) = resolve_link(href, base_url) {
            if seen.insert(absolute.clone()) {
                links.push(absolute);
            }
        }
    }

    links
}

fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }
    absolute.set_fragment(None);

    Some(absolute.to_string())
}
