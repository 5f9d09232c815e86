//! Fetch capability and its HTTP implementation
//!
//! The crawl core only ever sees the [`Fetcher`] trait. This module also
//! provides [`HttpFetcher`], which:
//! - Builds a `reqwest` client with the configured user agent and timeouts
//! - Maps HTTP statuses and transport errors onto [`FetchError`]
//! - Extracts the page title and outbound links from HTML responses

use crate::config::FetcherConfig;
use crate::crawler::parser::parse_html;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Content summary reported for the page
    pub body: String,

    /// Outbound links in page order
    pub links: Vec<String>,
}

impl FetchedPage {
    pub fn new(body: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            body: body.into(),
            links,
        }
    }
}

/// Capability to retrieve one page and its outbound links
///
/// One fetcher instance is shared by every task of a crawl and may be called
/// from many tasks at once.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, returning its body and links or the reason it failed
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;
}

/// Fetches pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the fetcher configuration
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Client built successfully
    /// * `Err(reqwest::Error)` - The TLS backend or client failed to initialize
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

/// Builds an HTTP client with the configured user agent and timeouts
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// # Response Handling
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Unparseable URL | `InvalidUrl` |
    /// | HTTP 404 / 410 | `NotFound` |
    /// | Other non-2xx | `Status` |
    /// | Timeout, connect failure | `Network` |
    /// | 2xx HTML | title as body, extracted links |
    /// | 2xx other content | `[content-type]` as body, no links |
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| classify_transport_error(url, &e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let text = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !content_type.is_empty() && !content_type.contains("html") {
            tracing::debug!("{} is {}, not following links", url, content_type);
            return Ok(FetchedPage::new(format!("[{}]", content_type), Vec::new()));
        }

        let page = parse_html(&text, &final_url);
        Ok(FetchedPage::new(page.title.unwrap_or_default(), page.links))
    }
}

fn classify_transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else {
        error.to_string()
    };

    FetchError::Network {
        url: url.to_string(),
        message,
    }
}
