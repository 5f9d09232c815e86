//! Crawler module for concurrent, deduplicated page fetching
//!
//! This module contains the core crawling logic, including:
//! - The fetch capability trait and its HTTP and fixture implementations
//! - HTML link extraction for the HTTP fetcher
//! - The per-URL crawl task and its fan-out
//! - The driver that seeds a crawl and waits for it to finish

mod coordinator;
mod fetcher;
mod fixture;
mod parser;
mod task;

pub use coordinator::{crawl, crawl_blocking, Crawler};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use fixture::FixtureFetcher;
pub use parser::{parse_html, ParsedPage};

use crate::config::{Config, FetcherKind};
use crate::RippleError;
use std::sync::Arc;

/// Builds the fetcher selected by the configuration
///
/// A fixture configuration without any `[[page]]` entries falls back to the
/// built-in tour graph.
///
/// # Returns
///
/// * `Ok(Arc<dyn Fetcher>)` - Fetcher ready to share between tasks
/// * `Err(RippleError)` - The HTTP client could not be built
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn Fetcher>, RippleError> {
    let fetcher: Arc<dyn Fetcher> = match config.fetcher.kind {
        FetcherKind::Http => Arc::new(HttpFetcher::new(&config.fetcher)?),
        FetcherKind::Fixture if config.pages.is_empty() => Arc::new(FixtureFetcher::tour()),
        FetcherKind::Fixture => Arc::new(FixtureFetcher::from_entries(&config.pages)),
    };
    Ok(fetcher)
}
