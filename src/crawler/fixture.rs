//! In-memory fetcher backed by a fixed link graph
//!
//! Pages are read-only after construction. The only mutable part is the
//! per-URL call counter used to check at-most-once fetching.

use crate::config::PageEntry;
use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Fetcher that serves canned pages from a map
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, FetchedPage>,
    calls: Mutex<HashMap<String, usize>>,
    latency: Option<Duration>,
}

impl FixtureFetcher {
    /// Creates a fixture with no pages; every fetch reports `NotFound`
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a page
    pub fn with_page<I, S>(mut self, url: &str, body: &str, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages.insert(
            url.to_string(),
            FetchedPage::new(body, links.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Makes every fetch sleep for `latency` before answering
    ///
    /// Lets tests keep many tasks in flight at the same time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Builds a fixture from configured page entries
    pub fn from_entries(entries: &[PageEntry]) -> Self {
        entries.iter().fold(Self::new(), |fixture, entry| {
            fixture.with_page(&entry.url, &entry.body, entry.links.iter().cloned())
        })
    }

    /// The classic four-page golang.org tour graph
    ///
    /// `http://golang.org/cmd/` is linked from two pages but has no entry,
    /// so a crawl over this fixture always reports exactly one failure.
    pub fn tour() -> Self {
        Self::new()
            .with_page(
                "http://golang.org/",
                "The Go Programming Language",
                ["http://golang.org/pkg/", "http://golang.org/cmd/"],
            )
            .with_page(
                "http://golang.org/pkg/",
                "Packages",
                [
                    "http://golang.org/",
                    "http://golang.org/cmd/",
                    "http://golang.org/pkg/fmt/",
                    "http://golang.org/pkg/os/",
                ],
            )
            .with_page(
                "http://golang.org/pkg/fmt/",
                "Package fmt",
                ["http://golang.org/", "http://golang.org/pkg/"],
            )
            .with_page(
                "http://golang.org/pkg/os/",
                "Package os",
                ["http://golang.org/", "http://golang.org/pkg/"],
            )
    }

    /// Number of pages in the fixture
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// How many times `url` has been fetched
    pub fn calls_for(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// Every URL fetched so far with its call count, sorted by URL
    pub fn call_counts(&self) -> Vec<(String, usize)> {
        let calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        let mut counts: Vec<(String, usize)> =
            calls.iter().map(|(url, n)| (url.clone(), *n)).collect();
        counts.sort();
        counts
    }

    /// Total number of fetch calls across all URLs
    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_insert(0) += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}
