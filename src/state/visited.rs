/// Visited-URL tracking shared by every task of one crawl
///
/// URLs are opaque strings here: `http://a/` and `http://a` are two different
/// entries.
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Concurrency-safe set of URLs that have been claimed by a crawl task
///
/// Membership only grows. Once a URL is claimed it stays claimed until the
/// set is dropped at the end of the crawl.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the caller if no task has claimed it yet
    ///
    /// The membership test and the insertion happen under one lock
    /// acquisition, so when several tasks race on the same URL exactly one
    /// of them sees `true`.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was absent and is now claimed by the caller
    /// * `false` - The URL was already claimed; nothing changed
    pub fn claim_if_new(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Returns true if `url` has already been claimed
    pub fn contains(&self, url: &str) -> bool {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    /// Number of claimed URLs
    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the claimed URLs in sorted order
    pub fn snapshot(&self) -> Vec<String> {
        let urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        let mut list: Vec<String> = urls.iter().cloned().collect();
        list.sort();
        list
    }
}
