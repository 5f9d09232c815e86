//! Output sink trait and record types
//!
//! A sink receives one record per finished fetch: the page on success, the
//! error on failure. Records from different branches arrive in no
//! particular order.

use crate::FetchError;

/// One completed fetch as seen by an output sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlRecord {
    /// The page was fetched successfully
    Found {
        /// The URL that was fetched
        url: String,
        /// Page body summary as returned by the fetcher
        body: String,
        /// Remaining hop budget when the page was fetched
        depth: i32,
    },

    /// The fetcher could not retrieve the URL
    Failed {
        /// The URL the task claimed and tried to fetch
        url: String,
        /// Why the fetch failed, as reported by the fetcher
        error: FetchError,
        /// Remaining hop budget when the fetch was attempted
        depth: i32,
    },
}

impl CrawlRecord {
    /// The URL this record is about
    pub fn url(&self) -> &str {
        match self {
            Self::Found { url, .. } => url,
            Self::Failed { url, .. } => url,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Formats the record the way the console sink prints it
    ///
    /// Successes read `found: <url> "<body>"`, failures are the error text.
    pub fn to_line(&self) -> String {
        match self {
            Self::Found { url, body, .. } => format!("found: {} {:?}", url, body),
            Self::Failed { error, .. } => error.to_string(),
        }
    }
}

/// Trait for consumers of crawl results
///
/// Sinks are shared by every task of a crawl, so implementations must be
/// safe to call from many threads at once.
pub trait CrawlSink: Send + Sync {
    /// Accepts one record
    fn record(&self, record: CrawlRecord);
}
