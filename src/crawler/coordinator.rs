//! Crawl driver - seeds the root task and waits for the task tree to drain
//!
//! Each run gets its own visited set, completion tracker and counters, so
//! independent crawls can run side by side without seeing each other's
//! state.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::task::{spawn_task, CrawlContext};
use crate::output::{CrawlReport, CrawlSink};
use crate::state::CompletionTracker;
use crate::RippleError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Drives crawls over one fetcher, reporting to one sink
#[derive(Clone)]
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn CrawlSink>,
}

impl Crawler {
    /// Creates a crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page source shared by every task
    /// * `sink` - Receives one record per fetched or failed URL
    pub fn new(fetcher: Arc<dyn Fetcher>, sink: Arc<dyn CrawlSink>) -> Self {
        Self { fetcher, sink }
    }

    /// Crawls from `root_url`, following links up to `max_depth` hops
    ///
    /// The root page itself uses one unit of depth, so `max_depth = 1`
    /// fetches only the root and `max_depth <= 0` fetches nothing.
    ///
    /// Returns once no task is running or pending.
    pub async fn run(&self, root_url: &str, max_depth: i32) -> CrawlReport {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!("Starting crawl of {} (max depth {})", root_url, max_depth);

        let ctx = Arc::new(CrawlContext::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.sink),
        ));
        let tracker = Arc::new(CompletionTracker::new());

        let root = tracker.register();
        spawn_task(Arc::clone(&ctx), root_url.to_string(), max_depth, root);

        tracker.wait().await;

        let report = ctx.counters.snapshot(
            root_url,
            max_depth,
            started_at,
            start.elapsed(),
            tracker.completions(),
        );

        tracing::info!(
            "Crawl completed: {} pages found, {} failures, {} URLs claimed in {:?}",
            report.pages_found,
            report.fetch_failures,
            ctx.visited.len(),
            report.elapsed
        );

        report
    }
}

/// Runs a complete crawl
///
/// # Arguments
///
/// * `root_url` - Where the crawl starts; used verbatim, no normalization
/// * `max_depth` - Hop budget, root included
/// * `fetcher` - Page source
/// * `sink` - Result consumer
///
/// # Example
///
/// ```
/// use ripple_crawl::{crawl, FixtureFetcher, MemorySink};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let sink = Arc::new(MemorySink::new());
/// let report = crawl(
///     "http://golang.org/",
///     4,
///     Arc::new(FixtureFetcher::tour()),
///     sink.clone(),
/// )
/// .await;
/// assert_eq!(report.pages_found, 4);
/// # }
/// ```
pub async fn crawl(
    root_url: &str,
    max_depth: i32,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn CrawlSink>,
) -> CrawlReport {
    Crawler::new(fetcher, sink).run(root_url, max_depth).await
}

/// Runs a crawl on a fresh multi-threaded runtime, blocking the caller
///
/// For callers outside any async context. Must not be called from within a
/// Tokio runtime.
pub fn crawl_blocking(
    root_url: &str,
    max_depth: i32,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn CrawlSink>,
) -> Result<CrawlReport, RippleError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(crawl(root_url, max_depth, fetcher, sink)))
}
