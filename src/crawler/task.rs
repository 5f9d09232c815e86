//! The crawl task: one URL, its fetch, and the fan-out to its links
//!
//! Every task owns a [`PendingTask`] guard created by whoever spawned it.
//! The guard is dropped when the task returns, unwinds, or early-outs, so
//! the completion tracker sees exactly one `done` per task.

use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::output::{CrawlRecord, CrawlSink, ReportCounters};
use crate::state::{PendingTask, VisitedSet};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// State shared by every task of one crawl
pub(crate) struct CrawlContext {
    pub(crate) fetcher: Arc<dyn Fetcher>,
    pub(crate) sink: Arc<dyn CrawlSink>,
    pub(crate) visited: VisitedSet,
    pub(crate) counters: ReportCounters,
}

impl CrawlContext {
    pub(crate) fn new(fetcher: Arc<dyn Fetcher>, sink: Arc<dyn CrawlSink>) -> Self {
        Self {
            fetcher,
            sink,
            visited: VisitedSet::new(),
            counters: ReportCounters::new(),
        }
    }
}

/// Spawns a crawl task for `url` with `depth` hops remaining
///
/// `pending` must already be registered with the tracker; the caller gives
/// up ownership of it here.
pub(crate) fn spawn_task(
    ctx: Arc<CrawlContext>,
    url: String,
    depth: i32,
    pending: PendingTask,
) -> JoinHandle<()> {
    ctx.counters.task_spawned();
    tokio::spawn(run_task(ctx, url, depth, pending))
}

async fn run_task(ctx: Arc<CrawlContext>, url: String, depth: i32, pending: PendingTask) {
    if depth <= 0 {
        tracing::trace!("Depth exhausted at {}", url);
        ctx.counters.depth_exhausted();
        return;
    }

    if !ctx.visited.claim_if_new(&url) {
        tracing::trace!("Already claimed: {}", url);
        ctx.counters.duplicate_skipped();
        return;
    }

    tracing::debug!("Fetching {} (depth {})", url, depth);
    let fetched = ctx.fetcher.fetch(&url).await;
    let FetchedPage { body, links } = match fetched {
        Ok(page) => page,
        Err(error) => {
            tracing::debug!("Fetch failed: {}", error);
            ctx.counters.fetch_failed();
            ctx.sink.record(CrawlRecord::Failed { url, error, depth });
            return;
        }
    };

    ctx.counters.page_found();
    ctx.sink.record(CrawlRecord::Found {
        url: url.clone(),
        body,
        depth,
    });

    tracing::debug!("{} links from {}", links.len(), url);
    for link in links {
        // Register before spawning so the count cannot hit zero in between.
        let child = pending.tracker().register();
        spawn_task(Arc::clone(&ctx), link, depth - 1, child);
    }
}
