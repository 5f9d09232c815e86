//! Crawl statistics
//!
//! Tasks bump the shared `ReportCounters` as they exit. Once the crawl has
//! finished the driver freezes them into a `CrawlReport`.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Live counters shared by every task of one crawl
#[derive(Debug, Default)]
pub struct ReportCounters {
    found: AtomicUsize,
    failed: AtomicUsize,
    duplicates: AtomicUsize,
    depth_cut: AtomicUsize,
    spawned: AtomicUsize,
}

impl ReportCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn duplicate_skipped(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn depth_exhausted(&self) {
        self.depth_cut.fetch_add(1, Ordering::Relaxed);
    }

    pub fn task_spawned(&self) {
        self.spawned.fetch_add(1, Ordering::Relaxed);
    }

    /// Freezes the counters into a report
    ///
    /// Only meaningful once every task has finished.
    pub fn snapshot(
        &self,
        root_url: &str,
        max_depth: i32,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        completions: usize,
    ) -> CrawlReport {
        CrawlReport {
            root_url: root_url.to_string(),
            max_depth,
            pages_found: self.found.load(Ordering::Relaxed),
            fetch_failures: self.failed.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates.load(Ordering::Relaxed),
            depth_exhausted: self.depth_cut.load(Ordering::Relaxed),
            tasks_spawned: self.spawned.load(Ordering::Relaxed),
            completions,
            started_at,
            finished_at: Utc::now(),
            elapsed,
        }
    }
}

/// Summary of a finished crawl
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlReport {
    /// URL the crawl started from
    pub root_url: String,

    /// Hop budget the crawl was started with
    pub max_depth: i32,

    /// Pages fetched successfully
    pub pages_found: usize,

    /// Fetches that returned an error
    pub fetch_failures: usize,

    /// Tasks that found their URL already claimed
    pub duplicates_skipped: usize,

    /// Tasks that ended because the hop budget ran out
    pub depth_exhausted: usize,

    /// Total tasks created, root included
    pub tasks_spawned: usize,

    /// Times the outstanding-task count dropped to zero; 1 for a clean run
    pub completions: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Number of distinct URLs a fetch was attempted for
    pub fn urls_fetched(&self) -> usize {
        self.pages_found + self.fetch_failures
    }
}

/// Prints a report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Root URL: {}", report.root_url);
    println!("  Max depth: {}", report.max_depth);
    println!("  Started: {}", report.started_at.to_rfc3339());
    println!("  Duration: {:.3}s", report.elapsed.as_secs_f64());
    println!();

    println!("Tasks:");
    println!("  Spawned: {}", report.tasks_spawned);
    println!("  Pages found: {}", report.pages_found);
    println!("  Fetch failures: {}", report.fetch_failures);
    println!("  Duplicates skipped: {}", report.duplicates_skipped);
    println!("  Depth exhausted: {}", report.depth_exhausted);
    println!();

    let attempted = report.urls_fetched();
    let success_rate = if attempted > 0 {
        (report.pages_found as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} fetches succeeded)",
        success_rate, report.pages_found, attempted
    );
}
