//! In-memory sink that keeps every record
//!
//! Used by tests and by callers that want to post-process results after the
//! crawl instead of streaming them.

use crate::output::traits::{CrawlRecord, CrawlSink};
use std::sync::{Mutex, PoisonError};

/// Collects records behind a mutex
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<CrawlRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records received so far, in arrival order
    pub fn records(&self) -> Vec<CrawlRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs of successfully fetched pages, sorted
    pub fn found_urls(&self) -> Vec<String> {
        self.urls_where(CrawlRecord::is_found)
    }

    /// URLs whose fetch failed, sorted
    pub fn failed_urls(&self) -> Vec<String> {
        self.urls_where(|record| !record.is_found())
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn urls_where(&self, keep: impl Fn(&CrawlRecord) -> bool) -> Vec<String> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let mut urls: Vec<String> = records
            .iter()
            .filter(|&record| keep(record))
            .map(|record| record.url().to_string())
            .collect();
        urls.sort();
        urls
    }
}

impl CrawlSink for MemorySink {
    fn record(&self, record: CrawlRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}
