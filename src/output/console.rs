//! Console sink that prints one line per record

use crate::output::traits::{CrawlRecord, CrawlSink};
use std::io::Write;

/// Prints every record to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl CrawlSink for StdoutSink {
    fn record(&self, record: CrawlRecord) {
        // One locked write per record keeps lines from concurrent tasks whole.
        if let Err(e) = writeln!(std::io::stdout().lock(), "{}", record.to_line()) {
            tracing::warn!("Failed to write crawl record for {}: {}", record.url(), e);
        }
    }
}
