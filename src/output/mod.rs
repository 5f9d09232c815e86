//! Output module for crawl results
//!
//! This module handles:
//! - The sink interface tasks report fetched pages and failures to
//! - Console and in-memory sink implementations
//! - Crawl statistics and the end-of-run report

mod console;
mod memory;
pub mod stats;
mod traits;

pub use console::StdoutSink;
pub use memory::MemorySink;
pub use stats::{print_report, CrawlReport, ReportCounters};
pub use traits::{CrawlRecord, CrawlSink};
