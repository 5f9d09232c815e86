//! State module for coordinating crawl tasks
//!
//! This module holds the only mutable state shared between crawl tasks.
//!
//! # Components
//!
//! - `VisitedSet`: URLs already claimed by some task (deduplication)
//! - `CompletionTracker`: number of tasks still pending (termination)
//! - `PendingTask`: guard that deregisters one task from the tracker on drop

mod tracker;
mod visited;

// Re-export main types
pub use tracker::{CompletionTracker, PendingTask};
pub use visited::VisitedSet;
