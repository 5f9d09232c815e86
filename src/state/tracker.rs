//! Completion tracking for in-flight crawl tasks
//!
//! The tracker is a counter with a "reached zero" signal. Parents register a
//! child before spawning it and the child deregisters when it ends, so the
//! count can only drop to zero once the whole task tree has finished.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Counts outstanding crawl tasks and wakes waiters when none remain
#[derive(Debug)]
pub struct CompletionTracker {
    /// Outstanding task count; the watch channel serializes every update
    outstanding: watch::Sender<usize>,

    /// How many times the count has dropped to zero
    completions: AtomicUsize,
}

impl CompletionTracker {
    /// Creates a tracker with no outstanding tasks
    pub fn new() -> Self {
        let (outstanding, _) = watch::channel(0);
        Self {
            outstanding,
            completions: AtomicUsize::new(0),
        }
    }

    /// Registers `n` additional outstanding tasks
    ///
    /// Must be called by the spawning side before the new task can run.
    pub fn add(&self, n: usize) {
        if n == 0 {
            return;
        }
        self.outstanding.send_modify(|count| *count += n);
    }

    /// Deregisters one outstanding task
    ///
    /// # Panics
    ///
    /// Panics if no task is outstanding. That only happens when some task
    /// deregistered twice, which is a bug in the caller.
    pub fn done(&self) {
        let mut underflow = false;

        self.outstanding.send_if_modified(|count| {
            if *count == 0 {
                underflow = true;
                return false;
            }
            *count -= 1;
            if *count == 0 {
                // Counted under the channel lock, before waiters are woken.
                self.completions.fetch_add(1, Ordering::SeqCst);
            }
            true
        });

        if underflow {
            panic!("completion tracker count went negative");
        }
    }

    /// Registers one task and returns the guard that deregisters it
    ///
    /// The guard is created by the parent and moved into the child. Dropping
    /// it calls [`done`](Self::done) exactly once, whichever way the child
    /// exits.
    pub fn register(self: &Arc<Self>) -> PendingTask {
        self.add(1);
        PendingTask {
            tracker: Arc::clone(self),
        }
    }

    /// Waits until the outstanding count is zero
    pub async fn wait(&self) {
        let mut rx = self.outstanding.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|count| *count == 0).await;
    }

    /// Current number of outstanding tasks
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Number of times the count has transitioned to zero
    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered task's claim on the [`CompletionTracker`]
///
/// Dropping the guard deregisters the task.
#[derive(Debug)]
#[must_use = "dropping a PendingTask immediately marks the task as done"]
pub struct PendingTask {
    tracker: Arc<CompletionTracker>,
}

impl PendingTask {
    /// The tracker this task is registered with
    pub fn tracker(&self) -> &Arc<CompletionTracker> {
        &self.tracker
    }
}

impl Drop for PendingTask {
    fn drop(&mut self) {
        self.tracker.done();
    }
}
