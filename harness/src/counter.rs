//! Completion counter shared by in-flight operations

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts successfully completed operations
///
/// Clones share the same underlying count, so each spawned operation task can
/// hold its own handle. The count only ever grows.
#[derive(Debug, Clone, Default)]
pub struct CompletionCounter {
    completed: Arc<AtomicU64>,
}

impl CompletionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed operation
    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    /// Current number of completed operations
    pub fn value(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }
}
