//! In-memory execution history.

use std::collections::VecDeque;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use nautilus_domain::error::NautilusError;
use nautilus_domain::execution::ExecutionResult;

use crate::ports::ExecutionLog;
use crate::sync::lock;

/// [`ExecutionLog`] held in memory.
///
/// Unbounded by default. With a capacity, the oldest entries are evicted
/// once the log is full.
#[derive(Debug, Default)]
pub struct InMemoryExecutionLog {
    entries: Mutex<VecDeque<ExecutionResult>>,
    capacity: Option<NonZeroUsize>,
}

impl InMemoryExecutionLog {
    /// Create an unbounded log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log retaining at most `capacity` entries; `0` means unbounded.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: NonZeroUsize::new(capacity),
        }
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether the log retains no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl ExecutionLog for InMemoryExecutionLog {
    fn append(
        &self,
        result: ExecutionResult,
    ) -> impl Future<Output = Result<(), NautilusError>> + Send {
        let mut entries = lock(&self.entries);
        entries.push_back(result);
        if let Some(capacity) = self.capacity {
            while entries.len() > capacity.get() {
                entries.pop_front();
            }
        }
        drop(entries);
        async { Ok(()) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ExecutionResult>, NautilusError>> + Send {
        let all: Vec<ExecutionResult> = lock(&self.entries).iter().cloned().collect();
        async { Ok(all) }
    }

    fn clear(&self) -> impl Future<Output = Result<(), NautilusError>> + Send {
        lock(&self.entries).clear();
        async { Ok(()) }
    }
}
