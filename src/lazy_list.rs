//! Lazily-materialized list of presentation items.
//!
//! A fixed source sequence is paired with a slot array of the same length.
//! Slots are built on demand; when an access at a batch boundary performs a
//! first build, the next batch of empty slots is prefetched off-thread so
//! scrolling stays ahead of the consumer. Each slot is built at most once:
//! a prefetch and an on-demand access racing for the same slot resolve to a
//! single build through `OnceLock`. Prefetches are best-effort and their
//! results simply sit in the slots until (or unless) the UI visits them.

use crate::dispatch::TaskHandle;
use crate::error::{ApiError, ApiResult};
use std::sync::{Arc, OnceLock};

/// Default number of items prefetched ahead of a batch-boundary access
pub const PREFETCH_BATCH: usize = 10;

pub struct LazyList<T, P> {
    source: Arc<Vec<T>>,
    slots: Arc<Vec<OnceLock<P>>>,
    build: Arc<dyn Fn(&T) -> P + Send + Sync>,
    batch_size: usize,
    tasks: TaskHandle,
    version: u64,
}

impl<T, P> LazyList<T, P>
where
    T: Send + Sync + 'static,
    P: Send + Sync + 'static,
{
    pub fn new<F>(source: Vec<T>, batch_size: usize, tasks: TaskHandle, build: F) -> Self
    where
        F: Fn(&T) -> P + Send + Sync + 'static,
    {
        assert!(batch_size > 0, "batch size must be positive");
        let slots = (0..source.len()).map(|_| OnceLock::new()).collect();
        Self {
            source: Arc::new(source),
            slots: Arc::new(slots),
            build: Arc::new(build),
            batch_size,
            tasks,
            version: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the item at `index`, building it synchronously on first
    /// access. A first build at a batch boundary kicks off a background
    /// prefetch of the following batch; the call never waits for it.
    pub fn get(&self, index: usize) -> ApiResult<&P> {
        if index >= self.source.len() {
            return Err(ApiError::InvalidInput(format!(
                "index {} out of range (list has {} items)",
                index,
                self.source.len()
            )));
        }

        let mut first_build = false;
        let item = self.slots[index].get_or_init(|| {
            first_build = true;
            (self.build)(&self.source[index])
        });

        if first_build && index % self.batch_size == 0 {
            let end = (index + self.batch_size).min(self.source.len());
            self.prefetch(index + 1, end);
        }

        Ok(item)
    }

    /// True if the slot has been materialized
    pub fn is_built(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .map(|slot| slot.get().is_some())
            .unwrap_or(false)
    }

    /// Builds still-empty slots in `[start, end)` on a worker thread.
    /// Slots built on demand in the meantime are left untouched.
    fn prefetch(&self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        log::debug!("Prefetching list items {}..{}", start, end);
        let source = Arc::clone(&self.source);
        let slots = Arc::clone(&self.slots);
        let build = Arc::clone(&self.build);
        self.tasks.run_detached(move || {
            for i in start..end {
                let _ = slots[i].get_or_init(|| build(&source[i]));
            }
        });
    }

    /// Empties every slot; each index is rebuilt on next access.
    /// Observers can watch [`LazyList::version`] to notice the reset.
    /// An in-flight prefetch keeps writing to the discarded slot array,
    /// which is harmless.
    pub fn clear_cache(&mut self) {
        self.slots = Arc::new((0..self.source.len()).map(|_| OnceLock::new()).collect());
        self.version += 1;
    }

    /// Bumped every `clear_cache`
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
#[path = "lazy_list_tests.rs"]
mod tests;
