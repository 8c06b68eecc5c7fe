//! Background work dispatcher.
//!
//! Every UI-triggered fetch follows the same pattern: the work closure runs
//! on a worker thread, its outcome is queued on a channel, and the UI event
//! loop drains the queue each frame via [`Dispatcher::poll`]. Continuations
//! therefore always execute on the UI thread, exactly once, after the work
//! has finished. Failures (including panics inside the work closure) are
//! captured and delivered as values, never propagated across the thread
//! boundary as unhandled faults.

use crate::error::{ApiError, ApiResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A queued continuation, ready to run on the UI thread.
type Completion = Box<dyn FnOnce() + Send>;

/// Owns the tokio runtime and the completion queue.
/// Lives in UI state; `poll` must be called from the UI thread.
pub struct Dispatcher {
    runtime: Runtime,
    completion_tx: UnboundedSender<Completion>,
    completion_rx: UnboundedReceiver<Completion>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        Self {
            runtime,
            completion_tx: tx,
            completion_rx: rx,
        }
    }

    /// Cloneable handle for submitting work from anywhere.
    pub fn handle(&self) -> TaskHandle {
        TaskHandle {
            runtime: self.runtime.handle().clone(),
            completion_tx: self.completion_tx.clone(),
        }
    }

    /// Submit `work` to a worker thread; `on_complete` runs at the next
    /// `poll` with either the result or the captured failure.
    pub fn run<T, W, C>(&self, work: W, on_complete: C)
    where
        T: Send + 'static,
        W: FnOnce() -> ApiResult<T> + Send + 'static,
        C: FnOnce(ApiResult<T>) + Send + 'static,
    {
        self.handle().run(work, on_complete);
    }

    /// Drain queued continuations, running each on the calling thread.
    /// Returns the number of continuations executed.
    pub fn poll(&mut self) -> usize {
        let mut executed = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            completion();
            executed += 1;
        }
        executed
    }
}

/// Submits work into the dispatcher's runtime. Clones share the same
/// completion queue.
#[derive(Clone)]
pub struct TaskHandle {
    runtime: tokio::runtime::Handle,
    completion_tx: UnboundedSender<Completion>,
}

impl TaskHandle {
    /// See [`Dispatcher::run`].
    pub fn run<T, W, C>(&self, work: W, on_complete: C)
    where
        T: Send + 'static,
        W: FnOnce() -> ApiResult<T> + Send + 'static,
        C: FnOnce(ApiResult<T>) + Send + 'static,
    {
        let tx = self.completion_tx.clone();
        self.runtime.spawn(async move {
            let outcome = match tokio::task::spawn_blocking(work).await {
                Ok(result) => result,
                Err(join_error) => Err(ApiError::TaskFailed(join_error.to_string())),
            };
            // Send fails only when the dispatcher is gone (app shutdown).
            let _ = tx.send(Box::new(move || on_complete(outcome)));
        });
    }

    /// Like [`TaskHandle::run`], but the continuation is dropped unrun when
    /// `stamp` is no longer current (the requesting view navigated away or
    /// issued a newer request). Stale results are logged and discarded.
    pub fn run_guarded<T, W, C>(&self, stamp: GuardStamp, work: W, on_complete: C)
    where
        T: Send + 'static,
        W: FnOnce() -> ApiResult<T> + Send + 'static,
        C: FnOnce(ApiResult<T>) + Send + 'static,
    {
        self.run(work, move |outcome| {
            if stamp.is_current() {
                on_complete(outcome);
            } else {
                log::debug!("Dropping stale completion (request superseded)");
            }
        });
    }

    /// Fire-and-forget blocking work with no UI continuation.
    /// Used for best-effort prefetching.
    pub fn run_detached<W>(&self, work: W)
    where
        W: FnOnce() + Send + 'static,
    {
        self.runtime.spawn(async move {
            if let Err(e) = tokio::task::spawn_blocking(work).await {
                log::warn!("Detached task failed: {}", e);
            }
        });
    }
}

/// Cooperative cancellation for UI contexts.
///
/// A view keeps one guard; each request captures a stamp. Navigating away or
/// starting a newer request calls `invalidate`, and any continuation still
/// carrying an old stamp is silently dropped instead of being applied to a
/// now-irrelevant view.
#[derive(Clone, Default)]
pub struct RequestGuard {
    generation: Arc<AtomicU64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp the current generation.
    pub fn stamp(&self) -> GuardStamp {
        GuardStamp {
            generation: Arc::clone(&self.generation),
            value: self.generation.load(Ordering::SeqCst),
        }
    }

    /// Invalidate all outstanding stamps.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct GuardStamp {
    generation: Arc<AtomicU64>,
    value: u64,
}

impl GuardStamp {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.value
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
