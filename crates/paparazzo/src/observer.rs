//! Progress notifications emitted by [`AStar::search`](crate::AStar::search).
//!
//! Observers see every open-set insertion, every closed-set insertion and
//! every g-cost change. They cannot influence the search.

use std::fmt::Debug;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receiver for search progress notifications. All methods default to no-ops.
pub trait SearchObserver<T> {
    fn added_to_open_set(&self, _node: &T) {}

    fn added_to_closed_set(&self, _node: &T) {}

    fn updated_g_cost(&self, _node: &T, _cost: f64) {}
}

impl<T, O: SearchObserver<T> + ?Sized> SearchObserver<T> for &O {
    #[inline]
    fn added_to_open_set(&self, node: &T) {
        (**self).added_to_open_set(node)
    }

    #[inline]
    fn added_to_closed_set(&self, node: &T) {
        (**self).added_to_closed_set(node)
    }

    #[inline]
    fn updated_g_cost(&self, node: &T, cost: f64) {
        (**self).updated_g_cost(node, cost)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<T> SearchObserver<T> for NoopObserver {}

// ---------------------------------------------------------------------------
// SearchStats
// ---------------------------------------------------------------------------

/// Counts notifications. Safe to share between concurrent searches.
#[derive(Debug, Default)]
pub struct SearchStats {
    opened: AtomicUsize,
    closed: AtomicUsize,
    updated: AtomicUsize,
}

impl SearchStats {
    /// Create a counter set at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open-set insertions.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }

    /// Number of expanded (closed) nodes.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::Relaxed)
    }

    /// Number of g-cost assignments, first discoveries included.
    pub fn updated(&self) -> usize {
        self.updated.load(Ordering::Relaxed)
    }

    /// Set every counter back to zero.
    pub fn reset(&self) {
        self.opened.store(0, Ordering::Relaxed);
        self.closed.store(0, Ordering::Relaxed);
        self.updated.store(0, Ordering::Relaxed);
    }
}

impl<T> SearchObserver<T> for SearchStats {
    fn added_to_open_set(&self, _node: &T) {
        self.opened.fetch_add(1, Ordering::Relaxed);
    }

    fn added_to_closed_set(&self, _node: &T) {
        self.closed.fetch_add(1, Ordering::Relaxed);
    }

    fn updated_g_cost(&self, _node: &T, _cost: f64) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// RecordingObserver
// ---------------------------------------------------------------------------

/// A single observer notification.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent<T> {
    Opened(T),
    Closed(T),
    GCost(T, f64),
}

/// Records every notification in arrival order.
#[derive(Debug)]
pub struct RecordingObserver<T> {
    events: Mutex<Vec<SearchEvent<T>>>,
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordingObserver<T> {
    /// Create an observer with an empty event log.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, event: SearchEvent<T>) {
        // A poisoned lock only means another recorder panicked mid-push.
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push(event);
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<SearchEvent<T>>
    where
        T: Clone,
    {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Drain the recorded events.
    pub fn take_events(&self) -> Vec<SearchEvent<T>> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl<T: Clone> SearchObserver<T> for RecordingObserver<T> {
    fn added_to_open_set(&self, node: &T) {
        self.record(SearchEvent::Opened(node.clone()));
    }

    fn added_to_closed_set(&self, node: &T) {
        self.record(SearchEvent::Closed(node.clone()));
    }

    fn updated_g_cost(&self, node: &T, cost: f64) {
        self.record(SearchEvent::GCost(node.clone(), cost));
    }
}

// ---------------------------------------------------------------------------
// LoggingObserver
// ---------------------------------------------------------------------------

/// Forwards notifications to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl<T: Debug> SearchObserver<T> for LoggingObserver {
    fn added_to_open_set(&self, node: &T) {
        log::trace!("open: {node:?}");
    }

    fn added_to_closed_set(&self, node: &T) {
        log::trace!("closed: {node:?}");
    }

    fn updated_g_cost(&self, node: &T, cost: f64) {
        log::trace!("g({node:?}) = {cost}");
    }
}
