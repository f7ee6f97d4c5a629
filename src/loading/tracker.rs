//! Reference-counted busy tracker.
//!
//! [`LoadingTracker`] counts in-flight asynchronous operations. The busy flag is
//! derived (`count > 0`), the counter saturates at zero, and [`LoadingTracker::run`]
//! releases its increment through a drop guard, so the count is restored on every
//! exit path of the wrapped future: success, error, panic, or being dropped
//! before completion.

use crate::storage::feed::{Feed, SubscriptionId};
use std::cell::Cell;
use std::future::Future;

/// Snapshot of the tracker's counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingState {
    pub count: usize,
}

impl LoadingState {
    #[must_use]
    pub const fn is_busy(self) -> bool {
        self.count > 0
    }
}

/// Saturating counter guarding a derived busy flag.
///
/// # Examples
///
/// ```
/// use hero_roster::LoadingTracker;
///
/// let tracker = LoadingTracker::new();
/// tracker.start();
/// tracker.start();
/// tracker.stop();
/// assert!(tracker.is_busy());
///
/// tracker.stop();
/// tracker.stop();
/// assert_eq!(tracker.count(), 0);
/// assert!(!tracker.is_busy());
/// ```
#[derive(Debug, Default)]
pub struct LoadingTracker {
    count: Cell<usize>,
    changes: Feed<LoadingState>,
}

impl LoadingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one more operation as in flight.
    pub fn start(&self) {
        self.set_count(self.count.get().saturating_add(1));
    }

    /// Marks one operation as finished. Extra calls are ignored.
    pub fn stop(&self) {
        if self.count.get() == 0 {
            tracing::trace!("stop without matching start ignored");
            return;
        }
        self.set_count(self.count.get() - 1);
    }

    /// Forces the tracker back to idle regardless of outstanding operations.
    pub fn reset(&self) {
        if self.count.get() > 0 {
            tracing::debug!(outstanding = self.count.get(), "resetting loading tracker");
        }
        self.set_count(0);
    }

    /// Number of operations currently in flight.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.get()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    /// Snapshot of the counter, as delivered to subscribers.
    #[must_use]
    pub fn state(&self) -> LoadingState {
        LoadingState {
            count: self.count.get(),
        }
    }

    /// Increments now and returns a guard that decrements when dropped.
    #[must_use = "dropping the guard immediately ends the tracked operation"]
    pub fn guard(&self) -> LoadingGuard<'_> {
        self.start();
        LoadingGuard { tracker: self }
    }

    /// Runs `operation` while counted as in flight.
    ///
    /// The counter is incremented before `operation` is invoked, so any work it
    /// does eagerly, before its future is first polled, already sees the
    /// tracker busy. The increment is released on every exit path.
    ///
    /// # Parameters
    ///
    /// * `operation` - Builds the future to await; called once, after `start`
    ///
    /// # Returns
    ///
    /// Whatever the operation's future resolves to, errors included.
    ///
    /// # Examples
    ///
    /// ```
    /// use hero_roster::LoadingTracker;
    ///
    /// let tracker = LoadingTracker::new();
    /// let busy_inside = pollster::block_on(tracker.run(|| async { tracker.is_busy() }));
    /// assert!(busy_inside);
    /// assert!(!tracker.is_busy());
    /// ```
    pub async fn run<F, Fut>(&self, operation: F) -> Fut::Output
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        let _guard = self.guard();
        operation().await
    }

    /// Registers a listener notified whenever the counter changes.
    pub fn subscribe(&self, listener: impl Fn(&LoadingState) + 'static) -> SubscriptionId {
        self.changes.subscribe(listener)
    }

    /// Removes a listener registered with [`subscribe`](Self::subscribe).
    ///
    /// Returns `false` if `id` was not (or no longer) registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    fn set_count(&self, count: usize) {
        if self.count.replace(count) != count {
            self.changes.publish(&LoadingState { count });
        }
    }
}

/// Scoped in-flight marker returned by [`LoadingTracker::guard`].
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    tracker: &'a LoadingTracker,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.stop();
    }
}
