//! Synchronous publish/subscribe primitive.
//!
//! A [`Feed`] holds a list of listener callbacks and delivers every published
//! value to all of them, in subscription order, before `publish` returns. It is
//! the explicit replacement for observable streams: owners keep their current
//! value themselves and call [`Feed::publish`] after each change.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Feed::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// Single-threaded listener registry.
///
/// Listeners may subscribe or unsubscribe from within a callback; such changes
/// take effect from the next publication.
///
/// # Examples
///
/// ```
/// use hero_roster::storage::Feed;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let feed = Feed::<u32>::new();
/// let seen = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&seen);
/// let id = feed.subscribe(move |value| sink.set(*value));
///
/// feed.publish(&7);
/// assert_eq!(seen.get(), 7);
///
/// assert!(feed.unsubscribe(id));
/// feed.publish(&9);
/// assert_eq!(seen.get(), 7);
/// ```
pub struct Feed<T> {
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Feed<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Registers a listener and returns its subscription handle.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Delivers `value` to every listener registered at call time.
    pub fn publish(&self, value: &T) {
        // Snapshot the list so callbacks can (un)subscribe without a borrow conflict.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(value);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Feed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feed")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_subscription_order() {
        let feed = Feed::<&'static str>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            feed.subscribe(move |value| log.borrow_mut().push(format!("{tag}:{value}")));
        }

        feed.publish(&"a");
        feed.publish(&"b");

        assert_eq!(
            *log.borrow(),
            vec!["first:a", "second:a", "first:b", "second:b"]
        );
    }

    #[test]
    fn unknown_subscription_is_reported() {
        let feed = Feed::<()>::new();
        let id = feed.subscribe(|()| {});
        assert!(feed.unsubscribe(id));
        assert!(!feed.unsubscribe(id));
        assert_eq!(feed.listener_count(), 0);
    }

    #[test]
    fn listener_may_subscribe_during_publish() {
        let feed = Rc::new(Feed::<u8>::new());
        let inner = Rc::clone(&feed);
        feed.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        feed.publish(&1);
        assert_eq!(feed.listener_count(), 2);
    }
}
