//! Debounce-and-dedupe pipeline for raw input values.
//!
//! Each pushed value replaces the pending one and restarts the delay. When the
//! delay elapses without a newer push, the pending value becomes the effective
//! value, but only if it differs from the previous effective value. A pending
//! value whose delay already elapsed is settled by the next `push` before being
//! replaced, even if nobody polled in between.
//!
//! ```text
//! push("s")@0  push("sp")@100  push("spi")@200  poll@499 → None  poll@500 → Some("spi")
//! push("a")@0  push("ab")@500 → Some("a")       poll@800 → Some("ab")
//! ```

use std::time::Duration;

/// Delay the search field must stay unchanged before its value takes effect.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Duration,
}

/// Clock-agnostic debouncer; callers pass the current time in.
///
/// # Examples
///
/// ```
/// use hero_roster::app::Debouncer;
/// use std::time::Duration;
///
/// let ms = Duration::from_millis;
/// let mut debouncer = Debouncer::new(ms(300), String::new());
///
/// debouncer.push("s".to_string(), ms(0));
/// debouncer.push("sp".to_string(), ms(100));
/// assert_eq!(debouncer.poll(ms(399)), None);
/// assert_eq!(debouncer.poll(ms(400)), Some("sp".to_string()));
/// assert_eq!(debouncer.current(), "sp");
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
    current: T,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Creates a debouncer whose effective value starts as `initial`.
    pub fn new(delay: Duration, initial: T) -> Self {
        Self {
            delay,
            pending: None,
            current: initial,
        }
    }

    /// Records a new candidate value observed at `now`, restarting the delay.
    ///
    /// # Returns
    ///
    /// The previously pending value if its delay had elapsed by `now` and it
    /// differs from the effective value; it becomes effective before `value`
    /// replaces it.
    pub fn push(&mut self, value: T, now: Duration) -> Option<T> {
        let settled = self.poll(now);
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
        settled
    }

    /// Settles the pending value if its delay has elapsed by `now`.
    ///
    /// Returns the new effective value when it changed, `None` otherwise.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {}
            _ => return None,
        }

        let pending = self.pending.take()?;
        if pending.value == self.current {
            return None;
        }

        self.current = pending.value;
        Some(self.current.clone())
    }

    /// Latest effective value.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Most recent raw value, pending or already effective.
    pub fn latest(&self) -> &T {
        self.pending
            .as_ref()
            .map_or(&self.current, |pending| &pending.value)
    }

    /// Time at which the pending value will settle, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// `true` while a pushed value is waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Quiet period a value must survive before taking effect.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
