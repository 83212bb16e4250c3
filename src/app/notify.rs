//! Transient notifications.
//!
//! Two pieces live here:
//!
//! - [`EmptyResultWatcher`], an edge-triggered observer that reports an empty
//!   result page once per data change, never on steady-state re-renders
//! - [`Notifications`], the queue of toasts shown in the corner of the pane,
//!   each expired by a host timer

use crate::domain::ResultPage;
use std::collections::VecDeque;

/// Message shown when a search succeeds with zero results.
pub const NO_RESULTS_MESSAGE: &str = "No movies found for your request.";

/// Message shown when a blank query is submitted.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter your search query.";

/// Seconds a toast stays on screen.
pub const TOAST_SECONDS: f64 = 3.0;

/// Maximum toasts kept at once; older ones are dropped first.
const MAX_TOASTS: usize = 3;

/// Severity of a toast, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

/// Edge-triggered observer over the shown data.
///
/// The fetch orchestrator bumps a version counter whenever the shown data
/// changes. The watcher remembers the last version it saw and fires only when
/// a new version holds an empty page.
#[derive(Debug, Clone, Default)]
pub struct EmptyResultWatcher {
    last_seen: Option<u64>,
}

impl EmptyResultWatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_seen: None }
    }

    /// Observes the data at `version`. Returns `true` when the data changed
    /// into an empty successful page.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::app::notify::EmptyResultWatcher;
    /// use marquee::ResultPage;
    ///
    /// let empty = ResultPage::new(vec![], 0);
    /// let mut watcher = EmptyResultWatcher::new();
    /// assert!(watcher.observe(1, Some(&empty)));
    /// assert!(!watcher.observe(1, Some(&empty)));
    /// ```
    pub fn observe(&mut self, version: u64, page: Option<&ResultPage>) -> bool {
        if self.last_seen == Some(version) {
            return false;
        }
        self.last_seen = Some(version);
        page.is_some_and(ResultPage::is_empty)
    }
}

/// Toast queue, oldest first.
///
/// Every push is paired with one timer of [`TOAST_SECONDS`], so timers fire in
/// push order. A toast dropped for space leaves its timer pending; that timer
/// is always among the earliest to fire and is swallowed instead of expiring a
/// newer toast.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    /// Pending timers whose toast was already dropped.
    orphaned_timers: usize,
}

impl Notifications {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            orphaned_timers: 0,
        }
    }

    /// Queues a toast. The caller schedules one timer per push.
    pub fn push(&mut self, message: impl Into<String>, level: ToastLevel) {
        let message = message.into();
        tracing::debug!(message = %message, level = ?level, "toast queued");
        self.toasts.push_back(Toast { message, level });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
            self.orphaned_timers += 1;
        }
    }

    /// Handles one toast timer. Returns whether a visible toast was removed.
    pub fn expire_oldest(&mut self) -> bool {
        if self.orphaned_timers > 0 {
            self.orphaned_timers -= 1;
            return false;
        }
        self.toasts.pop_front().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;

    #[test]
    fn test_watcher_fires_once_per_version() {
        let empty = ResultPage::new(vec![], 0);
        let mut watcher = EmptyResultWatcher::new();

        assert!(watcher.observe(3, Some(&empty)));
        for _ in 0..10 {
            assert!(!watcher.observe(3, Some(&empty)));
        }
        assert!(watcher.observe(4, Some(&empty)));
    }

    #[test]
    fn test_watcher_ignores_non_empty_and_missing_data() {
        let full = ResultPage::new(vec![Movie::new(1, "Alien")], 1);
        let mut watcher = EmptyResultWatcher::new();

        assert!(!watcher.observe(1, Some(&full)));
        assert!(!watcher.observe(2, None));
    }

    #[test]
    fn test_toast_queue_is_bounded() {
        let mut toasts = Notifications::new();
        for i in 0..5 {
            toasts.push(format!("toast {i}"), ToastLevel::Info);
        }
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts.iter().next().map(|t| t.message.as_str()), Some("toast 2"));
    }

    #[test]
    fn test_timers_of_dropped_toasts_do_not_expire_newer_ones() {
        let mut toasts = Notifications::new();
        for i in 0..5 {
            toasts.push(format!("toast {i}"), ToastLevel::Info);
        }

        // The first two timers belonged to "toast 0" and "toast 1".
        assert!(!toasts.expire_oldest());
        assert!(!toasts.expire_oldest());
        assert_eq!(toasts.len(), MAX_TOASTS);

        assert!(toasts.expire_oldest());
        assert_eq!(toasts.iter().next().map(|t| t.message.as_str()), Some("toast 3"));
        assert!(toasts.expire_oldest());
        assert!(toasts.expire_oldest());
        assert!(toasts.is_empty());
        assert!(!toasts.expire_oldest());
    }

    #[test]
    fn test_expire_on_empty_queue() {
        let mut toasts = Notifications::new();
        assert!(!toasts.expire_oldest());
        assert!(toasts.is_empty());
    }
}
