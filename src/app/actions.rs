//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after each event. Actions bridge
//! pure state transitions and effectful Zellij calls: web requests, worker
//! messages, timers and pane visibility.
//!
//! # Example
//!
//! ```rust
//! use marquee::app::Action;
//! use marquee::PageKey;
//!
//! let actions = vec![Action::FetchPage(PageKey::new("alien", 1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::PageKey;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues the catalog web request for a `(query, page)` key.
    ///
    /// The runtime tags the request with the key so the response can be
    /// routed back through [`crate::app::Event::PageResponse`].
    FetchPage(PageKey),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Schedules a `Timer` event after the given number of seconds.
    ///
    /// Used to expire toasts.
    ScheduleTimeout(f64),
}
