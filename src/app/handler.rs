//! Event handling and state transitions.
//!
//! [`handle_event`] is the single entry point that mutates [`AppState`]. It
//! returns whether the pane must re-render plus the side effects to run.
//!
//! # Event Types
//!
//! - **Search bar**: `Char`, `Backspace`, `Submit`, `FocusSearch`, `LeaveSearch`
//! - **Grid**: `MoveCursor`, `OpenSelected`, `CloseDetail`
//! - **Pager**: `NextPage`, `PrevPage`, `FirstPage`, `LastPage`, `ChangePage`
//! - **Runtime**: `PageResponse`, `FetchFailed`, `WorkerResponse`, `Timer`,
//!   `PermissionsResult`
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{handle_event, Action, AppState, Event};
//! use marquee::ui::Theme;
//! use marquee::{Config, PageKey};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! for c in "alien".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert_eq!(actions, vec![Action::FetchPage(PageKey::new("alien", 1))]);
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

use super::fetch::{CompletionOutcome, RequestOutcome};
use super::modes::InputMode;
use super::notify::{ToastLevel, EMPTY_QUERY_MESSAGE, TOAST_SECONDS};
use super::search::SubmitOutcome;
use super::state::CursorMove;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{PageKey, ResultPage};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Shown when the user refuses web access.
const WEB_ACCESS_DENIED_MESSAGE: &str = "Web access was denied; searches can't reach the catalog.";

/// Failure recorded for fetches attempted without web access.
const WEB_ACCESS_DENIED_ERROR: &str = "web access was denied";

/// Events from user input, the host runtime and the worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Appends a character to the search bar draft.
    Char(char),
    /// Removes the last character of the draft.
    Backspace,
    /// Submits the draft as the new query.
    Submit,
    /// Gives the search bar focus.
    FocusSearch,
    /// Leaves the search bar.
    LeaveSearch,

    MoveCursor(CursorMove),
    /// Opens the detail modal for the card under the cursor.
    OpenSelected,
    CloseDetail,

    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Selects a zero-indexed page from the pager.
    ChangePage {
        index: u32,
    },

    /// Hides the plugin pane.
    CloseFocus,

    /// A toast timer fired.
    Timer,

    /// A catalog web request finished.
    PageResponse {
        key: PageKey,
        status: u16,
        body: Vec<u8>,
    },

    /// A catalog request could not be issued at all.
    FetchFailed {
        key: PageKey,
        message: String,
    },

    WorkerResponse(WorkerResponse),

    PermissionsResult {
        granted: bool,
    },
}

impl Event {
    /// Short name for spans; `PageResponse` bodies are too large for `Debug`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::Submit => "Submit",
            Self::FocusSearch => "FocusSearch",
            Self::LeaveSearch => "LeaveSearch",
            Self::MoveCursor(_) => "MoveCursor",
            Self::OpenSelected => "OpenSelected",
            Self::CloseDetail => "CloseDetail",
            Self::NextPage => "NextPage",
            Self::PrevPage => "PrevPage",
            Self::FirstPage => "FirstPage",
            Self::LastPage => "LastPage",
            Self::ChangePage { .. } => "ChangePage",
            Self::CloseFocus => "CloseFocus",
            Self::Timer => "Timer",
            Self::PageResponse { .. } => "PageResponse",
            Self::FetchFailed { .. } => "FetchFailed",
            Self::WorkerResponse(_) => "WorkerResponse",
            Self::PermissionsResult { .. } => "PermissionsResult",
        }
    }
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime's error path uniform
/// with the rest of the crate.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.draft.push(*c);
            tracing::trace!(draft = %state.draft, "draft updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            Ok((state.draft.pop().is_some(), vec![]))
        }
        Event::Submit => {
            let mut actions = vec![];
            match state.search.submit(&state.draft) {
                SubmitOutcome::Rejected => {
                    tracing::debug!("blank query rejected");
                    toast(state, &mut actions, EMPTY_QUERY_MESSAGE, ToastLevel::Warning);
                    return Ok((true, actions));
                }
                SubmitOutcome::Unchanged | SubmitOutcome::Updated => {
                    tracing::debug!(query = %state.search.query(), "query submitted");
                    state.draft = state.search.query().to_string();
                    match state.fetch.reissue() {
                        Some(key) if state.search.key().as_ref() == Some(&key) => {
                            tracing::debug!(key = %key, "reissuing unanswered request");
                            issue(state, &mut actions, key);
                            settle(state, &mut actions);
                        }
                        _ => request_current(state, &mut actions),
                    }
                }
            }
            state.input_mode = InputMode::Browsing;
            Ok((true, actions))
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::LeaveSearch => {
            if state.search.key().is_none() {
                return Ok((false, vec![Action::CloseFocus]));
            }
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::MoveCursor(movement) => Ok((state.move_cursor(*movement), vec![])),
        Event::OpenSelected => {
            let Some(movie) = state.selected_movie().cloned() else {
                tracing::debug!("no card under cursor");
                return Ok((false, vec![]));
            };
            state.selection.select(movie);
            state.input_mode = InputMode::Detail;
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            let closed = state.selection.close();
            state.input_mode = InputMode::Browsing;
            Ok((closed, vec![]))
        }
        Event::NextPage => {
            let index = state.search.pager_index().saturating_add(1);
            Ok(go_to_page(state, index))
        }
        Event::PrevPage => {
            let Some(index) = state.search.pager_index().checked_sub(1) else {
                return Ok((false, vec![]));
            };
            Ok(go_to_page(state, index))
        }
        Event::FirstPage => Ok(go_to_page(state, 0)),
        Event::LastPage => {
            let Some(count) = state.page_count().filter(|&count| count > 0) else {
                return Ok((false, vec![]));
            };
            Ok(go_to_page(state, count - 1))
        }
        Event::ChangePage { index } => Ok(go_to_page(state, *index)),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Timer => Ok((state.notifications.expire_oldest(), vec![])),
        Event::PageResponse { key, status, body } => match String::from_utf8(body.clone()) {
            Ok(body) => {
                tracing::debug!(key = %key, status, body_len = body.len(), "page response received");
                Ok((false, vec![Action::PostToWorker(WorkerMessage::decode_page(key.clone(), *status, body))]))
            }
            Err(_) => Ok(complete(state, key.clone(), Err("response body is not valid UTF-8".to_string()))),
        },
        Event::FetchFailed { key, message } => Ok(complete(state, key.clone(), Err(message.clone()))),
        Event::WorkerResponse(response) => match response {
            WorkerResponse::PageDecoded { key, page } => Ok(complete(state, key.clone(), Ok(page.clone()))),
            WorkerResponse::PageFailed { key, message } => Ok(complete(state, key.clone(), Err(message.clone()))),
            WorkerResponse::Error { key, message } => {
                tracing::error!(key = ?key, error = %message, "worker error");
                let key = key.clone().or_else(|| state.fetch.reissue());
                match key {
                    Some(key) => Ok(complete(state, key, Err(message.clone()))),
                    None => Ok((false, vec![])),
                }
            }
        },
        Event::PermissionsResult { granted } => {
            state.web_access_denied = !granted;
            if *granted {
                return Ok((false, vec![]));
            }
            tracing::warn!("web access denied");
            let mut actions = vec![];
            toast(state, &mut actions, WEB_ACCESS_DENIED_MESSAGE, ToastLevel::Warning);
            Ok((true, actions))
        }
    }
}

/// Queues a toast together with the timer that expires it.
fn toast(state: &mut AppState, actions: &mut Vec<Action>, message: &str, level: ToastLevel) {
    state.notifications.push(message, level);
    actions.push(Action::ScheduleTimeout(TOAST_SECONDS));
}

/// Points the fetch orchestrator at the current search key.
fn request_current(state: &mut AppState, actions: &mut Vec<Action>) {
    if let RequestOutcome::Fetch(key) = state.fetch.request(state.search.key()) {
        issue(state, actions, key);
    }
    settle(state, actions);
}

/// Sends the request for `key`, or fails it on the spot without web access.
fn issue(state: &mut AppState, actions: &mut Vec<Action>, key: PageKey) {
    if state.web_access_denied {
        tracing::debug!(key = %key, "web access denied, failing fetch");
        state.fetch.complete(key, Err(WEB_ACCESS_DENIED_ERROR.to_string()));
    } else {
        actions.push(Action::FetchPage(key));
    }
}

/// Follows up on data changes: cursor reset and the no-results toast.
fn settle(state: &mut AppState, actions: &mut Vec<Action>) {
    if state.on_data_changed() {
        actions.push(Action::ScheduleTimeout(TOAST_SECONDS));
    }
}

fn go_to_page(state: &mut AppState, index: u32) -> (bool, Vec<Action>) {
    let Some(count) = state.page_count() else {
        tracing::debug!(index, "no page count known yet");
        return (false, vec![]);
    };
    if index >= count {
        tracing::debug!(index, count, "page out of range");
        return (false, vec![]);
    }
    if !state.search.change_page(index) {
        return (false, vec![]);
    }

    tracing::debug!(page = state.search.page(), "page changed");
    let mut actions = vec![];
    request_current(state, &mut actions);
    (true, actions)
}

fn complete(
    state: &mut AppState,
    key: PageKey,
    result: std::result::Result<ResultPage, String>,
) -> (bool, Vec<Action>) {
    match state.fetch.complete(key, result) {
        CompletionOutcome::Stale => (false, vec![]),
        CompletionOutcome::Applied | CompletionOutcome::Failed => {
            let mut actions = vec![];
            settle(state, &mut actions);
            (true, actions)
        }
    }
}
