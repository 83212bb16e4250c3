//! Zellij plugin entry point.
//!
//! Thin shim between Zellij and the `marquee` library: it translates host
//! events into [`Event`]s, feeds them to [`handle_event`], and performs the
//! returned [`Action`]s with Zellij API calls.
//!
//! ```text
//! ┌──────────── plugin thread ────────────┐        ┌──── worker thread ────┐
//! │ Key ──────────────┐                   │        │                       │
//! │ WebRequestResult ─┼─► Event ─► AppState ─► PostToWorker ─► decode_page │
//! │ Timer ────────────┘      ▲            │        │          │            │
//! │                          └── WorkerResponse ◄─────────────┘            │
//! └───────────────────────────────────────┘        └───────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Everywhere: `Ctrl+n` / `Ctrl+p` move to the next / previous card.
//!
//! Search bar: type to edit, `Enter` searches, `Esc` leaves the bar (or hides
//! the plugin when nothing has been searched yet).
//!
//! Results grid:
//! - arrows or `h`/`j`/`k`/`l`: move between cards
//! - `Enter`: open the detail modal
//! - `]` / `[`: next / previous page, `g` / `G`: first / last page
//! - `1`-`9`: jump to that page
//! - `/` or `Tab`: back to the search bar
//! - `q` or `Esc`: hide the plugin
//!
//! Detail modal: `Esc`, `q` or `Enter` closes it.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use marquee::app::CursorMove;
use marquee::catalog::CatalogClient;
use marquee::worker::{MarqueeWorker, WorkerMessage, WorkerResponse};
use marquee::{handle_event, Action, Config, Event, InputMode, MarqueeError, PageKey};

register_plugin!(State);
register_worker!(MarqueeWorker, marquee_worker, MARQUEE_WORKER);

const WORKER_NAME: &str = "marquee";

struct State {
    app: marquee::AppState,
    /// `None` when no API token is configured; fetches then fail visibly.
    client: Option<CatalogClient>,
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: marquee::initialize(&Config::default()),
            client: None,
            worker_name: WORKER_NAME.to_string(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        marquee::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = marquee::initialize(&config);
        self.client = match CatalogClient::new(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "catalog client unavailable");
                None
            }
        };

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!(has_client = self.client.is_some(), "plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = event_name).entered();

        let ours = match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_result(status, body, &context)
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                self.map_custom_message_event(&message, &payload)
            }
            zellij_tile::prelude::Event::Timer(_) => Some(Event::Timer),
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Some(Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            }),
            _ => None,
        };

        ours.is_some_and(|event| self.dispatch(&event))
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(cols);
        marquee::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one event through the library and executes its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    const fn event_name(event: &zellij_tile::prelude::Event) -> &'static str {
        match event {
            zellij_tile::prelude::Event::Key(_) => "Key",
            zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult",
            zellij_tile::prelude::Event::CustomMessage(..) => "CustomMessage",
            zellij_tile::prelude::Event::Timer(_) => "Timer",
            zellij_tile::prelude::Event::PermissionRequestResult(_) => "PermissionRequestResult",
            _ => "Other",
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::MoveCursor(CursorMove::Next)),
                BareKey::Char('p') => Some(Event::MoveCursor(CursorMove::Previous)),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Char(c) => Some(Event::Char(c)),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Enter => Some(Event::Submit),
                BareKey::Esc => Some(Event::LeaveSearch),
                _ => None,
            },
            InputMode::Browsing => Some(match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::MoveCursor(CursorMove::Left),
                BareKey::Right | BareKey::Char('l') => Event::MoveCursor(CursorMove::Right),
                BareKey::Up | BareKey::Char('k') => Event::MoveCursor(CursorMove::Up),
                BareKey::Down | BareKey::Char('j') => Event::MoveCursor(CursorMove::Down),
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char(']') => Event::NextPage,
                BareKey::Char('[') => Event::PrevPage,
                BareKey::Char('g') => Event::FirstPage,
                BareKey::Char('G') => Event::LastPage,
                BareKey::Char(d @ '1'..='9') => Event::ChangePage {
                    index: d.to_digit(10).map_or(0, |n| n - 1),
                },
                BareKey::Char('/') | BareKey::Tab => Event::FocusSearch,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                _ => return None,
            }),
            InputMode::Detail => match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetail),
                _ => None,
            },
        }
    }

    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(key) = PageKey::from_context(context) else {
            tracing::debug!(status, "ignoring web result without a page key");
            return None;
        };
        tracing::debug!(%key, status, body_len = body.len(), "catalog response");
        Some(Event::PageResponse { key, status, body })
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                // The loading request would otherwise wait forever.
                Some(Event::WorkerResponse(WorkerResponse::Error {
                    key: None,
                    message: MarqueeError::Worker(format!("unreadable worker response: {e}")).to_string(),
                }))
            }
        }
    }

    fn post_worker_message(&self, message: &WorkerMessage) -> marquee::Result<()> {
        let payload = serde_json::to_string(message)
            .map_err(|e| MarqueeError::Worker(format!("failed to serialize worker message: {e}")))?;
        post_message_to(PluginMessage {
            worker_name: Some(self.worker_name.clone()),
            name: self.worker_name.clone(),
            payload,
        });
        Ok(())
    }

    fn fetch_page(&mut self, key: &PageKey) {
        let Some(client) = &self.client else {
            let failure = Event::FetchFailed {
                key: key.clone(),
                message: "no api_token configured".to_string(),
            };
            self.dispatch(&failure);
            return;
        };

        let request = client.request_for(key);
        web_request(request.url, HttpVerb::Get, request.headers, vec![], request.context);
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::FetchPage(key) => self.fetch_page(key),
            Action::PostToWorker(message) => {
                if let Err(e) = self.post_worker_message(message) {
                    tracing::warn!(error = %e, "worker unreachable");
                    let failure = Event::FetchFailed {
                        key: message.key().clone(),
                        message: e.to_string(),
                    };
                    self.dispatch(&failure);
                }
            }
            Action::ScheduleTimeout(seconds) => set_timeout(*seconds),
        }
    }
}
