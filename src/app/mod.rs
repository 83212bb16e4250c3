//! Application layer: state, controllers, events and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, catalog and
//! worker layers. Data flows one way:
//!
//! ```text
//! Key / host event → Event → handle_event → state mutation → Actions → side effects
//!                                 ↑                                        ↓
//!                                 └──── web responses / worker replies ────┘
//! ```
//!
//! # Modules
//!
//! - [`search`]: submitted query and current page
//! - [`fetch`]: `(query, page)`-keyed fetch orchestration with the page cache
//! - [`selection`]: movie shown in the detail modal
//! - [`notify`]: empty-result watcher and toast queue
//! - [`modes`]: input focus
//! - [`state`]: [`AppState`] and view model computation
//! - [`handler`]: event processing
//! - [`actions`]: side effects for the runtime

pub mod actions;
pub mod fetch;
pub mod handler;
pub mod modes;
pub mod notify;
pub mod search;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, CursorMove};
