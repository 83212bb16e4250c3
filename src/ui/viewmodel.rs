//! Renderable snapshots of application state.
//!
//! View models are produced by `AppState::compute_viewmodel` and consumed by
//! the renderer. They hold display-ready strings and flags only: every
//! decision about what to show is made while building them, so the
//! components stay dumb and the decisions stay testable.

use crate::app::notify::ToastLevel;
use crate::ui::pager::PagerItem;

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub body: Body,
    /// Detail modal, drawn over the body.
    pub modal: Option<ModalInfo>,
    /// Oldest first.
    pub toasts: Vec<ToastInfo>,
    pub footer: FooterInfo,
}

/// The main area below the search bar. Exactly one is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Nothing searched yet.
    Welcome(EmptyState),
    /// First load for a query with nothing to show meanwhile.
    Loader,
    /// The current request failed.
    Error(ErrorInfo),
    /// A grid of movie cards, possibly stale while the next page loads.
    Results(ResultsView),
    /// The search succeeded with no matches. The toast says so.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    /// Underlying cause, shown dimmed.
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    /// Cards in the visible grid rows, row-major.
    pub cards: Vec<Card>,
    pub columns: usize,
    /// Present only when there is more than one page.
    pub pager: Option<PagerInfo>,
}

/// One movie in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Already truncated to the card width.
    pub title: String,
    /// Year and rating, e.g. `1979 · 8.2/10`.
    pub meta: String,
    pub is_selected: bool,
    /// Character ranges of `title` matching the query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub items: Vec<PagerItem>,
    /// Zero-indexed active page.
    pub active: u32,
    pub page_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Query, page position and result count once a search has run.
    pub status: Option<String>,
    /// A request for the current key is in flight.
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text being edited.
    pub draft: String,
    pub is_focused: bool,
}

/// Detail view for the selected movie, pre-wrapped to the modal width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub title: String,
    pub lines: Vec<String>,
    /// Outer width in columns, borders included.
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
