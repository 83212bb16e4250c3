//! Input focus state.
//!
//! The view has three focus targets and the active one decides how keys are
//! interpreted:
//!
//! - **Typing**: the search bar receives characters
//! - **Browsing**: arrow keys move over the results grid, `[`/`]` page
//! - **Detail**: the modal is open; only closing keys apply
//!
//! # Example
//!
//! ```rust
//! use marquee::app::InputMode;
//!
//! let mode = InputMode::default();
//! assert_eq!(mode, InputMode::Typing);
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// The search bar has focus. This is the initial mode: there is nothing
    /// to browse before the first search.
    #[default]
    Typing,

    /// The results grid has focus.
    Browsing,

    /// The detail modal is open over the grid.
    Detail,
}

impl InputMode {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Typing)
    }
}
