//! Welcome screen and loader.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    super::render_centered(row, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);
    let dim = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    super::render_centered(row + 1, &empty.subtitle, &dim, cols);
}

/// Renders the loading indicator shown before the first page of a query.
pub fn render_loader(row: usize, theme: &Theme, cols: usize) {
    super::render_centered(row, "⟳ Loading movies…", &Theme::fg(&theme.colors.empty_state_fg), cols);
}
