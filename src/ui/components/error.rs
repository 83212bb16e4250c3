//! Error banner.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::ErrorInfo;

/// Renders the failure message centered at `row`, with the cause dimmed below.
pub fn render_error(row: usize, error: &ErrorInfo, theme: &Theme, cols: usize) {
    let style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg));
    super::render_centered(row, &error.message, &style, cols);

    if let Some(detail) = &error.detail {
        let dim = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        super::render_centered(row + 1, detail, &dim, cols);
    }
}
