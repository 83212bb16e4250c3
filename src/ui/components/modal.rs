//! Detail modal for the selected movie.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

/// Draws the modal box centered in the pane.
///
/// Lines that don't fit vertically are dropped from the bottom.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = modal.width.min(cols);
    let inner = width.saturating_sub(4);
    if inner == 0 {
        return;
    }

    let max_lines = rows.saturating_sub(4);
    let lines = &modal.lines[..modal.lines.len().min(max_lines)];
    let height = lines.len() + 2;

    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    let border = Theme::fg(&theme.colors.modal_border);

    let title = fit(&format!(" {} ", modal.title), width.saturating_sub(4));
    position_cursor(top, left);
    print!("{border}┌─{}{title}{}{border}─┐{}", Theme::bold(), Theme::reset(), Theme::reset());

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│ {}{}{border} │{}", Theme::fg(&theme.colors.text_normal), fit(line, inner), Theme::reset());
    }

    position_cursor(top + height - 1, left);
    print!("{border}└{}┘{}", "─".repeat(width.saturating_sub(2)), Theme::reset());
}
