//! Header bar: plugin title, search status and loading marker.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

const LOADING_MARKER: &str = " ⟳ loading ";

/// Renders the header at `row` and returns the next row.
///
/// ```text
///  Marquee  "alien" · page 1 of 3 · 41 results              ⟳ loading
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let marker_width = if header.is_loading { display_width(LOADING_MARKER) } else { 0 };
    let title = truncate(&header.title, cols);
    let title_width = display_width(&title);

    let status_room = cols.saturating_sub(title_width + marker_width + 1);
    let status = header
        .status
        .as_deref()
        .map(|status| format!(" {}", truncate(status, status_room)))
        .unwrap_or_default();
    let status_width = display_width(&status);

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{}{title}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
    print!("{}{status}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(cols.saturating_sub(title_width + status_width + marker_width)));

    if header.is_loading && marker_width <= cols {
        print!("{}{LOADING_MARKER}", Theme::fg(&theme.colors.empty_state_fg));
    }
    print!("{}", Theme::reset());
    row + 1
}
