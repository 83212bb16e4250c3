//! Search bar component renderer.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

const PROMPT: &str = " Search movies: ";

/// Renders the three-line search box at `row` and returns the next row.
///
/// ```text
/// ┌──────────────────────────────┐
/// │ Search movies: alien▏        │
/// └──────────────────────────────┘
/// ```
///
/// A focused box uses the accent border and shows a caret. Drafts wider than
/// the box are scrolled so the end stays visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    let caret = if search.is_focused { "▏" } else { "" };
    let room = inner_width.saturating_sub(display_width(PROMPT) + display_width(caret));
    let draft = scroll_to_end(&search.draft, room);
    let used = display_width(PROMPT) + display_width(&draft) + display_width(caret);

    position_cursor(row + 1, 1);
    print!("{margin}{}│", Theme::fg(border));
    print!("{}{PROMPT}", Theme::fg(&theme.colors.text_dim));
    print!("{}{draft}{caret}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}

/// Drops leading characters until `text` fits in `width` columns.
fn scroll_to_end(text: &str, width: usize) -> String {
    let mut start = 0;
    while display_width(&text[start..]) > width {
        match text[start..].chars().next() {
            Some(c) => start += c.len_utf8(),
            None => break,
        }
    }
    text[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_keeps_the_tail() {
        assert_eq!(scroll_to_end("the silence of the lambs", 9), "the lambs");
        assert_eq!(scroll_to_end("heat", 9), "heat");
        assert_eq!(scroll_to_end("heat", 0), "");
    }
}
