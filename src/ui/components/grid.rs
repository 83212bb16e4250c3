//! Movie card grid.
//!
//! Cards are laid out row-major, `columns` per row. Each card is two lines
//! (title, then year and rating) followed by a spacer line.

use crate::ui::helpers::{self, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Card, ResultsView};

/// Columns between the start of one card and the next.
pub const CARD_WIDTH: usize = 26;

/// Text columns inside a card, excluding its one-column side padding.
pub const CARD_INNER_WIDTH: usize = 22;

/// Lines per card row, spacer included.
pub const CARD_HEIGHT: usize = 3;

/// First column of the grid.
const GRID_LEFT: usize = 2;

/// Renders the grid starting at `row`.
pub fn render_grid(row: usize, view: &ResultsView, theme: &Theme) {
    let columns = view.columns.max(1);
    for (index, card) in view.cards.iter().enumerate() {
        let card_row = row + (index / columns) * CARD_HEIGHT;
        let card_col = GRID_LEFT + (index % columns) * CARD_WIDTH;
        render_card(card_row, card_col, card, theme);
    }
}

fn render_card(row: usize, col: usize, card: &Card, theme: &Theme) {
    let base = if card.is_selected {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(row, col);
    print!("{base}{} ", Theme::bold());
    helpers::render_highlighted_text(&card.title, &card.highlight_ranges, theme, card.is_selected);
    print!("{base}{}", " ".repeat(CARD_INNER_WIDTH.saturating_sub(display_width(&card.title)) + 1));
    print!("{}", Theme::reset());

    position_cursor(row + 1, col);
    if card.is_selected {
        print!("{base}");
    } else {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    print!(" {}", helpers::fit(&card.meta, CARD_INNER_WIDTH));
    print!(" {}", Theme::reset());
}
