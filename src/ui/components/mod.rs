//! Composable UI component renderers.
//!
//! Each component draws one part of the frame at an explicit row and returns
//! the next free row where that makes sense.
//!
//! # Layout
//!
//! ```text
//! row 1          header (toasts overlay the top-right corner)
//! row 2          border
//! rows 3-5       search bar
//! row 6          spacer
//! rows 7..       body: welcome, loader, error banner or card grid
//! rows - 2       pager
//! rows - 1       border
//! rows           footer
//! ```
//!
//! The detail modal is drawn last, centered over everything but the toasts.

pub mod grid;

mod empty;
mod error;
mod footer;
mod header;
mod modal;
mod pager;
mod search;
mod toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

/// First body row below header, border, search bar and spacer.
const BODY_TOP_ROW: usize = 7;

/// Offset of centered messages from the top of the body.
const MESSAGE_OFFSET: usize = 2;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Prints `text` centered on `row`, padded across the full width.
fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = crate::ui::helpers::truncate(text, cols);
    let width = crate::ui::helpers::display_width(&text);
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
    print!("{}", Theme::reset());
}

/// Draws a full frame.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut row = 1;
    row = header::render_header(row, &vm.header, theme, cols);
    row = render_border(row, &theme.colors.border, cols);
    let _ = search::render_search_bar(row, &vm.search_bar, theme, cols);

    let pager_row = rows.saturating_sub(2);
    let border_row = rows.saturating_sub(1);

    match &vm.body {
        Body::Welcome(empty) => empty::render_empty_state(BODY_TOP_ROW + MESSAGE_OFFSET, empty, theme, cols),
        Body::Loader => empty::render_loader(BODY_TOP_ROW + MESSAGE_OFFSET, theme, cols),
        Body::Error(error) => error::render_error(BODY_TOP_ROW + MESSAGE_OFFSET, error, theme, cols),
        Body::Results(view) => {
            grid::render_grid(BODY_TOP_ROW, view, theme);
            if let Some(pager) = &view.pager {
                if pager_row > BODY_TOP_ROW {
                    pager::render_pager(pager_row, pager, theme, cols);
                }
            }
        }
        Body::Blank => {}
    }

    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(rows, &vm.footer, theme, cols);

    if let Some(info) = &vm.modal {
        modal::render_modal(info, theme, rows, cols);
    }

    toast::render_toasts(&vm.toasts, theme, cols);
}
