//! Pager row.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::pager::PagerItem;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PagerInfo;

/// Renders `‹ 1 2 3 … 20 ›` centered on `row`, the active page inverted.
pub fn render_pager(row: usize, pager: &PagerInfo, theme: &Theme, cols: usize) {
    let labels: Vec<(String, bool)> = pager
        .items
        .iter()
        .map(|item| match item {
            PagerItem::Page(index) => (format!(" {} ", index + 1), *index == pager.active),
            PagerItem::Break => (" … ".to_string(), false),
        })
        .collect();

    let has_prev = pager.active > 0;
    let has_next = pager.active + 1 < pager.page_count;

    let width: usize = labels.iter().map(|(label, _)| display_width(label)).sum::<usize>() + 4;
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));

    let arrow = |enabled: bool| {
        if enabled {
            Theme::fg(&theme.colors.text_normal)
        } else {
            Theme::fg(&theme.colors.border)
        }
    };

    print!("{}‹ ", arrow(has_prev));
    for (label, active) in &labels {
        if *active {
            print!(
                "{}{}{}{label}{}",
                Theme::bold(),
                Theme::fg(&theme.colors.pager_active_fg),
                Theme::bg(&theme.colors.pager_active_bg),
                Theme::reset()
            );
        } else {
            print!("{}{label}", Theme::fg(&theme.colors.text_dim));
        }
    }
    print!("{} ›{}", arrow(has_next), Theme::reset());
}
