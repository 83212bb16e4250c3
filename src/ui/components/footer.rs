//! Footer help bar.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered on `row`.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) {
    super::render_centered(row, &footer.keybindings, &Theme::fg(&theme.colors.text_dim), cols);
}
