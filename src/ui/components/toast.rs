//! Toast notifications in the top-right corner.

use crate::app::notify::ToastLevel;
use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

pub fn render_toasts(toasts: &[ToastInfo], theme: &Theme, cols: usize) {
    for (offset, toast) in toasts.iter().enumerate() {
        let color = match toast.level {
            ToastLevel::Info => &theme.colors.toast_info_fg,
            ToastLevel::Warning => &theme.colors.toast_warning_fg,
        };
        let text = format!(" {} ", truncate(&toast.message, cols.saturating_sub(2)));
        let col = cols.saturating_sub(display_width(&text)) + 1;

        position_cursor(offset + 1, col);
        print!("{}{}{text}{}", Theme::bold(), Theme::fg(color), Theme::reset());
    }
}
