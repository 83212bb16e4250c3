//! Color schemes and ANSI escape sequences.
//!
//! Four Catppuccin flavors are compiled in; custom themes load from TOML files
//! with the same shape.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha` (default)
//! - `catppuccin-latte`
//! - `catppuccin-frappe`
//! - `catppuccin-macchiato`
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! rating_fg = "#f9e2af"
//! pager_active_fg = "#1e1e2e"
//! pager_active_bg = "#89b4fa"
//! error_fg = "#f38ba8"
//! toast_info_fg = "#a6e3a1"
//! toast_warning_fg = "#fab387"
//! modal_border = "#89b4fa"
//! ```

use crate::domain::error::{MarqueeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named color palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted card.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, card metadata and other secondary text.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Query matches inside card titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Welcome screen and loader.
    pub empty_state_fg: String,

    pub rating_fg: String,

    pub pager_active_fg: String,
    pub pager_active_bg: String,

    pub error_fg: String,

    pub toast_info_fg: String,
    pub toast_warning_fg: String,

    pub modal_border: String,
}

impl Theme {
    /// Looks up a built-in theme. Returns `None` for unknown names.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::ui::Theme;
    ///
    /// assert!(Theme::from_name("catppuccin-latte").is_some());
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::error!(theme = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Io`] when the file can't be read and
    /// [`MarqueeError::Theme`] when its contents don't parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| MarqueeError::Theme(format!("invalid theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; malformed colors fall back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Hard-coded Mocha palette, used only if the bundled TOML fails to parse.
    fn fallback() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: "catppuccin-mocha".to_string(),
            colors: ThemeColors {
                header_fg: c("#cdd6f4"),
                header_bg: None,
                selection_fg: c("#1e1e2e"),
                selection_bg: c("#cba6f7"),
                text_normal: c("#cdd6f4"),
                text_dim: c("#6c7086"),
                border: c("#45475a"),
                search_bar_border: c("#cba6f7"),
                match_highlight_fg: c("#1e1e2e"),
                match_highlight_bg: c("#f9e2af"),
                empty_state_fg: c("#89b4fa"),
                rating_fg: c("#f9e2af"),
                pager_active_fg: c("#1e1e2e"),
                pager_active_bg: c("#89b4fa"),
                error_fg: c("#f38ba8"),
                toast_info_fg: c("#a6e3a1"),
                toast_warning_fg: c("#fab387"),
                modal_border: c("#89b4fa"),
            },
        }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_all_builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_default_matches_bundled_mocha() {
        assert_eq!(Theme::default(), Theme::fallback());
    }

    #[test]
    fn test_hex_conversion() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("#xyz"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn test_from_file_round_trip_and_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = Theme::default();
        custom.name = "custom".to_string();
        write!(file, "{}", toml::to_string(&custom).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap().name, "custom");

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "name = 3").unwrap();
        assert!(matches!(Theme::from_file(broken.path()), Err(MarqueeError::Theme(_))));
        assert!(matches!(Theme::from_file("/nonexistent/theme.toml"), Err(MarqueeError::Io(_))));
    }
}
