//! Marquee: a Zellij plugin for searching the TMDB movie catalog.
//!
//! Type a title, press Enter, and browse a grid of matching movies page by
//! page. Selecting a card opens a detail modal. Pages are fetched through
//! Zellij's `web_request`, decoded on a worker thread, and kept in an LRU
//! cache so revisiting a page is instant while the previous results stay on
//! screen during loads.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Zellij plugin shim (main.rs)                        │  keys, web results, timers
//! └──────────────────────────────────────────────────────┘
//!                         │ Event            ▲ Action
//! ┌──────────────────────────────────────────────────────┐
//! │  app/  search · fetch · selection · notify · state   │
//! └──────────────────────────────────────────────────────┘
//!        │                  │                  │
//! ┌─────────────┐   ┌───────────────┐   ┌──────────────┐
//! │ ui/         │   │ catalog/      │   │ worker/      │
//! │ view model, │   │ requests,     │   │ decode pages │
//! │ components  │   │ decode, cache │   │ off-thread   │
//! └─────────────┘   └───────────────┘   └──────────────┘
//!                         │
//! ┌──────────────────────────────────────────────────────┐
//! │  domain/ (Movie, ResultPage, PageKey, errors)        │
//! │  infrastructure/ (sandbox paths) · observability/    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/marquee.wasm" {
//!         api_token "eyJhbGciOi..."
//!         language "en-US"
//!         display_limit "15"
//!         cache_capacity "32"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use marquee::{handle_event, initialize, Action, Config, Event, PageKey};
//!
//! let mut state = initialize(&Config::default());
//! for c in "alien".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(actions.contains(&Action::FetchPage(PageKey::new("alien", 1))));
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{MarqueeError, Movie, PageKey, ResultPage, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_DISPLAY_LIMIT: usize = 15;
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Plugin configuration parsed from the Zellij configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB v4 read access token, sent as a bearer token. Without one every
    /// fetch fails with a configuration error.
    pub api_token: Option<String>,
    pub api_base_url: String,
    /// Prefix for poster and backdrop paths shown in the detail modal.
    pub image_base_url: String,
    pub language: String,
    /// Maximum number of cards shown per page.
    pub display_limit: usize,
    /// Result pages kept in the LRU cache.
    pub cache_capacity: usize,
    /// Built-in theme name. Ignored when `theme_file` is set.
    pub theme_name: Option<String>,
    /// Path to a TOML theme, already tilde-expanded.
    pub theme_file: Option<String>,
    /// `EnvFilter` directive for exported spans. Default: `info`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the map Zellij hands to `load`.
    ///
    /// Missing, blank, or unparsable values fall back to their defaults.
    /// Numeric limits are clamped to at least 1.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use marquee::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("display_limit".to_string(), "9".to_string());
    /// map.insert("cache_capacity".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.display_limit, 9);
    /// assert_eq!(config.cache_capacity, 32);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            api_token: text("api_token"),
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            image_base_url: text("image_base_url").unwrap_or(defaults.image_base_url),
            language: text("language").unwrap_or(defaults.language),
            display_limit: parse_or(config, "display_limit", defaults.display_limit).max(1),
            cache_capacity: parse_or(config, "cache_capacity", defaults.cache_capacity).max(1),
            theme_name: text("theme"),
            theme_file: text("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: text("trace_level"),
        }
    }
}

fn parse_or<T: FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    match config.get(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::warn!(key, "unparsable configuration value, using default");
            default
        }
        None => default,
    }
}

/// Builds the initial [`AppState`], resolving the theme from `theme_file`,
/// then `theme`, then the default palette.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        has_token = config.api_token.is_some(),
        display_limit = config.display_limit,
        cache_capacity = config.cache_capacity,
        "initializing marquee plugin"
    );

    AppState::new(config, resolve_theme(config))
}

fn resolve_theme(config: &Config) -> Theme {
    if let Some(path) = &config.theme_file {
        match Theme::from_file(path) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, trying built-ins"),
        }
    }

    config
        .theme_name
        .as_deref()
        .and_then(|name| {
            let theme = Theme::from_name(name);
            if theme.is_none() {
                tracing::warn!(theme = name, "unknown theme name, using default");
            }
            theme
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_empty_map_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn test_parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("api_token", " secret "),
            ("api_base_url", "http://localhost:8080/3"),
            ("image_base_url", "http://img.local/w92"),
            ("language", "fr-FR"),
            ("display_limit", "12"),
            ("cache_capacity", "4"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/themes/dune.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.api_base_url, "http://localhost:8080/3");
        assert_eq!(config.image_base_url, "http://img.local/w92");
        assert_eq!(config.language, "fr-FR");
        assert_eq!(config.display_limit, 12);
        assert_eq!(config.cache_capacity, 4);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("/host/themes/dune.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_token", "   "),
            ("language", ""),
            ("display_limit", "-3"),
            ("cache_capacity", "0"),
        ]));

        assert_eq!(config.api_token, None);
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert_eq!(config.display_limit, DEFAULT_DISPLAY_LIMIT);
        assert_eq!(config.cache_capacity, 1);
    }

    #[test]
    fn test_unknown_theme_uses_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_theme(&config).name, Theme::default().name);
    }

    #[test]
    fn test_named_theme_resolves() {
        let config = Config { theme_name: Some("catppuccin-latte".to_string()), ..Default::default() };
        assert_eq!(resolve_theme(&config).name, Theme::from_name("catppuccin-latte").unwrap().name);
    }
}
