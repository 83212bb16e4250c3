//! Application state and view model computation.
//!
//! [`AppState`] gathers the controllers (search, fetch, selection,
//! notifications) with the UI-only state around them: the search bar draft,
//! the grid cursor and the input mode. `compute_viewmodel` turns a snapshot
//! of it into a [`UIViewModel`].
//!
//! # Example
//!
//! ```rust
//! use marquee::app::AppState;
//! use marquee::ui::{viewmodel::Body, Theme};
//! use marquee::Config;
//!
//! let state = AppState::new(&Config::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(matches!(viewmodel.body, Body::Welcome(_)));
//! ```

use super::fetch::{FetchOrchestrator, FetchStatus};
use super::modes::InputMode;
use super::notify::{EmptyResultWatcher, Notifications, ToastLevel, NO_RESULTS_MESSAGE};
use super::search::SearchState;
use super::selection::Selection;
use crate::domain::Movie;
use crate::ui::components::grid::{CARD_HEIGHT, CARD_INNER_WIDTH, CARD_WIDTH};
use crate::ui::helpers::{highlight_ranges, truncate, wrap};
use crate::ui::pager::{pager_items, MARGIN_PAGES, PAGE_RANGE};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, Card, EmptyState, ErrorInfo, FooterInfo, HeaderInfo, ModalInfo, PagerInfo, ResultsView,
    SearchBarInfo, ToastInfo, UIViewModel,
};
use crate::Config;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows above the grid: header, border, three-line search bar, spacer.
const TOP_CHROME_ROWS: usize = 6;

/// Rows below the grid: spacer, pager, border, footer.
const BOTTOM_CHROME_ROWS: usize = 4;

const MAX_GRID_COLUMNS: usize = 5;

const MAX_MODAL_WIDTH: usize = 72;

/// Cursor movement over the results grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    /// Next card, wrapping to the first.
    Next,
    /// Previous card, wrapping to the last.
    Previous,
}

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    /// Submitted query and current page.
    pub search: SearchState,

    /// Search bar contents. Only becomes the query on submit.
    pub draft: String,

    pub fetch: FetchOrchestrator,

    pub selection: Selection,

    /// Index of the highlighted card among the displayed movies.
    pub cursor: usize,

    pub input_mode: InputMode,

    pub notifications: Notifications,

    pub empty_watch: EmptyResultWatcher,

    /// Maximum cards shown per page.
    pub display_limit: usize,

    /// Prefix for poster and backdrop paths.
    pub image_base_url: String,

    pub theme: Theme,

    /// Last known pane width, used for cursor movement between renders.
    pub viewport_cols: usize,

    /// Set when the user refused web access; fetches then fail immediately.
    pub web_access_denied: bool,

    /// Data version the cursor was last reset for.
    cursor_version: u64,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            search: SearchState::new(),
            draft: String::new(),
            fetch: FetchOrchestrator::new(config.cache_capacity),
            selection: Selection::new(),
            cursor: 0,
            input_mode: InputMode::Typing,
            notifications: Notifications::new(),
            empty_watch: EmptyResultWatcher::new(),
            display_limit: config.display_limit.max(1),
            image_base_url: config.image_base_url.clone(),
            theme,
            viewport_cols: 80,
            web_access_denied: false,
            cursor_version: 0,
        }
    }

    /// Movies on screen: the shown page capped to `display_limit`.
    #[must_use]
    pub fn visible_movies(&self) -> &[Movie] {
        self.fetch.data().map_or(&[], |page| {
            let end = page.results.len().min(self.display_limit);
            &page.results[..end]
        })
    }

    /// The movie under the cursor.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.visible_movies().get(self.cursor)
    }

    /// Total pages reported by the shown data.
    #[must_use]
    pub fn page_count(&self) -> Option<u32> {
        self.fetch.data().map(|page| page.total_pages)
    }

    /// Grid columns that fit in `cols` terminal columns.
    #[must_use]
    pub fn grid_columns(cols: usize) -> usize {
        (cols.saturating_sub(2) / CARD_WIDTH).clamp(1, MAX_GRID_COLUMNS)
    }

    pub fn set_viewport(&mut self, cols: usize) {
        self.viewport_cols = cols;
    }

    /// Moves the grid cursor. Returns whether it moved.
    pub fn move_cursor(&mut self, movement: CursorMove) -> bool {
        let count = self.visible_movies().len();
        if count == 0 {
            return false;
        }
        let columns = Self::grid_columns(self.viewport_cols);
        let current = self.cursor.min(count - 1);

        let next = match movement {
            CursorMove::Left if current % columns > 0 => current - 1,
            CursorMove::Right if current % columns + 1 < columns && current + 1 < count => current + 1,
            CursorMove::Up if current >= columns => current - columns,
            CursorMove::Down if current + columns < count => current + columns,
            CursorMove::Next => (current + 1) % count,
            CursorMove::Previous => (current + count - 1) % count,
            _ => current,
        };

        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    /// Reacts to a possible change of the shown data.
    ///
    /// Resets the cursor when the data changed and queues the no-results toast
    /// when the new data is an empty page. Returns whether a toast was queued.
    pub fn on_data_changed(&mut self) -> bool {
        let version = self.fetch.data_version();
        if version != self.cursor_version {
            self.cursor = 0;
            self.cursor_version = version;
        }

        if self.empty_watch.observe(version, self.fetch.data()) {
            tracing::debug!(query = %self.search.query(), "search returned no results");
            self.notifications.push(NO_RESULTS_MESSAGE, ToastLevel::Info);
            return true;
        }
        false
    }

    /// Builds the view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                draft: self.draft.clone(),
                is_focused: self.input_mode.is_typing(),
            },
            body: self.compute_body(rows, cols),
            modal: self.compute_modal(cols),
            toasts: self
                .notifications
                .iter()
                .map(|toast| ToastInfo {
                    message: toast.message.clone(),
                    level: toast.level,
                })
                .collect(),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> Body {
        if self.search.key().is_none() {
            return Body::Welcome(EmptyState {
                message: "Search the movie catalog".to_string(),
                subtitle: "Type a title and press Enter".to_string(),
            });
        }

        if self.fetch.status() == FetchStatus::Error {
            return Body::Error(ErrorInfo {
                message: "There was an error, please try again.".to_string(),
                detail: self.fetch.last_error().map(str::to_string),
            });
        }

        let movies = self.visible_movies();
        if movies.is_empty() {
            return if self.fetch.is_loading() { Body::Loader } else { Body::Blank };
        }

        Body::Results(self.compute_results(movies, rows, cols))
    }

    fn compute_results(&self, movies: &[Movie], rows: usize, cols: usize) -> ResultsView {
        let columns = Self::grid_columns(cols);
        let available_rows = rows.saturating_sub(TOP_CHROME_ROWS + BOTTOM_CHROME_ROWS);
        let visible_rows = (available_rows / CARD_HEIGHT).max(1);

        let total_rows = movies.len().div_ceil(columns);
        let cursor = self.cursor.min(movies.len() - 1);
        let cursor_row = cursor / columns;

        let end_row = cursor_row
            .saturating_sub(visible_rows / 2)
            .saturating_add(visible_rows)
            .min(total_rows);
        let start_row = end_row.saturating_sub(visible_rows);

        let start = start_row * columns;
        let end = (end_row * columns).min(movies.len());

        let matcher = SkimMatcherV2::default();
        let cards = movies[start..end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| self.compute_card(movie, start + offset == cursor, &matcher))
            .collect();

        let pager = self
            .page_count()
            .filter(|&count| count > 1)
            .map(|page_count| {
                let active = self.search.pager_index();
                PagerInfo {
                    items: pager_items(page_count, active, PAGE_RANGE, MARGIN_PAGES),
                    active,
                    page_count,
                }
            });

        ResultsView { cards, columns, pager }
    }

    fn compute_card(&self, movie: &Movie, is_selected: bool, matcher: &SkimMatcherV2) -> Card {
        let title = truncate(&movie.title, CARD_INNER_WIDTH);
        let mut visible_chars = title.chars().count();
        if title != movie.title {
            visible_chars = visible_chars.saturating_sub(1);
        }

        let highlight_ranges = if self.search.query().is_empty() {
            vec![]
        } else {
            highlight_ranges(matcher, &movie.title, self.search.query(), visible_chars)
        };

        let year = movie.release_year().unwrap_or_else(|| "TBA".to_string());
        let meta = truncate(&format!("{year} · {}", movie.rating_label()), CARD_INNER_WIDTH);

        Card {
            title,
            meta,
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_modal(&self, cols: usize) -> Option<ModalInfo> {
        let movie = self.selection.current()?;

        let width = cols.saturating_sub(4).clamp(20, MAX_MODAL_WIDTH);
        let inner = width.saturating_sub(4);

        let mut lines = Vec::new();
        if !movie.original_title.is_empty() && movie.original_title != movie.title {
            lines.push(format!("Original title: {}", movie.original_title));
        }
        lines.push(format!(
            "Released: {}",
            movie.release_label().unwrap_or_else(|| "unknown".to_string())
        ));
        lines.push(format!("Rating: {} ({} votes)", movie.rating_label(), movie.vote_count));
        if !movie.original_language.is_empty() {
            lines.push(format!("Language: {}", movie.original_language.to_uppercase()));
        }
        lines.push(String::new());

        if movie.overview.trim().is_empty() {
            lines.push("No overview available.".to_string());
        } else {
            lines.extend(wrap(&movie.overview, inner));
        }

        let urls = [
            ("Poster", movie.poster_url(&self.image_base_url)),
            ("Backdrop", movie.backdrop_url(&self.image_base_url)),
        ];
        if urls.iter().any(|(_, url)| url.is_some()) {
            lines.push(String::new());
        }
        for (label, url) in urls {
            if let Some(url) = url {
                lines.push(format!("{label}: {url}"));
            }
        }

        Some(ModalInfo {
            title: truncate(&movie.title, inner),
            lines: lines.iter().map(|line| truncate(line, inner)).collect(),
            width,
        })
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = self.search.key().map(|key| {
            let mut status = format!("\"{}\" · page {}", key.query, key.page);
            if self.fetch.status() == FetchStatus::Success && !self.fetch.is_placeholder() {
                if let Some(page) = self.fetch.data() {
                    status.push_str(&format!(" of {} · {} results", page.total_pages.max(1), page.total_results));
                }
            }
            status
        });

        HeaderInfo {
            title: " Marquee ".to_string(),
            status,
            is_loading: self.fetch.is_loading(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Typing => "Enter: search  Esc: results  Ctrl+n/p: move  Type a title",
            InputMode::Browsing => {
                "hjkl/arrows: move  Enter: details  [/]: page  g/G: first/last  /: search  q: quit"
            }
            InputMode::Detail => "Esc/Enter/q: close",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageKey, ResultPage};

    fn state_with_page(count: usize, total_pages: u32) -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default());
        state.search.submit("alien");
        let key = PageKey::new("alien", 1);
        state.fetch.request(Some(key.clone()));
        let movies = (0..count)
            .map(|i| Movie::new(i as u64 + 1, format!("Alien {i}")))
            .collect();
        state.fetch.complete(key, Ok(ResultPage::new(movies, total_pages)));
        state.on_data_changed();
        state
    }

    fn results(vm: &UIViewModel) -> &ResultsView {
        match &vm.body {
            Body::Results(results) => results,
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[test]
    fn test_grid_is_capped_to_display_limit() {
        let state = state_with_page(20, 3);
        let vm = state.compute_viewmodel(40, 80);
        let view = results(&vm);

        assert_eq!(view.cards.len(), 15);
        let pager = view.pager.as_ref().expect("pager shown for 3 pages");
        assert_eq!(pager.page_count, 3);
        assert_eq!(pager.active, 0);
    }

    #[test]
    fn test_single_page_has_no_pager() {
        let state = state_with_page(4, 1);
        let vm = state.compute_viewmodel(40, 80);
        assert!(results(&vm).pager.is_none());
    }

    #[test]
    fn test_small_viewport_windows_around_cursor() {
        let mut state = state_with_page(15, 1);
        state.cursor = 14;
        // 16 rows leave room for two card rows of three.
        let vm = state.compute_viewmodel(16, 80);
        let view = results(&vm);

        assert_eq!(view.columns, 3);
        assert_eq!(view.cards.len(), 6);
        assert!(view.cards.iter().any(|card| card.is_selected));
        assert!(view.cards[0].title.starts_with("Alien 9"));
    }

    #[test]
    fn test_cursor_moves_within_grid() {
        let mut state = state_with_page(7, 1);
        state.set_viewport(80);

        assert!(!state.move_cursor(CursorMove::Left));
        assert!(state.move_cursor(CursorMove::Down));
        assert_eq!(state.cursor, 3);
        assert!(state.move_cursor(CursorMove::Down));
        assert_eq!(state.cursor, 6);
        assert!(!state.move_cursor(CursorMove::Right));
        assert!(state.move_cursor(CursorMove::Next));
        assert_eq!(state.cursor, 0);
        assert!(state.move_cursor(CursorMove::Previous));
        assert_eq!(state.cursor, 6);
    }

    #[test]
    fn test_welcome_before_first_search() {
        let state = AppState::new(&Config::default(), Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.body, Body::Welcome(_)));
        assert!(vm.header.status.is_none());
        assert!(vm.search_bar.is_focused);
    }

    #[test]
    fn test_highlights_follow_submitted_query() {
        let state = state_with_page(1, 1);
        let vm = state.compute_viewmodel(40, 80);
        assert_eq!(results(&vm).cards[0].highlight_ranges, vec![(0, 5)]);
    }

    #[test]
    fn test_modal_lists_details() {
        let mut state = state_with_page(1, 1);
        let mut movie = Movie::new(348, "Alien");
        movie.overview = "During its return to the earth, commercial spaceship Nostromo intercepts a distress signal."
            .to_string();
        movie.poster_path = Some("/vfrQk5IPloGg1v9Rzbh2Eg3VGyM.jpg".to_string());
        movie.vote_average = 8.2;
        movie.vote_count = 15000;
        state.selection.select(movie);

        let modal = state.compute_viewmodel(40, 60).modal.expect("modal open");
        assert_eq!(modal.title, "Alien");
        assert!(modal.lines.iter().any(|l| l == "Rating: 8.2/10 (15000 votes)"));
        assert!(modal.lines.iter().any(|l| l.starts_with("Poster: https://image.tmdb.org")));
        assert!(modal.lines.iter().all(|l| crate::ui::helpers::display_width(l) <= modal.width - 4));
    }
}
