//! Query and pagination state.
//!
//! [`SearchState`] holds the submitted query and the current 1-indexed page.
//! Only two operations mutate it: submitting a search (which always lands on
//! page 1) and changing page from the zero-indexed pager control.

use crate::domain::PageKey;

/// Outcome of submitting text from the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text was blank after trimming; nothing changed.
    Rejected,
    /// Query and page already matched the submission.
    Unchanged,
    /// Query and/or page were updated.
    Updated,
}

/// Current search string and page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    page: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    /// Empty query on page 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Sets the query to the trimmed `text` and resets the page to 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::app::search::{SearchState, SubmitOutcome};
    ///
    /// let mut search = SearchState::new();
    /// search.change_page(4);
    /// assert_eq!(search.submit("  alien "), SubmitOutcome::Updated);
    /// assert_eq!(search.query(), "alien");
    /// assert_eq!(search.page(), 1);
    /// ```
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Rejected;
        }
        if self.query == text && self.page == 1 {
            return SubmitOutcome::Unchanged;
        }
        self.query = text.to_string();
        self.page = 1;
        SubmitOutcome::Updated
    }

    /// Applies a zero-indexed pager selection. Returns whether the page changed.
    pub fn change_page(&mut self, index: u32) -> bool {
        let page = index.saturating_add(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// The zero-indexed pager position matching the current page.
    #[must_use]
    pub const fn pager_index(&self) -> u32 {
        self.page - 1
    }

    /// The request key, or `None` while no query has been submitted.
    #[must_use]
    pub fn key(&self) -> Option<PageKey> {
        if self.query.is_empty() {
            None
        } else {
            Some(PageKey::new(self.query.clone(), self.page))
        }
    }
}
