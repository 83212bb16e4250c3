//! Result pages and the `(query, page)` request identity.

use super::movie::Movie;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Context-map key carrying the query of an in-flight web request.
const CONTEXT_QUERY: &str = "query";

/// Context-map key carrying the page number of an in-flight web request.
const CONTEXT_PAGE: &str = "page";

/// One page of catalog search results.
///
/// Mirrors the wire shape of TMDB's paginated responses. `total_pages` is `0`
/// when the query legitimately has no matches; that is a success, not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResultPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl ResultPage {
    /// Builds a page from results and a page count.
    #[must_use]
    pub fn new(results: Vec<Movie>, total_pages: u32) -> Self {
        Self {
            page: 1,
            total_results: results.len() as u64,
            results,
            total_pages,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Identity of a page request: a non-empty query and a 1-indexed page.
///
/// The key is the cache key of the fetch orchestrator and travels through the
/// Zellij web-request context so that a response can be matched back to the
/// request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey {
    pub query: String,
    pub page: u32,
}

impl PageKey {
    /// Creates a key. A page of `0` is lifted to `1`.
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
        }
    }

    /// Encodes the key into a web-request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_QUERY.to_string(), self.query.clone());
        context.insert(CONTEXT_PAGE.to_string(), self.page.to_string());
        context
    }

    /// Decodes a key from a web-request context map.
    ///
    /// Returns `None` for contexts that did not originate from
    /// [`PageKey::to_context`], such as requests issued by other code.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::PageKey;
    ///
    /// let key = PageKey::new("alien", 3);
    /// assert_eq!(PageKey::from_context(&key.to_context()), Some(key));
    /// ```
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let query = context.get(CONTEXT_QUERY)?;
        let page = context.get(CONTEXT_PAGE)?.parse::<u32>().ok()?;
        if query.is_empty() || page == 0 {
            return None;
        }
        Some(Self::new(query.clone(), page))
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.query, self.page)
    }
}
