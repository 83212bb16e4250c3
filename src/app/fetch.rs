//! Fetch orchestration keyed by `(query, page)`.
//!
//! [`FetchOrchestrator`] decides when a page must be requested, tracks which
//! key is current, and applies completed requests to the view state. It owns
//! the page cache.
//!
//! # Ordering
//!
//! Every response is tagged with the [`PageKey`] that requested it. A response
//! whose key is no longer current is cached but never applied, so a slow
//! response to a superseded request can't overwrite newer state. No explicit
//! cancellation is needed.
//!
//! # Stale-while-revalidate
//!
//! While a new key is loading, the data of the previous key stays visible
//! ([`FetchOrchestrator::is_placeholder`]) and the loading flag is raised
//! alongside it.

use crate::catalog::PageCache;
use crate::domain::{PageKey, ResultPage};
use std::collections::HashSet;
use std::sync::Arc;

/// Status of the current key's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// No query: nothing requested, nothing to show.
    Idle,
    /// The current key's request is in flight.
    Loading,
    /// The current key's request failed.
    Error,
    /// The current key's page is available.
    Success,
}

/// What [`FetchOrchestrator::request`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// No key; the orchestrator was reset to idle.
    Idle,
    /// The key was already current and loading or loaded.
    Unchanged,
    /// Served from cache; data changed.
    Applied,
    /// A request for this key is already in flight; now waiting on it.
    Pending,
    /// A network request must be issued for this key.
    Fetch(PageKey),
}

/// What [`FetchOrchestrator::complete`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Response belonged to a superseded key and was not applied.
    Stale,
    /// Response is now the displayed data.
    Applied,
    /// Current request failed; error state entered.
    Failed,
}

/// Owns request identity, request status, displayed data and the page cache.
#[derive(Debug)]
pub struct FetchOrchestrator {
    cache: PageCache,
    current: Option<PageKey>,
    in_flight: HashSet<PageKey>,
    status: FetchStatus,
    data: Option<(PageKey, Arc<ResultPage>)>,
    data_version: u64,
    last_error: Option<String>,
}

impl FetchOrchestrator {
    #[must_use]
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: PageCache::new(cache_capacity),
            current: None,
            in_flight: HashSet::new(),
            status: FetchStatus::Idle,
            data: None,
            data_version: 0,
            last_error: None,
        }
    }

    /// Makes `key` current, deciding whether the network must be hit.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::app::fetch::{FetchOrchestrator, RequestOutcome};
    /// use marquee::PageKey;
    ///
    /// let mut fetch = FetchOrchestrator::new(8);
    /// assert_eq!(fetch.request(None), RequestOutcome::Idle);
    ///
    /// let key = PageKey::new("alien", 1);
    /// assert_eq!(fetch.request(Some(key.clone())), RequestOutcome::Fetch(key.clone()));
    /// assert!(fetch.is_loading());
    /// assert_eq!(fetch.request(Some(key)), RequestOutcome::Unchanged);
    /// ```
    pub fn request(&mut self, key: Option<PageKey>) -> RequestOutcome {
        let Some(key) = key else {
            tracing::debug!("no query, fetch disabled");
            self.current = None;
            self.status = FetchStatus::Idle;
            if self.data.take().is_some() {
                self.data_version += 1;
            }
            return RequestOutcome::Idle;
        };

        if self.current.as_ref() == Some(&key)
            && matches!(self.status, FetchStatus::Loading | FetchStatus::Success)
        {
            return RequestOutcome::Unchanged;
        }

        self.current = Some(key.clone());
        self.last_error = None;

        if let Some(page) = self.cache.get(&key) {
            tracing::debug!(key = %key, "page served from cache");
            self.apply(key, page);
            return RequestOutcome::Applied;
        }

        self.status = FetchStatus::Loading;

        if self.in_flight.contains(&key) {
            tracing::debug!(key = %key, "request already in flight");
            RequestOutcome::Pending
        } else {
            tracing::debug!(key = %key, keeping_previous = self.data.is_some(), "fetching page");
            self.in_flight.insert(key.clone());
            RequestOutcome::Fetch(key)
        }
    }

    /// The current key again, if its request is still outstanding.
    ///
    /// Used when the user resubmits while a request never answered; the key
    /// stays in flight and whichever answer lands first is applied.
    #[must_use]
    pub fn reissue(&self) -> Option<PageKey> {
        if self.is_loading() {
            self.current.clone()
        } else {
            None
        }
    }

    /// Records the result of the request issued for `key`.
    ///
    /// Successful pages are always cached. They are applied to the view only
    /// when `key` is current and still waiting, so a duplicate answer to a
    /// reissued request changes nothing.
    pub fn complete(
        &mut self,
        key: PageKey,
        result: std::result::Result<ResultPage, String>,
    ) -> CompletionOutcome {
        self.in_flight.remove(&key);
        let is_current = self.is_loading() && self.current.as_ref() == Some(&key);

        match result {
            Ok(page) => {
                let page = self.cache.insert(key.clone(), page);
                if !is_current {
                    tracing::debug!(key = %key, current = ?self.current, "stale response cached, not applied");
                    return CompletionOutcome::Stale;
                }
                self.apply(key, page);
                CompletionOutcome::Applied
            }
            Err(message) => {
                if !is_current {
                    tracing::debug!(key = %key, error = %message, "stale request failed, ignored");
                    return CompletionOutcome::Stale;
                }
                tracing::debug!(key = %key, error = %message, "page request failed");
                self.status = FetchStatus::Error;
                self.last_error = Some(message);
                if self.data.take().is_some() {
                    self.data_version += 1;
                }
                CompletionOutcome::Failed
            }
        }
    }

    fn apply(&mut self, key: PageKey, page: Arc<ResultPage>) {
        self.status = FetchStatus::Success;
        self.data = Some((key, page));
        self.data_version += 1;
    }

    #[must_use]
    pub const fn status(&self) -> FetchStatus {
        self.status
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.status, FetchStatus::Error)
    }

    /// The page currently on screen, which may belong to an older key while
    /// loading.
    #[must_use]
    pub fn data(&self) -> Option<&ResultPage> {
        self.data.as_ref().map(|(_, page)| page.as_ref())
    }

    /// Whether the shown data belongs to a key other than the current one.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        match (&self.data, &self.current) {
            (Some((shown, _)), Some(current)) => shown != current,
            _ => false,
        }
    }

    /// Incremented whenever the shown data changes (set, replaced or cleared).
    #[must_use]
    pub const fn data_version(&self) -> u64 {
        self.data_version
    }

    #[must_use]
    pub const fn current(&self) -> Option<&PageKey> {
        self.current.as_ref()
    }

    /// Diagnostic message of the last failure of the current key.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &PageKey) -> bool {
        self.in_flight.contains(key)
    }

    #[must_use]
    pub const fn cache(&self) -> &PageCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;

    fn page_of(count: usize, total_pages: u32) -> ResultPage {
        let movies = (0..count)
            .map(|i| Movie::new(i as u64 + 1, format!("Movie {i}")))
            .collect();
        ResultPage::new(movies, total_pages)
    }

    #[test]
    fn test_empty_query_never_loads() {
        let mut fetch = FetchOrchestrator::new(4);
        assert_eq!(fetch.request(None), RequestOutcome::Idle);
        assert_eq!(fetch.status(), FetchStatus::Idle);
        assert!(!fetch.is_loading());
        assert!(!fetch.is_error());
        assert!(fetch.data().is_none());
    }

    #[test]
    fn test_previous_data_kept_while_loading() {
        let mut fetch = FetchOrchestrator::new(4);
        let first = PageKey::new("alien", 1);
        fetch.request(Some(first.clone()));
        fetch.complete(first, Ok(page_of(20, 3)));

        let third = PageKey::new("alien", 3);
        assert_eq!(fetch.request(Some(third.clone())), RequestOutcome::Fetch(third));
        assert!(fetch.is_loading());
        assert!(fetch.is_placeholder());
        assert_eq!(fetch.data().map(|p| p.results.len()), Some(20));
    }

    #[test]
    fn test_stale_response_is_not_applied() {
        let mut fetch = FetchOrchestrator::new(4);
        let old = PageKey::new("alien", 1);
        let new = PageKey::new("heat", 1);

        fetch.request(Some(old.clone()));
        fetch.request(Some(new.clone()));

        assert_eq!(fetch.complete(old.clone(), Ok(page_of(5, 1))), CompletionOutcome::Stale);
        assert!(fetch.is_loading());
        assert!(fetch.data().is_none());

        // The late page is still cached for a later revisit.
        assert!(fetch.cache().contains(&old));

        assert_eq!(fetch.complete(new, Ok(page_of(2, 1))), CompletionOutcome::Applied);
        assert_eq!(fetch.data().map(|p| p.results.len()), Some(2));
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut fetch = FetchOrchestrator::new(4);
        let old = PageKey::new("alien", 1);
        let new = PageKey::new("alien", 2);

        fetch.request(Some(old.clone()));
        fetch.request(Some(new));

        assert_eq!(fetch.complete(old, Err("timeout".into())), CompletionOutcome::Stale);
        assert!(fetch.is_loading());
        assert!(!fetch.is_error());
    }

    #[test]
    fn test_failure_enters_error_and_clears_data() {
        let mut fetch = FetchOrchestrator::new(4);
        let first = PageKey::new("alien", 1);
        fetch.request(Some(first.clone()));
        fetch.complete(first, Ok(page_of(3, 2)));

        let second = PageKey::new("alien", 2);
        fetch.request(Some(second.clone()));
        let version = fetch.data_version();

        assert_eq!(fetch.complete(second, Err("HTTP 500".into())), CompletionOutcome::Failed);
        assert!(fetch.is_error());
        assert!(!fetch.is_loading());
        assert!(fetch.data().is_none());
        assert_eq!(fetch.last_error(), Some("HTTP 500"));
        assert!(fetch.data_version() > version);
    }

    #[test]
    fn test_failed_key_is_retried_on_next_request() {
        let mut fetch = FetchOrchestrator::new(4);
        let key = PageKey::new("alien", 1);
        fetch.request(Some(key.clone()));
        fetch.complete(key.clone(), Err("offline".into()));

        assert_eq!(fetch.request(Some(key.clone())), RequestOutcome::Fetch(key));
        assert!(fetch.is_loading());
        assert!(fetch.last_error().is_none());
    }

    #[test]
    fn test_cache_hit_skips_network() {
        let mut fetch = FetchOrchestrator::new(4);
        let first = PageKey::new("alien", 1);
        let second = PageKey::new("alien", 2);

        fetch.request(Some(first.clone()));
        fetch.complete(first.clone(), Ok(page_of(20, 2)));
        fetch.request(Some(second.clone()));
        fetch.complete(second, Ok(page_of(7, 2)));

        let version = fetch.data_version();
        assert_eq!(fetch.request(Some(first)), RequestOutcome::Applied);
        assert_eq!(fetch.status(), FetchStatus::Success);
        assert_eq!(fetch.data().map(|p| p.results.len()), Some(20));
        assert_eq!(fetch.data_version(), version + 1);
    }

    #[test]
    fn test_returning_to_in_flight_key_does_not_duplicate_request() {
        let mut fetch = FetchOrchestrator::new(4);
        let a = PageKey::new("alien", 1);
        let b = PageKey::new("alien", 2);

        assert_eq!(fetch.request(Some(a.clone())), RequestOutcome::Fetch(a.clone()));
        assert_eq!(fetch.request(Some(b)), RequestOutcome::Fetch(PageKey::new("alien", 2)));
        assert_eq!(fetch.request(Some(a.clone())), RequestOutcome::Pending);
        assert!(fetch.is_in_flight(&a));

        assert_eq!(fetch.complete(a, Ok(page_of(1, 2))), CompletionOutcome::Applied);
    }

    #[test]
    fn test_rerequesting_current_key_is_unchanged() {
        let mut fetch = FetchOrchestrator::new(4);
        let key = PageKey::new("alien", 1);
        fetch.request(Some(key.clone()));
        fetch.complete(key.clone(), Ok(page_of(1, 1)));

        let version = fetch.data_version();
        assert_eq!(fetch.request(Some(key)), RequestOutcome::Unchanged);
        assert_eq!(fetch.data_version(), version);
    }

    #[test]
    fn test_reissue_only_while_loading() {
        let mut fetch = FetchOrchestrator::new(4);
        assert_eq!(fetch.reissue(), None);

        let key = PageKey::new("alien", 1);
        fetch.request(Some(key.clone()));
        assert_eq!(fetch.reissue(), Some(key.clone()));

        fetch.complete(key, Ok(page_of(1, 1)));
        assert_eq!(fetch.reissue(), None);
    }

    #[test]
    fn test_duplicate_answer_is_not_reapplied() {
        let mut fetch = FetchOrchestrator::new(4);
        let key = PageKey::new("alien", 1);
        fetch.request(Some(key.clone()));

        assert_eq!(fetch.complete(key.clone(), Ok(page_of(3, 1))), CompletionOutcome::Applied);
        let version = fetch.data_version();

        assert_eq!(fetch.complete(key.clone(), Ok(page_of(3, 1))), CompletionOutcome::Stale);
        assert_eq!(fetch.complete(key, Err("late failure".into())), CompletionOutcome::Stale);
        assert_eq!(fetch.data_version(), version);
        assert_eq!(fetch.status(), FetchStatus::Success);
    }
}
