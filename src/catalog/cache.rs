//! Bounded recency cache of result pages.
//!
//! Pages are keyed by [`PageKey`] and evicted least-recently-used first once
//! the configured capacity is exceeded. Revisiting a cached `(query, page)`
//! serves it instantly instead of issuing another web request.

use crate::domain::{PageKey, ResultPage};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default number of pages kept in memory.
pub const DEFAULT_CAPACITY: usize = 32;

/// LRU cache of decoded result pages.
///
/// Values are reference-counted so that the page currently on screen can
/// outlive its cache entry after eviction.
pub struct PageCache {
    entries: LruCache<PageKey, Arc<ResultPage>>,
}

impl PageCache {
    /// Creates a cache holding at most `capacity` pages (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Returns the cached page for `key`, marking it most recently used.
    pub fn get(&mut self, key: &PageKey) -> Option<Arc<ResultPage>> {
        self.entries.get(key).cloned()
    }

    /// Stores `page` under `key` and returns the shared handle.
    ///
    /// Evicts the least recently used entry when full.
    pub fn insert(&mut self, key: PageKey, page: ResultPage) -> Arc<ResultPage> {
        let page = Arc::new(page);
        let replacing = self.entries.contains(&key);
        if let Some((evicted, _)) = self.entries.push(key, Arc::clone(&page)) {
            if !replacing {
                tracing::trace!(key = %evicted, "page evicted from cache");
            }
        }
        page
    }

    #[must_use]
    pub fn contains(&self, key: &PageKey) -> bool {
        self.entries.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for PageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;

    fn page(title: &str) -> ResultPage {
        ResultPage::new(vec![Movie::new(1, title)], 1)
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = PageCache::new(2);
        let a = PageKey::new("alien", 1);
        let b = PageKey::new("aliens", 1);
        let c = PageKey::new("alien 3", 1);

        cache.insert(a.clone(), page("Alien"));
        cache.insert(b.clone(), page("Aliens"));

        // Touch `a` so that `b` becomes the eviction candidate.
        assert!(cache.get(&a).is_some());
        cache.insert(c.clone(), page("Alien 3"));

        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert!(cache.contains(&c));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = PageCache::new(0);
        assert_eq!(cache.capacity(), 1);

        cache.insert(PageKey::new("a", 1), page("A"));
        cache.insert(PageKey::new("b", 1), page("B"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evicted_page_survives_through_handle() {
        let mut cache = PageCache::new(1);
        let shown = cache.insert(PageKey::new("alien", 1), page("Alien"));
        cache.insert(PageKey::new("heat", 1), page("Heat"));

        assert!(cache.get(&PageKey::new("alien", 1)).is_none());
        assert_eq!(shown.results[0].title, "Alien");
    }
}
