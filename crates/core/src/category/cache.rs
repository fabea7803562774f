//! Category lookup caching using Moka.
//!
//! Entries are keyed by owner and category ID so one user's lookup can never
//! be served to another. Writers must call [`CategoryCache::invalidate`].

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use super::Category;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Default idle expiry for cache entries (1 minute).
const DEFAULT_IDLE_SECS: u64 = 60;

/// Cache for category lookups.
#[derive(Clone)]
pub struct CategoryCache {
    cache: Cache<(i32, i32), Arc<Category>>,
}

impl CategoryCache {
    /// Creates a new category cache with default settings.
    ///
    /// Default: 1000 entries max, 5 minute TTL, 1 minute idle expiry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS, DEFAULT_IDLE_SECS)
    }

    /// Creates a new category cache with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of entries to cache
    /// * `ttl_secs` - Absolute lifetime of an entry
    /// * `idle_secs` - Sliding expiry, reset on every read
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64, idle_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .time_to_idle(Duration::from_secs(idle_secs))
            .build();

        Self { cache }
    }

    /// Returns the cached category, if present.
    #[must_use]
    pub fn get(&self, user_id: i32, category_id: i32) -> Option<Arc<Category>> {
        self.cache.get(&(user_id, category_id))
    }

    /// Stores a category under its owner.
    pub fn insert(&self, category: Category) -> Arc<Category> {
        let entry = Arc::new(category);
        self.cache.insert((entry.user_id, entry.id), Arc::clone(&entry));
        entry
    }

    /// Drops a single entry. Called after every update or delete.
    pub fn invalidate(&self, user_id: i32, category_id: i32) {
        self.cache.invalidate(&(user_id, category_id));
    }

    #[cfg(test)]
    fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    #[cfg(test)]
    fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CategoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
