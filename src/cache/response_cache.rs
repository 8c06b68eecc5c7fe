//! Time-bounded cache for API responses.
//!
//! One instance per result type: single-card lookups and search results live
//! in separate caches so a card identifier can never collide with a query
//! string. Entries expire lazily after [`CACHE_TTL`]; an expired entry
//! behaves as absent and stays in place until the next `put` overwrites it.
//! There is no size bound and no background sweep: the working set is small
//! and the cache lives for the process lifetime.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// How long a cached response stays valid (10 minutes)
pub const CACHE_TTL: Duration = Duration::from_secs(600);

struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

/// Thread-safe response cache with per-entry lazy TTL expiry.
/// Safe for unsynchronized concurrent callers; operations on distinct keys
/// never block each other.
pub struct ResponseCache<V: Clone> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> ResponseCache<V> {
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    /// Cache with an explicit TTL, used in tests
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value if present and not expired
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.created_at.elapsed() <= self.ttl {
            log::debug!("Cache hit for '{}'", key);
            Some(entry.value.clone())
        } else {
            log::debug!("Cache entry for '{}' expired", key);
            None
        }
    }

    /// Unconditionally stores `value`, replacing any existing entry.
    /// Only successful results belong here; callers keep failures out.
    pub fn put(&self, key: &str, value: V) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
    }

    /// Removes all entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
