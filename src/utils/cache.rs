use dashmap::DashMap;

use crate::models::cache::CacheEntry;

/// 5 minutes, in milliseconds.
pub const CACHE_TTL_SHORT: i64 = 5 * 60 * 1000;
/// 30 minutes, in milliseconds.
pub const CACHE_TTL_MEDIUM: i64 = 30 * 60 * 1000;
/// 24 hours, in milliseconds.
pub const CACHE_TTL_LONG: i64 = 24 * 60 * 60 * 1000;

/// In-process TTL cache keyed by an opaque fingerprint string.
///
/// Expiry is checked lazily on read instead of with a timer per entry, so
/// there is no background task to leak. A `set` on a live key replaces the
/// entry and its deadline in a single insert.
pub struct Cache<T> {
    entries: DashMap<String, CacheEntry<T>>,
}

impl<T: Clone> Cache<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn set(&self, key: &str, value: T, ttl_ms: i64) {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl_ms));
    }

    pub fn get(&self, key: &str) -> Option<T> {
        {
            // the read guard must be released before removing the entry
            let entry = self.entries.get(key)?;
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove(key);
        None
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

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

impl<T: Clone> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    #[test]
    fn get_returns_value_before_expiry() {
        let cache = Cache::new();
        cache.set("k", 42, CACHE_TTL_SHORT);
        assert!(cache.has("k"));
        assert_eq!(cache.get("k"), Some(42));
    }

    #[tokio::test]
    async fn entry_expires_after_ttl() {
        let cache = Cache::new();
        cache.set("k", "v".to_string(), 30);
        sleep(Duration::from_millis(60)).await;
        assert!(!cache.has("k"));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn reset_replaces_the_deadline() {
        let cache = Cache::new();
        cache.set("k", 1, 40);
        sleep(Duration::from_millis(25)).await;
        cache.set("k", 2, 200);
        sleep(Duration::from_millis(40)).await;
        // past the first deadline but inside the second
        assert_eq!(cache.get("k"), Some(2));
    }

    #[tokio::test]
    async fn reset_with_shorter_ttl_truncates_lifetime() {
        let cache = Cache::new();
        cache.set("k", 1, 10_000);
        cache.set("k", 1, 30);
        sleep(Duration::from_millis(60)).await;
        assert!(!cache.has("k"));
    }

    #[test]
    fn delete_and_clear_remove_entries() {
        let cache = Cache::new();
        cache.set("a", 1, CACHE_TTL_MEDIUM);
        cache.set("b", 2, CACHE_TTL_MEDIUM);
        cache.delete("a");
        assert!(!cache.has("a"));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
