//! TTL cache of fetched base-interval bars.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::sources::FetchedBars;

/// A thread-safe cache of provider responses, keyed by symbol, base
/// interval and lookback.
pub struct BarCache {
    data: DashMap<String, CacheEntry>,
    default_ttl: Duration,
}

struct CacheEntry {
    value: Arc<FetchedBars>,
    expires_at: Instant,
}

fn cache_key(symbol: &str, base: &str, lookback: &str) -> String {
    format!("{}|{}|{}", symbol.to_uppercase(), base, lookback)
}

fn symbol_prefix(symbol: &str) -> String {
    format!("{}|", symbol.to_uppercase())
}

impl BarCache {
    /// Create a new cache with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            default_ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get unexpired bars for a fetch.
    pub fn get(&self, symbol: &str, base: &str, lookback: &str) -> Option<Arc<FetchedBars>> {
        let key = cache_key(symbol, base, lookback);
        let entry = self.data.get(&key)?;
        if entry.expires_at > Instant::now() {
            Some(Arc::clone(&entry.value))
        } else {
            drop(entry);
            self.data.remove(&key);
            None
        }
    }

    /// Store bars with the default TTL.
    pub fn insert(
        &self,
        symbol: &str,
        base: &str,
        lookback: &str,
        bars: FetchedBars,
    ) -> Arc<FetchedBars> {
        self.insert_with_ttl(symbol, base, lookback, bars, self.default_ttl)
    }

    /// Store bars with a custom TTL.
    pub fn insert_with_ttl(
        &self,
        symbol: &str,
        base: &str,
        lookback: &str,
        bars: FetchedBars,
        ttl: Duration,
    ) -> Arc<FetchedBars> {
        let value = Arc::new(bars);
        self.data.insert(
            cache_key(symbol, base, lookback),
            CacheEntry {
                value: Arc::clone(&value),
                expires_at: Instant::now() + ttl,
            },
        );
        value
    }

    /// Drop every entry for `symbol`. Returns the number removed.
    pub fn invalidate_symbol(&self, symbol: &str) -> usize {
        let prefix = symbol_prefix(symbol);
        let before = self.data.len();
        self.data.retain(|key, _| !key.starts_with(&prefix));
        before.saturating_sub(self.data.len())
    }

    /// Clear all entries. Returns the number removed.
    pub fn clear(&self) -> usize {
        let removed = self.data.len();
        self.data.clear();
        removed
    }

    /// Remove all expired entries.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries (including expired).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn fetched(close: f64) -> FetchedBars {
        FetchedBars {
            bars: vec![Bar::new(0, close, close, close, close, 1.0)],
            utc_offset_secs: 0,
            timezone: None,
        }
    }

    #[test]
    fn test_cache_basic() {
        let cache = BarCache::new(Duration::from_secs(60));
        cache.insert("AAPL", "1d", "5y", fetched(1.0));
        let hit = cache.get("AAPL", "1d", "5y").unwrap();
        assert_eq!(hit.bars[0].close, 1.0);
        assert!(cache.get("AAPL", "1h", "730d").is_none());
        assert!(cache.get("MSFT", "1d", "5y").is_none());
    }

    #[test]
    fn test_cache_symbol_case_insensitive() {
        let cache = BarCache::new(Duration::from_secs(60));
        cache.insert("aapl", "1d", "5y", fetched(1.0));
        assert!(cache.get("AAPL", "1d", "5y").is_some());
    }

    #[test]
    fn test_cache_expiration() {
        let cache = BarCache::new(Duration::from_millis(10));
        cache.insert("AAPL", "1d", "5y", fetched(1.0));
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get("AAPL", "1d", "5y").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_custom_ttl() {
        let cache = BarCache::new(Duration::from_secs(60));
        cache.insert_with_ttl("A", "1d", "5y", fetched(1.0), Duration::from_millis(10));
        cache.insert_with_ttl("B", "1d", "5y", fetched(2.0), Duration::from_secs(60));

        std::thread::sleep(Duration::from_millis(20));
        cache.cleanup();

        assert_eq!(cache.len(), 1);
        assert!(cache.get("B", "1d", "5y").is_some());
    }

    #[test]
    fn test_invalidate_symbol() {
        let cache = BarCache::new(Duration::from_secs(60));
        cache.insert("AAPL", "1d", "5y", fetched(1.0));
        cache.insert("AAPL", "1h", "730d", fetched(1.0));
        cache.insert("AAP", "1d", "5y", fetched(1.0));

        assert_eq!(cache.invalidate_symbol("aapl"), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("AAP", "1d", "5y").is_some());
    }

    #[test]
    fn test_cache_clear() {
        let cache = BarCache::new(Duration::from_secs(60));
        cache.insert("A", "1d", "5y", fetched(1.0));
        cache.insert("B", "1d", "5y", fetched(1.0));
        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_overwrite() {
        let cache = BarCache::new(Duration::from_secs(60));
        cache.insert("A", "1d", "5y", fetched(1.0));
        cache.insert("A", "1d", "5y", fetched(2.0));
        assert_eq!(cache.get("A", "1d", "5y").unwrap().bars[0].close, 2.0);
        assert_eq!(cache.len(), 1);
    }
}
