//! Key-value cache with per-entry TTL
//!
//! Values are serialized response bodies. A miss (`None`) is always distinct
//! from a cached value, including `"null"` and `"[]"`.
//!
//! [`MemoryCache`] is a bounded in-process store; expired entries are evicted
//! by the store itself. [`NoCache`] never stores anything and is used when
//! caching is switched off.
//!
//! Read-through callers take a [`Generation`] before loading from the source
//! and store with [`CacheStore::set_if_current`], so a load that raced with an
//! invalidation is dropped instead of cached.

mod memory;

use std::time::Duration;

use thiserror::Error;

pub use memory::{MemoryCache, NoCache, SelectedCache};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Hit rate as a percentage. `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Invalidation counter observed at some point in time.
///
/// Advances on every `invalidate` / `invalidate_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[trait_variant::make(CacheStore: Send)]
pub trait LocalCacheStore {
    /// Cached value, or `None` when absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()>;

    async fn generation(&self) -> CacheResult<Generation>;

    /// Store `value` only if nothing was invalidated since `since`.
    /// Returns whether the value was stored.
    async fn set_if_current(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
        since: Generation,
    ) -> CacheResult<bool>;

    /// Remove one key. Returns whether it was present.
    async fn invalidate(&self, key: &str) -> CacheResult<bool>;

    /// Remove every key. Returns the number removed.
    async fn invalidate_all(&self) -> CacheResult<u64>;

    async fn stats(&self) -> CacheResult<CacheStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);

        let stats = CacheStats {
            entries: 0,
            hits: 3,
            misses: 1,
        };
        assert_eq!(stats.hit_rate(), 75.0);
    }

    #[test]
    fn test_generations_are_ordered() {
        assert!(Generation(1) > Generation(0));
    }
}
