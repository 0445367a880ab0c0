use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;
use tokio::sync::Mutex;

use super::{CacheResult, CacheStats, CacheStore, Generation};

/// Entry bound of [`MemoryCache::new`].
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Process-local cache bounded by entry count. Cloning shares the same storage.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<String, Entry>,
    /// Held while invalidating and while storing conditionally.
    generation: Arc<Mutex<u64>>,
    counters: Arc<Counters>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            entries,
            generation: Arc::new(Mutex::new(0)),
            counters: Arc::new(Counters::default()),
        }
    }

    fn entry(value: String, ttl: Duration) -> Entry {
        Entry { value, ttl }
    }
}

impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let value = self.entries.get(key).await.map(|e| e.value);

        let counter = if value.is_some() {
            &self.counters.hits
        } else {
            &self.counters.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);

        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        self.entries
            .insert(key.to_string(), Self::entry(value, ttl))
            .await;
        Ok(())
    }

    async fn generation(&self) -> CacheResult<Generation> {
        Ok(Generation(*self.generation.lock().await))
    }

    async fn set_if_current(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
        since: Generation,
    ) -> CacheResult<bool> {
        let current = self.generation.lock().await;
        if *current != since.0 {
            tracing::debug!(key, "Dropped cache fill that raced an invalidation");
            return Ok(false);
        }

        self.entries
            .insert(key.to_string(), Self::entry(value, ttl))
            .await;
        Ok(true)
    }

    async fn invalidate(&self, key: &str) -> CacheResult<bool> {
        let mut current = self.generation.lock().await;
        *current = current.wrapping_add(1);
        Ok(self.entries.remove(key).await.is_some())
    }

    async fn invalidate_all(&self) -> CacheResult<u64> {
        let mut current = self.generation.lock().await;
        *current = current.wrapping_add(1);

        self.entries.run_pending_tasks().await;
        let removed = self.entries.entry_count();
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        Ok(removed)
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        self.entries.run_pending_tasks().await;
        Ok(CacheStats {
            entries: self.entries.entry_count(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        })
    }
}

// ============================================================================
// Disabled cache
// ============================================================================

/// Always misses; writes and invalidations are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl CacheStore for NoCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn generation(&self) -> CacheResult<Generation> {
        Ok(Generation(0))
    }

    async fn set_if_current(
        &self,
        _key: &str,
        _value: String,
        _ttl: Duration,
        _since: Generation,
    ) -> CacheResult<bool> {
        Ok(false)
    }

    async fn invalidate(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn invalidate_all(&self) -> CacheResult<u64> {
        Ok(0)
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        Ok(CacheStats::default())
    }
}

// ============================================================================
// Runtime selection
// ============================================================================

/// Cache chosen at startup from configuration.
#[derive(Clone)]
pub enum SelectedCache {
    Memory(MemoryCache),
    Disabled(NoCache),
}

impl SelectedCache {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::Memory(MemoryCache::new())
        } else {
            Self::Disabled(NoCache)
        }
    }
}

impl CacheStore for SelectedCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match self {
            Self::Memory(c) => c.get(key).await,
            Self::Disabled(c) => c.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        match self {
            Self::Memory(c) => c.set(key, value, ttl).await,
            Self::Disabled(c) => c.set(key, value, ttl).await,
        }
    }

    async fn generation(&self) -> CacheResult<Generation> {
        match self {
            Self::Memory(c) => c.generation().await,
            Self::Disabled(c) => c.generation().await,
        }
    }

    async fn set_if_current(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
        since: Generation,
    ) -> CacheResult<bool> {
        match self {
            Self::Memory(c) => c.set_if_current(key, value, ttl, since).await,
            Self::Disabled(c) => c.set_if_current(key, value, ttl, since).await,
        }
    }

    async fn invalidate(&self, key: &str) -> CacheResult<bool> {
        match self {
            Self::Memory(c) => c.invalidate(key).await,
            Self::Disabled(c) => c.invalidate(key).await,
        }
    }

    async fn invalidate_all(&self) -> CacheResult<u64> {
        match self {
            Self::Memory(c) => c.invalidate_all().await,
            Self::Disabled(c) => c.invalidate_all().await,
        }
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        match self {
            Self::Memory(c) => c.stats().await,
            Self::Disabled(c) => c.stats().await,
        }
    }
}
