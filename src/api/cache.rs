// src/api/cache.rs
//! Response caches for raw vendor pages.
//!
//! A cache maps canonical request keys to raw pages and guarantees
//! single-flight execution: for one key, at most one fetch is in flight
//! at a time, and concurrent callers wait for and reuse its result.
//! Identical in-flight requests therefore consume metered quota once.
//!
//! Two real implementations are provided. [`MemoryCache`] is the
//! default for a running service; [`ReplayCache`] persists raw pages as
//! JSON files for deterministic offline replay. [`NoopCache`] opts out
//! of caching while keeping the call shape.

use super::page::RawPage;
use super::request::RequestDescriptor;
use super::PageFetcher;
use crate::error::Error;
use async_trait::async_trait;
use dashmap::DashMap;
use lru::LruCache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Memoizing, single-flight store for raw pages.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Returns the cached page for `key`, or executes `fetcher` exactly
    /// once, stores the result and returns it.
    async fn get_or_fetch(
        &self,
        key: &str,
        descriptor: &RequestDescriptor,
        fetcher: &dyn PageFetcher,
    ) -> Result<RawPage, Error>;
}

// ---------------------------------------------------------------------------
// Single-flight latches
// ---------------------------------------------------------------------------

/// Per-key fetch latches shared by the cache implementations.
///
/// Locking a key's latch serializes fetch attempts for that key; the
/// loser of the race re-checks the store under the latch and finds the
/// winner's result instead of fetching again.
#[derive(Default)]
struct FlightTable {
    latches: DashMap<String, Arc<tokio::sync::Mutex<()>>>,
}

impl FlightTable {
    fn latch_for(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.latches
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    fn release(&self, key: &str) {
        self.latches.remove(key);
    }
}

// ---------------------------------------------------------------------------
// In-memory cache
// ---------------------------------------------------------------------------

/// LRU-bounded in-memory page cache with single-flight fetches.
pub struct MemoryCache {
    entries: parking_lot::Mutex<LruCache<String, RawPage>>,
    flights: FlightTable,
}

impl MemoryCache {
    /// Creates a cache retaining up to `capacity` raw pages.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: parking_lot::Mutex::new(LruCache::new(capacity)),
            flights: FlightTable::default(),
        }
    }

    fn lookup(&self, key: &str) -> Option<RawPage> {
        let mut entries = self.entries.lock();
        entries.get(key).cloned()
    }

    fn store(&self, key: &str, page: &RawPage) {
        let mut entries = self.entries.lock();
        entries.put(key.to_string(), page.clone());
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get_or_fetch(
        &self,
        key: &str,
        descriptor: &RequestDescriptor,
        fetcher: &dyn PageFetcher,
    ) -> Result<RawPage, Error> {
        if let Some(page) = self.lookup(key) {
            log::debug!("cache hit: {}", key);
            return Ok(page);
        }

        let latch = self.flights.latch_for(key);
        let guard = latch.lock().await;

        // The race winner may have populated the entry while we waited.
        if let Some(page) = self.lookup(key) {
            log::debug!("cache hit after flight: {}", key);
            drop(guard);
            self.flights.release(key);
            return Ok(page);
        }

        log::debug!("cache miss: {}", key);
        let result = fetcher.fetch_page(descriptor).await;
        if let Ok(page) = &result {
            self.store(key, page);
        }

        drop(guard);
        self.flights.release(key);
        result
    }
}

// ---------------------------------------------------------------------------
// Capture/replay disk cache
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
struct ReplayEntry {
    page: RawPage,
    cached_at: u64,
}

/// TTL-based file cache persisting raw pages as JSON.
///
/// Each page is written under a hash of its canonical key, so a
/// captured session can be replayed offline with identical results.
/// Disk operations are best-effort: read/write failures are silently
/// ignored and fall through to a fresh fetch.
pub struct ReplayCache {
    cache_dir: PathBuf,
    ttl_secs: u64,
    flights: FlightTable,
}

impl ReplayCache {
    /// Creates a replay cache in `cache_dir`, purging expired entries.
    pub async fn new(cache_dir: PathBuf, ttl_secs: u64) -> Result<Self, Error> {
        tokio::fs::create_dir_all(&cache_dir).await?;
        let cache = Self {
            cache_dir,
            ttl_secs,
            flights: FlightTable::default(),
        };
        cache.purge_expired().await;
        Ok(cache)
    }

    fn key_to_path(&self, key: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.cache_dir.join(format!("{:016x}.json", hasher.finish()))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    async fn read_entry(&self, key: &str) -> Option<RawPage> {
        let path = self.key_to_path(key);
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        let entry: ReplayEntry = serde_json::from_str(&content).ok()?;
        if Self::now_secs().saturating_sub(entry.cached_at) > self.ttl_secs {
            let _ = tokio::fs::remove_file(&path).await;
            return None;
        }
        Some(entry.page)
    }

    async fn write_entry(&self, key: &str, page: &RawPage) {
        let entry = ReplayEntry {
            page: page.clone(),
            cached_at: Self::now_secs(),
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            let _ = tokio::fs::write(self.key_to_path(key), json).await;
        }
    }

    /// Removes all expired entries from disk.
    ///
    /// Called on construction to bound disk growth. Errors never block
    /// operation.
    async fn purge_expired(&self) {
        let now = Self::now_secs();
        let mut dir = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(dir) => dir,
            Err(_) => return,
        };

        while let Ok(Some(entry)) = dir.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Ok(content) = tokio::fs::read_to_string(&path).await {
                if let Ok(cached) = serde_json::from_str::<ReplayEntry>(&content) {
                    if now.saturating_sub(cached.cached_at) > self.ttl_secs {
                        let _ = tokio::fs::remove_file(&path).await;
                    }
                }
            }
        }
    }
}

#[async_trait]
impl ResponseCache for ReplayCache {
    async fn get_or_fetch(
        &self,
        key: &str,
        descriptor: &RequestDescriptor,
        fetcher: &dyn PageFetcher,
    ) -> Result<RawPage, Error> {
        if let Some(page) = self.read_entry(key).await {
            log::debug!("replay hit: {}", key);
            return Ok(page);
        }

        let latch = self.flights.latch_for(key);
        let guard = latch.lock().await;

        if let Some(page) = self.read_entry(key).await {
            log::debug!("replay hit after flight: {}", key);
            drop(guard);
            self.flights.release(key);
            return Ok(page);
        }

        log::debug!("replay miss: {}", key);
        let result = fetcher.fetch_page(descriptor).await;
        if let Ok(page) = &result {
            self.write_entry(key, page).await;
        }

        drop(guard);
        self.flights.release(key);
        result
    }
}

// ---------------------------------------------------------------------------
// No-op cache
// ---------------------------------------------------------------------------

/// Always fetches. Every call still counts against quota; use only when
/// staleness is unacceptable.
pub struct NoopCache;

#[async_trait]
impl ResponseCache for NoopCache {
    async fn get_or_fetch(
        &self,
        _key: &str,
        descriptor: &RequestDescriptor,
        fetcher: &dyn PageFetcher,
    ) -> Result<RawPage, Error> {
        fetcher.fetch_page(descriptor).await
    }
}
