//! TTL-aware answer cache shared by both resolvers.
//!
//! Every entry carries its own absolute expiry; there is no cache-wide
//! default TTL. Expired entries are evicted lazily on access, with
//! `purge_expired` available for a background sweep.

pub mod key;

pub use key::CacheKey;

use dashmap::DashMap;
use delver_domain::{DnsQuery, DnsRecord};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Default)]
struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
}

/// Snapshot for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    records: Arc<Vec<DnsRecord>>,
    expires_at: Instant,
}

impl CacheEntry {
    #[inline]
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Concurrent TTL cache. All read/modify operations go through the
/// sharded map, so racing workers never observe a torn entry; the
/// first-writer-wins discipline of the fan-out race is enforced by the
/// caller holding the single insert.
pub struct DnsCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    max_entries: usize,
    metrics: CacheMetrics,
}

impl DnsCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::with_capacity_and_hasher(max_entries, FxBuildHasher::default()),
            max_entries,
            metrics: CacheMetrics::default(),
        }
    }

    /// Returns the cached answer while its own TTL holds; an expired
    /// entry is removed and reported as absent.
    pub fn get(&self, query: &DnsQuery) -> Option<Arc<Vec<DnsRecord>>> {
        let key = CacheKey::from(query);
        let now = Instant::now();

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired(now) {
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                return Some(Arc::clone(&entry.records));
            }
        }
        // Re-check under the entry lock so a concurrent refresh is not lost.
        self.entries
            .remove_if(&key, |_, entry| entry.is_expired(now));
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Agrees with `get` on expiry, without counting a hit or a miss.
    pub fn contains(&self, query: &DnsQuery) -> bool {
        let key = CacheKey::from(query);
        let now = Instant::now();
        self.entries
            .get(&key)
            .map(|entry| !entry.is_expired(now))
            .unwrap_or(false)
    }

    /// Inserts or refreshes an answer with its own TTL, independent of
    /// every other entry. At capacity the entry nearest to expiry is
    /// evicted first.
    pub fn insert(&self, query: &DnsQuery, records: Arc<Vec<DnsRecord>>, ttl_secs: u32) {
        let key = CacheKey::from(query);

        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.evict_nearest_to_expiry();
        }

        let entry = CacheEntry {
            records,
            expires_at: Instant::now() + Duration::from_secs(u64::from(ttl_secs)),
        };
        debug!(domain = %key.domain, record_type = %key.record_type, ttl_secs, "Cache insert");
        self.entries.insert(key, entry);
        self.metrics.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Drops every entry whose expiry has passed. Intended for a periodic
    /// background sweep; lazy eviction on access keeps readers correct
    /// without it.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!(purged, "Cache sweep removed expired entries");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.metrics.hits.load(Ordering::Relaxed),
            misses: self.metrics.misses.load(Ordering::Relaxed),
            inserts: self.metrics.inserts.load(Ordering::Relaxed),
            evictions: self.metrics.evictions.load(Ordering::Relaxed),
        }
    }

    fn evict_nearest_to_expiry(&self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = victim {
            debug!(domain = %key.domain, record_type = %key.record_type, "Cache full, evicting nearest-to-expiry entry");
            self.entries.remove(&key);
            self.metrics.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }
}
