//! Generic expiring, explicitly-invalidated memoization store.
//!
//! Entries expire after a per-entry TTL, checked lazily on every read;
//! a background sweep ([`DerivedCache::spawn_sweeper`]) additionally
//! bounds memory from entries nobody re-reads, but reads never rely on
//! it having run. At capacity the oldest-inserted live entry is evicted
//! (strict insertion order, not LRU).
//!
//! The store tracks no dependencies: every mutation path that could
//! affect a cached value must invalidate it explicitly (see
//! [`crate::cache::LedgerCaches`]). A miss is normal control flow, never
//! an error.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::tag::CacheTag;

/// Hit/miss counters and current size, for observability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Reads answered from the store.
    pub hits: u64,
    /// Reads that found nothing (absent or expired).
    pub misses: u64,
    /// Live entries, including not-yet-purged expired ones.
    pub entries: usize,
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
    access_count: u64,
    tags: Vec<CacheTag>,
    seq: u64,
}

impl<V> CacheEntry<V> {
    /// An entry is valid iff `now - inserted_at <= ttl`.
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) > self.ttl
    }
}

struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    // (seq, key) pairs in insertion order. Re-sets and removals leave
    // stale pairs behind; eviction skips them and compaction drops them
    // once they outnumber the live entries, keeping the queue
    // proportional to the map.
    insertion_order: VecDeque<(u64, String)>,
    next_seq: u64,
    hits: u64,
    misses: u64,
}

impl<V> Inner<V> {
    fn evict_oldest(&mut self) {
        while let Some((seq, key)) = self.insertion_order.pop_front() {
            let live = self.entries.get(&key).is_some_and(|e| e.seq == seq);
            if live {
                self.entries.remove(&key);
                tracing::debug!(%key, "evicted oldest-inserted cache entry");
                return;
            }
        }
    }

    /// Retains only the pairs that still name a live entry.
    fn compact_insertion_order(&mut self) {
        let entries = &self.entries;
        self.insertion_order
            .retain(|(seq, key)| entries.get(key).is_some_and(|e| e.seq == *seq));
    }
}

/// Generic key-value memoization store with TTL expiry and typed-tag
/// invalidation. Cheap to clone; clones share the same store.
pub struct DerivedCache<V> {
    inner: Arc<Mutex<Inner<V>>>,
    capacity: usize,
    default_ttl: Duration,
}

impl<V> Clone for DerivedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
            default_ttl: self.default_ttl,
        }
    }
}

impl<V: Clone> DerivedCache<V> {
    /// Creates a store holding at most `capacity` entries, expiring each
    /// after `default_ttl` unless overridden per entry.
    #[must_use]
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
                next_seq: 0,
                hits: 0,
                misses: 0,
            })),
            capacity: capacity.max(1),
            default_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // Execution is cooperative; a poisoned lock only means a caller
        // panicked mid-operation, so recover the guard.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compacts the insertion queue once stale pairs dominate it. Every
    /// removal path that shrinks the map below capacity must call this,
    /// or set/invalidate loops grow the queue without bound.
    fn maybe_compact(&self, inner: &mut Inner<V>) {
        let threshold = inner.entries.len().saturating_mul(2).max(self.capacity);
        if inner.insertion_order.len() > threshold {
            inner.compact_insertion_order();
        }
    }

    /// Stores a value under the default TTL.
    pub fn set(&self, key: impl Into<String>, value: V, tags: Vec<CacheTag>) {
        self.set_with_ttl(key, value, self.default_ttl, tags);
    }

    /// Stores a value with an explicit TTL, evicting the oldest-inserted
    /// entry if the store is at capacity.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration, tags: Vec<CacheTag>) {
        let key = key.into();
        let mut inner = self.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            inner.evict_oldest();
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.insertion_order.push_back((seq, key.clone()));
        inner.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl,
                access_count: 0,
                tags,
                seq,
            },
        );
    }

    /// Returns the value if present and unexpired.
    ///
    /// An expired entry is purged on the spot and counted as a miss
    /// (lazy expiration).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.lock();
        let now = Instant::now();

        let expired = inner.entries.get(key).map(|entry| entry.is_expired(now));
        match expired {
            Some(true) => {
                inner.entries.remove(key);
                inner.misses += 1;
                tracing::trace!(%key, "purged expired cache entry on read");
                self.maybe_compact(&mut inner);
                None
            }
            Some(false) => {
                let value = inner.entries.get_mut(key).map(|entry| {
                    entry.access_count += 1;
                    entry.value.clone()
                });
                inner.hits += 1;
                value
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Returns a cache hit, or computes, stores and returns the value.
    ///
    /// The compute function may suspend. Concurrent identical in-flight
    /// computations are not de-duplicated: both run and the later store
    /// wins. This is a documented simplification, not a defect.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, tags: Vec<CacheTag>, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute().await;
        self.set(key, value.clone(), tags);
        value
    }

    /// Deletes one exact key.
    pub fn invalidate_key(&self, key: &str) {
        let mut inner = self.lock();
        if inner.entries.remove(key).is_some() {
            tracing::debug!(%key, "invalidated cache entry");
        }
        self.maybe_compact(&mut inner);
    }

    /// Deletes every entry carrying the tag.
    pub fn invalidate_tag(&self, tag: &CacheTag) {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.tags.contains(tag));
        let removed = before - inner.entries.len();
        if removed > 0 {
            tracing::debug!(?tag, removed, "invalidated cache entries by tag");
        }
        self.maybe_compact(&mut inner);
    }

    /// Deletes every entry whose key matches the predicate.
    pub fn invalidate_matching<P: Fn(&str) -> bool>(&self, predicate: P) {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !predicate(key));
        let removed = before - inner.entries.len();
        if removed > 0 {
            tracing::debug!(removed, "invalidated cache entries by predicate");
        }
        self.maybe_compact(&mut inner);
    }

    /// Drops everything and resets the hit/miss counters.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.insertion_order.clear();
        inner.hits = 0;
        inner.misses = 0;
    }

    /// Purges expired entries without being read, returning how many
    /// were removed. Reads never depend on this having run.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.lock();
        let now = Instant::now();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(now));
        self.maybe_compact(&mut inner);
        before - inner.entries.len()
    }

    /// Number of stored entries, including not-yet-purged expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counters and size.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.entries.len(),
        }
    }
}

impl<V: Clone + Send + 'static> DerivedCache<V> {
    /// Spawns the periodic background sweep as an independent task.
    ///
    /// The sweep never blocks callers; abort the handle to stop it.
    #[must_use]
    pub fn spawn_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    tracing::trace!(purged, "cache sweep purged expired entries");
                }
            }
        })
    }
}
