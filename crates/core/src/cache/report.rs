//! Report dataset cache.

use std::time::Duration;

use super::store::{CacheStats, DerivedCache};
use super::tag::{CacheTag, ReportKind};

/// Default capacity: the report key space is a short list.
const DEFAULT_CAPACITY: usize = 64;

/// Default time-to-live (1 hour); reports are dearer to recompute than
/// balances, so entries live longer.
const DEFAULT_TTL_SECS: u64 = 3600;

/// Cache of report datasets keyed by report kind plus filter parameters.
///
/// Any ledger mutation that could change a report family's output must
/// invalidate that family (routed through
/// [`crate::cache::LedgerCaches`]).
#[derive(Clone)]
pub struct ReportCache {
    cache: DerivedCache<serde_json::Value>,
}

impl ReportCache {
    /// Creates a report cache with default capacity and TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CAPACITY, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    /// Creates a report cache with explicit capacity and TTL.
    #[must_use]
    pub fn with_config(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: DerivedCache::new(capacity, ttl),
        }
    }

    fn key(kind: ReportKind, params: &str) -> String {
        format!("{kind}:{params}")
    }

    /// Returns the cached dataset for a report, if fresh.
    #[must_use]
    pub fn get(&self, kind: ReportKind, params: &str) -> Option<serde_json::Value> {
        self.cache.get(&Self::key(kind, params))
    }

    /// Returns the cached dataset or computes and caches it.
    pub async fn get_or_compute<F, Fut>(
        &self,
        kind: ReportKind,
        params: &str,
        compute: F,
    ) -> serde_json::Value
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = serde_json::Value>,
    {
        self.cache
            .get_or_compute(
                &Self::key(kind, params),
                vec![CacheTag::ReportFamily(kind)],
                compute,
            )
            .await
    }

    /// Drops every cached dataset in one report family.
    pub fn invalidate_family(&self, kind: ReportKind) {
        self.cache.invalidate_tag(&CacheTag::ReportFamily(kind));
    }

    /// Drops everything and resets counters.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Spawns the periodic background sweep for this cache.
    #[must_use]
    pub fn spawn_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        self.cache.spawn_sweeper(every)
    }

    /// Observability counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}
