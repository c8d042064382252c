//! Per-account balance cache.

use std::time::Duration;

use rust_decimal::Decimal;
use tally_shared::types::AccountId;

use crate::ledger::LedgerView;

use super::store::{CacheStats, DerivedCache};
use super::tag::CacheTag;

/// Default capacity: one entry per account, and there are many accounts.
const DEFAULT_CAPACITY: usize = 4096;

/// Default time-to-live (15 minutes). Recomputation is cheap but
/// frequent, so entries can live long; correctness comes from explicit
/// invalidation, not expiry.
const DEFAULT_TTL_SECS: u64 = 900;

/// Computes an account's current balance directly from the ledger:
/// all-time `sum(debits) - sum(credits)`, independent of record dates.
#[must_use]
pub fn compute_balance<L: LedgerView + ?Sized>(ledger: &L, account_id: &AccountId) -> Decimal {
    let debit_total: Decimal = ledger
        .debits()
        .iter()
        .filter(|d| &d.account_id == account_id)
        .map(|d| d.amount)
        .sum();
    let credit_total: Decimal = ledger
        .credits()
        .iter()
        .filter(|c| &c.account_id == account_id)
        .map(|c| c.amount)
        .sum();
    debit_total - credit_total
}

/// Cache of per-account balances, keyed by account id.
///
/// Invalidated precisely: any create/edit/delete of an account's debits
/// or credits must call [`BalanceCache::invalidate_account`] (routed
/// through [`crate::cache::LedgerCaches`]) before the next read is
/// trusted.
#[derive(Clone)]
pub struct BalanceCache {
    cache: DerivedCache<Decimal>,
}

impl BalanceCache {
    /// Creates a balance cache with default capacity and TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CAPACITY, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    /// Creates a balance cache with explicit capacity and TTL.
    #[must_use]
    pub fn with_config(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: DerivedCache::new(capacity, ttl),
        }
    }

    /// Returns the cached balance, if fresh.
    #[must_use]
    pub fn get(&self, account_id: &AccountId) -> Option<Decimal> {
        self.cache.get(account_id.as_str())
    }

    /// Returns the cached balance or computes and caches it.
    pub async fn get_or_compute<F, Fut>(&self, account_id: &AccountId, compute: F) -> Decimal
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Decimal>,
    {
        self.cache
            .get_or_compute(
                account_id.as_str(),
                vec![CacheTag::Account(account_id.clone())],
                compute,
            )
            .await
    }

    /// Drops the entry for one account.
    pub fn invalidate_account(&self, account_id: &AccountId) {
        self.cache
            .invalidate_tag(&CacheTag::Account(account_id.clone()));
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

impl Default for BalanceCache {
    fn default() -> Self {
        Self::new()
    }
}
