//! Derived-value caches.
//!
//! A generic expiring store plus the two specializations the app uses:
//! per-account balances and report datasets. The caches track no
//! dependencies themselves; [`LedgerCaches`] is the single place the
//! mutation-notification contract is encoded.

mod balance;
mod report;
mod store;
mod tag;

pub use balance::{BalanceCache, compute_balance};
pub use report::ReportCache;
pub use store::{CacheStats, DerivedCache};
pub use tag::{CacheTag, ReportKind};

use tally_shared::types::AccountId;

/// The app's cache set, with the invalidation hooks every mutation path
/// must call.
///
/// Correctness contract: a create/edit/delete of a debit, credit or
/// expense must invoke the matching hook *before* any subsequent read is
/// considered valid. Skipping a hook makes reads stale; the cache cannot
/// detect that on its own.
#[derive(Clone, Default)]
pub struct LedgerCaches {
    /// Per-account balances.
    pub balances: BalanceCache,
    /// Report datasets.
    pub reports: ReportCache,
}

impl LedgerCaches {
    /// Creates both caches with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A debit for `account_id` was created, edited or deleted.
    ///
    /// Sales move the account balance, the sales and profit reports,
    /// and (through stock) the inventory valuation.
    pub fn debit_changed(&self, account_id: &AccountId) {
        self.balances.invalidate_account(account_id);
        self.reports.invalidate_family(ReportKind::Sales);
        self.reports.invalidate_family(ReportKind::Profit);
        self.reports.invalidate_family(ReportKind::Inventory);
    }

    /// A credit for `account_id` was created, edited or deleted.
    pub fn credit_changed(&self, account_id: &AccountId) {
        self.balances.invalidate_account(account_id);
        self.reports.invalidate_family(ReportKind::Payments);
    }

    /// An expense was created, edited or deleted.
    pub fn expense_changed(&self) {
        self.reports.invalidate_family(ReportKind::Expenses);
        self.reports.invalidate_family(ReportKind::Profit);
    }

    /// Drops everything in both caches.
    pub fn clear(&self) {
        self.balances.clear();
        self.reports.clear();
    }
}
