//! Structured invalidation tags.
//!
//! Entries carry typed dependency tags instead of relying on key-string
//! pattern matching; `invalidate_tag` is a typed lookup with the same
//! externally observable behavior.

use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

/// Report families cached by the report cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Debit (sales) reports.
    Sales,
    /// Credit (payments) reports.
    Payments,
    /// Expense reports.
    Expenses,
    /// Net profit reports.
    Profit,
    /// Inventory valuation reports.
    Inventory,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sales => write!(f, "sales"),
            Self::Payments => write!(f, "payments"),
            Self::Expenses => write!(f, "expenses"),
            Self::Profit => write!(f, "profit"),
            Self::Inventory => write!(f, "inventory"),
        }
    }
}

/// A dependency tag attached to a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheTag {
    /// The entry depends on one account's debits/credits.
    Account(AccountId),
    /// The entry belongs to a report family.
    ReportFamily(ReportKind),
}
