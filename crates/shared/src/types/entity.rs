//! Entity-kind classification for records referenced across the workspace.

use serde::{Deserialize, Serialize};

/// The kind of ledger entity a finding or route refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A debit (sale) record.
    Debit,
    /// A credit (payment) record.
    Credit,
    /// An expense record.
    Expense,
    /// A counterparty account.
    Account,
    /// An inventory item.
    Item,
}

impl EntityKind {
    /// Returns true for the two transaction kinds that move an account
    /// balance.
    #[must_use]
    pub fn is_transaction(&self) -> bool {
        matches!(self, Self::Debit | Self::Credit)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
            Self::Expense => write!(f, "expense"),
            Self::Account => write!(f, "account"),
            Self::Item => write!(f, "item"),
        }
    }
}
