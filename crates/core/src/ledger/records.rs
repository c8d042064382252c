//! Ledger record types.
//!
//! Records are owned by an external collaborator and reach the core as
//! immutable snapshots. Dates stay raw strings here: the reconciliation
//! engine must be able to surface the unparseable ones, so parsing
//! happens at point of use (see [`crate::ledger::account_entries`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, CreditId, DebitId, ExpenseId, ItemId};

/// What a debit record was sold against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ItemRef {
    /// A catalog item reference.
    Item(ItemId),
    /// The custom-amount sentinel: no catalog item, the debit must carry
    /// a free-text reason and a positive amount instead.
    Custom,
}

impl ItemRef {
    /// Returns the referenced item id, if any.
    #[must_use]
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            Self::Item(id) => Some(id),
            Self::Custom => None,
        }
    }
}

/// A debit (sale): increases the amount the account owes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitRecord {
    /// Unique identifier.
    pub id: DebitId,
    /// The account that owes this amount.
    pub account_id: AccountId,
    /// The catalog item sold, or the custom-amount sentinel.
    pub item: ItemRef,
    /// Free-text reason, required for custom-amount debits.
    pub reason: Option<String>,
    /// The amount owed.
    pub amount: Decimal,
    /// Raw date string as recorded by the collaborator.
    pub date: String,
    /// Free-form metadata carried through untouched.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// A credit (payment): decreases the amount the account owes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRecord {
    /// Unique identifier.
    pub id: CreditId,
    /// The account that paid.
    pub account_id: AccountId,
    /// The amount paid.
    pub amount: Decimal,
    /// Raw date string as recorded by the collaborator.
    pub date: String,
    /// Free-form metadata carried through untouched.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// A business expense, outside any account's running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier.
    pub id: ExpenseId,
    /// The amount spent.
    pub amount: Decimal,
    /// Raw date string as recorded by the collaborator.
    pub date: String,
    /// Expense category label.
    pub category: String,
    /// Free-form metadata carried through untouched.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// A counterparty account whose running balance is tracked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Pricing tier label assigned to this account.
    pub pricing_tier: String,
}

/// An inventory item that debits may reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Units currently in stock.
    pub stock: i64,
}
