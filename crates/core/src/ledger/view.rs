//! Read-only ledger collaborator.

use tally_shared::types::{AccountId, CreditId, DebitId, ItemId};

use super::records::{Account, CreditRecord, DebitRecord, ExpenseRecord, Item};

/// Read access to the ledger collections.
///
/// Implementations expose an instantaneous snapshot of the collaborator's
/// storage; the core never assumes a backend and never mutates through
/// this trait. Execution is cooperative, so a snapshot stays consistent
/// for the duration of any one computation.
pub trait LedgerView {
    /// All debit records, in collaborator order.
    fn debits(&self) -> &[DebitRecord];

    /// All credit records, in collaborator order.
    fn credits(&self) -> &[CreditRecord];

    /// All expense records, in collaborator order.
    fn expenses(&self) -> &[ExpenseRecord];

    /// All counterparty accounts.
    fn accounts(&self) -> &[Account];

    /// All inventory items.
    fn items(&self) -> &[Item];

    /// Looks up an account by id.
    fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts().iter().find(|a| &a.id == id)
    }

    /// Looks up an item by id.
    fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items().iter().find(|i| &i.id == id)
    }

    /// Looks up a debit by id.
    fn debit(&self, id: &DebitId) -> Option<&DebitRecord> {
        self.debits().iter().find(|d| &d.id == id)
    }

    /// Looks up a credit by id.
    fn credit(&self, id: &CreditId) -> Option<&CreditRecord> {
        self.credits().iter().find(|c| &c.id == id)
    }
}

/// In-memory [`LedgerView`] backed by plain vectors.
///
/// Used by tests and by embedders that already hold the full dataset.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    /// Debit records.
    pub debits: Vec<DebitRecord>,
    /// Credit records.
    pub credits: Vec<CreditRecord>,
    /// Expense records.
    pub expenses: Vec<ExpenseRecord>,
    /// Counterparty accounts.
    pub accounts: Vec<Account>,
    /// Inventory items.
    pub items: Vec<Item>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerView for InMemoryLedger {
    fn debits(&self) -> &[DebitRecord] {
        &self.debits
    }

    fn credits(&self) -> &[CreditRecord] {
        &self.credits
    }

    fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    fn items(&self) -> &[Item] {
        &self.items
    }
}
