//! Ledger records and the read-only ledger collaborator.
//!
//! The core never owns storage: every component takes a [`LedgerView`]
//! and reads an instantaneous snapshot of the debit/credit/expense/
//! account/item collections through it.

mod entries;
mod records;
mod view;

pub use entries::{AccountEntry, EntryKind, account_entries};
pub use records::{Account, CreditRecord, DebitRecord, ExpenseRecord, Item, ItemRef};
pub use view::{InMemoryLedger, LedgerView};
