//! Per-account transaction projection.
//!
//! Debits and credits live in separate collections on the collaborator
//! side. The segmenter, aggregator and ordering resolver all want one
//! account's transactions as a single stream with parsed dates, which is
//! what [`account_entries`] produces.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::dates::parse_ledger_date;
use tally_shared::types::AccountId;

use super::view::LedgerView;

/// Whether an entry increases or decreases the amount owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A sale: increases the amount owed.
    Debit,
    /// A payment: decreases the amount owed.
    Credit,
}

/// One account transaction with its date parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// The originating record's id.
    pub id: String,
    /// Debit or credit.
    pub kind: EntryKind,
    /// The recorded amount (non-negative in well-formed data).
    pub amount: Decimal,
    /// The parsed calendar day.
    pub date: NaiveDate,
}

impl AccountEntry {
    /// The entry's contribution to the running balance: debits add,
    /// credits subtract.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Debit => self.amount,
            EntryKind::Credit => -self.amount,
        }
    }
}

/// Projects one account's debits and credits into a single entry list.
///
/// Best-effort: records whose date matches no recognized format are
/// skipped here and surfaced later by the reconciliation pass, which is
/// the single place malformed records become user-visible findings.
/// Output order follows the collaborator's collection order (debits then
/// credits); callers impose their own ordering.
#[must_use]
pub fn account_entries<L: LedgerView + ?Sized>(
    ledger: &L,
    account_id: &AccountId,
) -> Vec<AccountEntry> {
    let mut entries = Vec::new();

    for debit in ledger.debits() {
        if &debit.account_id != account_id {
            continue;
        }
        match parse_ledger_date(&debit.date) {
            Ok(date) => entries.push(AccountEntry {
                id: debit.id.to_string(),
                kind: EntryKind::Debit,
                amount: debit.amount,
                date,
            }),
            Err(_) => {
                tracing::debug!(id = %debit.id, date = %debit.date, "skipping debit with unparseable date");
            }
        }
    }

    for credit in ledger.credits() {
        if &credit.account_id != account_id {
            continue;
        }
        match parse_ledger_date(&credit.date) {
            Ok(date) => entries.push(AccountEntry {
                id: credit.id.to_string(),
                kind: EntryKind::Credit,
                amount: credit.amount,
                date,
            }),
            Err(_) => {
                tracing::debug!(id = %credit.id, date = %credit.date, "skipping credit with unparseable date");
            }
        }
    }

    entries
}
