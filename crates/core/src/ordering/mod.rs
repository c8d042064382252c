//! Deterministic same-day settlement ordering.
//!
//! Produces the order transactions are displayed and settled in. The
//! rule here depends on the balance entering each day and is a different
//! rule from the segmenter's always-credits-first tie-break; the two
//! serve different purposes and must stay separate.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{AccountEntry, EntryKind};

/// One settled transaction with the balance after applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledEntry {
    /// The transaction, in settlement position.
    pub entry: AccountEntry,
    /// Running balance after this transaction.
    pub balance_after: Decimal,
}

/// Resolves one account's transactions into settlement order.
///
/// Days are processed ascending. Within a day, the balance entering the
/// day decides the order: negative (the account is ahead/overpaid) means
/// credits apply before debits, so the negative balance is not amplified;
/// otherwise debits apply before credits. The running balance advances
/// transaction by transaction in the chosen order.
#[must_use]
pub fn settlement_order(entries: &[AccountEntry]) -> Vec<SettledEntry> {
    let mut by_day: BTreeMap<NaiveDate, Vec<AccountEntry>> = BTreeMap::new();
    for entry in entries {
        by_day.entry(entry.date).or_default().push(entry.clone());
    }

    let mut settled = Vec::with_capacity(entries.len());
    let mut balance = Decimal::ZERO;

    for day_entries in by_day.into_values() {
        let credits_first = balance.is_sign_negative() && !balance.is_zero();
        let first_kind = if credits_first {
            EntryKind::Credit
        } else {
            EntryKind::Debit
        };

        let (leading, trailing): (Vec<_>, Vec<_>) =
            day_entries.into_iter().partition(|e| e.kind == first_kind);

        for entry in leading.into_iter().chain(trailing) {
            balance += entry.signed_amount();
            settled.push(SettledEntry {
                entry,
                balance_after: balance,
            });
        }
    }

    settled
}
