//! Resolves an active filter into included transactions and totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::dates::parse_ledger_date;
use tally_shared::types::{AccountId, CreditId, DebitId};

use crate::cycle::segment;
use crate::ledger::{AccountEntry, EntryKind, LedgerView, account_entries};
use crate::ledger::{CreditRecord, DebitRecord};

use super::types::{DateWindow, Filter, KindMask, Selection};

/// The transactions a filter selected, with the derived balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Included debit records.
    pub debits: Vec<DebitRecord>,
    /// Included credit records.
    pub credits: Vec<CreditRecord>,
    /// `sum(debits) - sum(credits)` over the included records.
    pub balance: Decimal,
}

impl FilterOutcome {
    fn from_lists(debits: Vec<DebitRecord>, credits: Vec<CreditRecord>) -> Self {
        let debit_total: Decimal = debits.iter().map(|d| d.amount).sum();
        let credit_total: Decimal = credits.iter().map(|c| c.amount).sum();
        Self {
            debits,
            credits,
            balance: debit_total - credit_total,
        }
    }
}

/// Resolves a filter for one account against the live ledger.
///
/// Cycle selections re-resolve transactions by id so that records edited
/// or deleted after segmentation never leak stale amounts into totals.
/// Time/custom selections exclude records with unparseable dates. The
/// kind mask applies after windowing; `today` anchors the time presets.
#[must_use]
pub fn resolve<L: LedgerView + ?Sized>(
    ledger: &L,
    account_id: &AccountId,
    filter: &Filter,
    today: NaiveDate,
) -> FilterOutcome {
    let (debits, credits) = match filter.selection {
        Selection::Cycle { from_end } => cycle_records(ledger, account_id, from_end),
        Selection::Time { preset } => windowed_records(ledger, account_id, preset.window(today)),
        Selection::Custom { start, end } => windowed_records(
            ledger,
            account_id,
            DateWindow {
                start: Some(start),
                end: Some(end),
            },
        ),
    };

    FilterOutcome::from_lists(
        apply_mask(debits, filter.mask.includes_debits()),
        apply_mask(credits, filter.mask.includes_credits()),
    )
}

fn apply_mask<T>(records: Vec<T>, included: bool) -> Vec<T> {
    if included { records } else { Vec::new() }
}

/// Selects the nth-from-end cycle and re-resolves its entries by id
/// against the live ledger.
fn cycle_records<L: LedgerView + ?Sized>(
    ledger: &L,
    account_id: &AccountId,
    from_end: usize,
) -> (Vec<DebitRecord>, Vec<CreditRecord>) {
    let entries = account_entries(ledger, account_id);
    let cycles = segment(&entries);

    let Some(index) = cycles.len().checked_sub(from_end + 1) else {
        return (Vec::new(), Vec::new());
    };

    let mut debits = Vec::new();
    let mut credits = Vec::new();
    for entry in &cycles[index].entries {
        resolve_entry(ledger, entry, &mut debits, &mut credits);
    }
    (debits, credits)
}

fn resolve_entry<L: LedgerView + ?Sized>(
    ledger: &L,
    entry: &AccountEntry,
    debits: &mut Vec<DebitRecord>,
    credits: &mut Vec<CreditRecord>,
) {
    match entry.kind {
        EntryKind::Debit => {
            if let Some(record) = ledger.debit(&DebitId::from_string(entry.id.clone())) {
                debits.push(record.clone());
            }
        }
        EntryKind::Credit => {
            if let Some(record) = ledger.credit(&CreditId::from_string(entry.id.clone())) {
                credits.push(record.clone());
            }
        }
    }
}

fn windowed_records<L: LedgerView + ?Sized>(
    ledger: &L,
    account_id: &AccountId,
    window: DateWindow,
) -> (Vec<DebitRecord>, Vec<CreditRecord>) {
    let in_window = |raw: &str| {
        parse_ledger_date(raw).is_ok_and(|date| window.contains(date))
    };

    let debits = ledger
        .debits()
        .iter()
        .filter(|d| &d.account_id == account_id && in_window(&d.date))
        .cloned()
        .collect();
    let credits = ledger
        .credits()
        .iter()
        .filter(|c| &c.account_id == account_id && in_window(&c.date))
        .cloned()
        .collect();
    (debits, credits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::TimePreset;
    use crate::ledger::{InMemoryLedger, ItemRef};
    use rust_decimal_macros::dec;
    use tally_shared::types::ItemId;

    fn debit(id: &str, account: &str, amount: Decimal, date: &str) -> DebitRecord {
        DebitRecord {
            id: DebitId::from(id),
            account_id: AccountId::from(account),
            item: ItemRef::Item(ItemId::from("item-1")),
            reason: None,
            amount,
            date: date.to_string(),
            metadata: serde_json::Value::Null,
        }
    }

    fn credit(id: &str, account: &str, amount: Decimal, date: &str) -> CreditRecord {
        CreditRecord {
            id: CreditId::from(id),
            account_id: AccountId::from(account),
            amount,
            date: date.to_string(),
            metadata: serde_json::Value::Null,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    /// Two closed cycles and an open tail for one account.
    fn cycling_ledger() -> InMemoryLedger {
        InMemoryLedger {
            debits: vec![
                debit("d-1", "acct-1", dec!(100), "2026-01-02"),
                debit("d-2", "acct-1", dec!(25), "2026-02-01"),
                debit("d-3", "acct-1", dec!(60), "2026-03-10"),
            ],
            credits: vec![
                credit("c-1", "acct-1", dec!(100), "2026-01-20"),
                credit("c-2", "acct-1", dec!(25), "2026-02-14"),
            ],
            ..InMemoryLedger::default()
        }
    }

    #[test]
    fn test_default_filter_selects_current_cycle() {
        let ledger = cycling_ledger();
        let outcome = resolve(
            &ledger,
            &AccountId::from("acct-1"),
            &Filter::default(),
            today(),
        );

        // The open tail: just the unpaid 60.
        assert_eq!(outcome.debits.len(), 1);
        assert_eq!(outcome.debits[0].id, DebitId::from("d-3"));
        assert!(outcome.credits.is_empty());
        assert_eq!(outcome.balance, dec!(60));
    }

    #[test]
    fn test_nth_cycle_from_end() {
        let ledger = cycling_ledger();
        let filter = Filter {
            selection: Selection::Cycle { from_end: 2 },
            mask: KindMask::Both,
        };
        let outcome = resolve(&ledger, &AccountId::from("acct-1"), &filter, today());

        // Oldest closed cycle: 100 debit, 100 credit.
        assert_eq!(outcome.debits.len(), 1);
        assert_eq!(outcome.debits[0].id, DebitId::from("d-1"));
        assert_eq!(outcome.credits.len(), 1);
        assert_eq!(outcome.balance, Decimal::ZERO);
    }

    #[test]
    fn test_cycle_index_out_of_range_is_empty() {
        let ledger = cycling_ledger();
        let filter = Filter {
            selection: Selection::Cycle { from_end: 9 },
            mask: KindMask::Both,
        };
        let outcome = resolve(&ledger, &AccountId::from("acct-1"), &filter, today());
        assert!(outcome.debits.is_empty());
        assert!(outcome.credits.is_empty());
        assert_eq!(outcome.balance, Decimal::ZERO);
    }

    #[test]
    fn test_time_preset_window() {
        let ledger = cycling_ledger();
        let filter = Filter {
            selection: Selection::Time {
                preset: TimePreset::Last30Days,
            },
            mask: KindMask::Both,
        };
        let outcome = resolve(&ledger, &AccountId::from("acct-1"), &filter, today());

        // Only d-3 (2026-03-10) and c-2 (2026-02-14) are within 30 days
        // of 2026-03-15.
        assert_eq!(outcome.debits.len(), 1);
        assert_eq!(outcome.credits.len(), 1);
        assert_eq!(outcome.balance, dec!(35));
    }

    #[test]
    fn test_custom_window_is_inclusive() {
        let ledger = cycling_ledger();
        let filter = Filter {
            selection: Selection::Custom {
                start: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            },
            mask: KindMask::Both,
        };
        let outcome = resolve(&ledger, &AccountId::from("acct-1"), &filter, today());
        assert_eq!(outcome.debits.len(), 1);
        assert_eq!(outcome.credits.len(), 1);
        assert_eq!(outcome.balance, Decimal::ZERO);
    }

    #[test]
    fn test_mask_applies_after_windowing() {
        let ledger = cycling_ledger();
        let filter = Filter {
            selection: Selection::Time {
                preset: TimePreset::AllTime,
            },
            mask: KindMask::CreditsOnly,
        };
        let outcome = resolve(&ledger, &AccountId::from("acct-1"), &filter, today());

        assert!(outcome.debits.is_empty());
        assert_eq!(outcome.credits.len(), 2);
        assert_eq!(outcome.balance, dec!(-125));
    }

    #[test]
    fn test_unparseable_dates_excluded_from_windows() {
        let mut ledger = cycling_ledger();
        ledger
            .debits
            .push(debit("d-bad", "acct-1", dec!(999), "not a date"));

        let filter = Filter {
            selection: Selection::Time {
                preset: TimePreset::AllTime,
            },
            mask: KindMask::Both,
        };
        let outcome = resolve(&ledger, &AccountId::from("acct-1"), &filter, today());
        assert!(outcome.debits.iter().all(|d| d.id != DebitId::from("d-bad")));
    }

    #[test]
    fn test_other_accounts_never_included() {
        let mut ledger = cycling_ledger();
        ledger
            .debits
            .push(debit("d-other", "acct-2", dec!(10), "2026-03-15"));

        let filter = Filter {
            selection: Selection::Time {
                preset: TimePreset::AllTime,
            },
            mask: KindMask::Both,
        };
        let outcome = resolve(&ledger, &AccountId::from("acct-1"), &filter, today());
        assert!(
            outcome
                .debits
                .iter()
                .all(|d| d.account_id == AccountId::from("acct-1"))
        );
    }
}
