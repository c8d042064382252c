//! Financial cycle segmentation.
//!
//! A cycle is a maximal contiguous run of one account's chronologically
//! ordered transactions between two zero-balance points. Closed cycles
//! sum to exactly zero; whatever trails the last zero crossing forms the
//! single open (current) cycle.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{AccountEntry, EntryKind};

/// A derived span of one account's transactions bounded by zero-balance
/// points. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Date of the first transaction in the span.
    pub start_date: NaiveDate,
    /// Date of the closing transaction, or `None` while the cycle is
    /// still open on the right.
    pub end_date: Option<NaiveDate>,
    /// The transactions in the span, in segmentation order.
    pub entries: Vec<AccountEntry>,
    /// True when the span is bounded by zero balance at both ends.
    pub is_complete: bool,
}

impl Cycle {
    /// Sum of signed amounts over the span. Exactly zero for a complete
    /// cycle; the account's outstanding balance for the open one.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.entries.iter().map(AccountEntry::signed_amount).sum()
    }

    /// True for the open-ended span, unbounded on the right.
    #[must_use]
    pub fn is_current(&self) -> bool {
        !self.is_complete
    }
}

/// Sort key for zero-crossing detection: date ascending, credits before
/// debits on the same date.
///
/// This tie-break exists only to make zero-crossing detection
/// deterministic. It is intentionally not the same rule as the display
/// ordering in [`crate::ordering`], which depends on the balance
/// entering each day.
fn segmentation_order(a: &AccountEntry, b: &AccountEntry) -> std::cmp::Ordering {
    let kind_rank = |kind: EntryKind| match kind {
        EntryKind::Credit => 0u8,
        EntryKind::Debit => 1u8,
    };
    a.date
        .cmp(&b.date)
        .then_with(|| kind_rank(a.kind).cmp(&kind_rank(b.kind)))
}

/// Partitions one account's transactions into cycles, oldest first.
///
/// Input may arrive in any order. The running balance is accumulated as
/// exact `Decimal` values (debit adds, credit subtracts); every index
/// where it becomes exactly zero closes a cycle. Trailing transactions
/// after the last zero form one open cycle; with no zero crossing at all
/// the whole list is a single open cycle. A lone zero-amount transaction
/// closes immediately. Empty input yields no cycles.
#[must_use]
pub fn segment(entries: &[AccountEntry]) -> Vec<Cycle> {
    let mut ordered = entries.to_vec();
    ordered.sort_by(segmentation_order);

    let mut cycles = Vec::new();
    let mut span_start = 0;
    let mut balance = Decimal::ZERO;

    for (index, entry) in ordered.iter().enumerate() {
        balance += entry.signed_amount();
        if balance.is_zero() {
            let span = ordered[span_start..=index].to_vec();
            cycles.push(Cycle {
                start_date: span[0].date,
                end_date: Some(entry.date),
                entries: span,
                is_complete: true,
            });
            span_start = index + 1;
        }
    }

    if span_start < ordered.len() {
        let span = ordered[span_start..].to_vec();
        cycles.push(Cycle {
            start_date: span[0].date,
            end_date: None,
            entries: span,
            is_complete: false,
        });
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn entry(id: &str, kind: EntryKind, amount: Decimal, date: NaiveDate) -> AccountEntry {
        AccountEntry {
            id: id.to_string(),
            kind,
            amount,
            date,
        }
    }

    #[test]
    fn test_two_debits_one_credit_closes_on_payment() {
        // Scenario: two sales of 100 on day 1, paid in full with 200 on day 2.
        let entries = vec![
            entry("d-1", EntryKind::Debit, dec!(100), day(1)),
            entry("d-2", EntryKind::Debit, dec!(100), day(1)),
            entry("c-1", EntryKind::Credit, dec!(200), day(2)),
        ];

        let cycles = segment(&entries);
        assert_eq!(cycles.len(), 1);

        let cycle = &cycles[0];
        assert!(cycle.is_complete);
        assert_eq!(cycle.start_date, day(1));
        assert_eq!(cycle.end_date, Some(day(2)));
        assert_eq!(cycle.entries.len(), 3);
        assert_eq!(cycle.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_single_unpaid_debit_is_open() {
        let entries = vec![entry("d-1", EntryKind::Debit, dec!(50), day(1))];

        let cycles = segment(&entries);
        assert_eq!(cycles.len(), 1);
        assert!(!cycles[0].is_complete);
        assert!(cycles[0].is_current());
        assert_eq!(cycles[0].end_date, None);
        assert_eq!(cycles[0].balance(), dec!(50));
    }

    #[test]
    fn test_closed_cycle_followed_by_open_tail() {
        let entries = vec![
            entry("d-1", EntryKind::Debit, dec!(30), day(1)),
            entry("c-1", EntryKind::Credit, dec!(30), day(2)),
            entry("d-2", EntryKind::Debit, dec!(10), day(3)),
        ];

        let cycles = segment(&entries);
        assert_eq!(cycles.len(), 2);
        assert!(cycles[0].is_complete);
        assert_eq!(cycles[0].balance(), Decimal::ZERO);
        assert!(!cycles[1].is_complete);
        assert_eq!(cycles[1].balance(), dec!(10));
        assert_eq!(cycles[1].start_date, day(3));
    }

    #[test]
    fn test_lone_zero_amount_closes_immediately() {
        let entries = vec![entry("d-1", EntryKind::Debit, dec!(0), day(4))];

        let cycles = segment(&entries);
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].is_complete);
        assert_eq!(cycles[0].start_date, day(4));
        assert_eq!(cycles[0].end_date, Some(day(4)));
    }

    #[test]
    fn test_same_day_credit_sorts_before_debit() {
        // Credit-first on the shared day means the balance dips to -20
        // and returns to zero on the debit, closing one cycle.
        let entries = vec![
            entry("d-1", EntryKind::Debit, dec!(20), day(5)),
            entry("c-1", EntryKind::Credit, dec!(20), day(5)),
        ];

        let cycles = segment(&entries);
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].is_complete);
        assert_eq!(cycles[0].entries[0].kind, EntryKind::Credit);
        assert_eq!(cycles[0].entries[1].kind, EntryKind::Debit);
    }

    #[test]
    fn test_unsorted_input_is_normalized() {
        let entries = vec![
            entry("c-1", EntryKind::Credit, dec!(40), day(9)),
            entry("d-1", EntryKind::Debit, dec!(40), day(2)),
        ];

        let cycles = segment(&entries);
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].is_complete);
        assert_eq!(cycles[0].start_date, day(2));
        assert_eq!(cycles[0].end_date, Some(day(9)));
    }

    #[test]
    fn test_empty_input_yields_no_cycles() {
        assert!(segment(&[]).is_empty());
    }

    fn entry_strategy() -> impl Strategy<Value = AccountEntry> {
        (any::<bool>(), 0i64..=50_000, 1u32..=28).prop_map(|(is_debit, cents, d)| AccountEntry {
            id: String::new(),
            kind: if is_debit {
                EntryKind::Debit
            } else {
                EntryKind::Credit
            },
            amount: Decimal::new(cents, 2),
            date: day(d),
        })
    }

    fn entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<AccountEntry>> {
        prop::collection::vec(entry_strategy(), 0..=max_len).prop_map(|mut entries| {
            for (i, entry) in entries.iter_mut().enumerate() {
                entry.id = format!("t-{i}");
            }
            entries
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Concatenating all cycle slices reproduces the full
        /// segmentation-ordered sequence exactly once.
        #[test]
        fn prop_cycles_partition_the_sequence(entries in entries_strategy(40)) {
            let mut expected = entries.clone();
            expected.sort_by(super::segmentation_order);

            let cycles = segment(&entries);
            let concatenated: Vec<AccountEntry> = cycles
                .iter()
                .flat_map(|c| c.entries.iter().cloned())
                .collect();

            prop_assert_eq!(concatenated, expected);
        }

        /// Closed cycles sum to exactly zero; the open cycle sums to the
        /// account's outstanding balance.
        #[test]
        fn prop_cycle_balances(entries in entries_strategy(40)) {
            let total: Decimal = entries.iter().map(AccountEntry::signed_amount).sum();
            let cycles = segment(&entries);

            for cycle in &cycles {
                if cycle.is_complete {
                    prop_assert_eq!(cycle.balance(), Decimal::ZERO);
                }
            }

            let open_balance: Decimal = cycles
                .iter()
                .filter(|c| !c.is_complete)
                .map(Cycle::balance)
                .sum();
            prop_assert_eq!(open_balance, total);
        }

        /// At most one cycle is open, and only the last one.
        #[test]
        fn prop_only_last_cycle_open(entries in entries_strategy(40)) {
            let cycles = segment(&entries);
            for (i, cycle) in cycles.iter().enumerate() {
                if !cycle.is_complete {
                    prop_assert_eq!(i, cycles.len() - 1);
                }
            }
        }

        /// Segmenting an unchanged list twice yields identical cycles.
        #[test]
        fn prop_segmentation_idempotent(entries in entries_strategy(40)) {
            prop_assert_eq!(segment(&entries), segment(&entries));
        }
    }
}
