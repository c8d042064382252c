//! Ground-truth metric recomputation and baseline diffing.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tally_shared::types::AccountId;

use crate::ledger::LedgerView;

use super::types::{AccountActivity, EntityCounts, LedgerMetrics, ParityDiff, ParityMetric};

/// Equality tolerance for baseline comparison and the balances
/// cross-check. Structural checks and cycle detection stay exact.
pub(super) const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 4); // 0.0001

/// Recomputes every aggregate directly from the ledger, bypassing all
/// caches. Per-account activity covers every registered account plus
/// any account id referenced by a record, so scoping bugs cannot hide
/// amounts from the cross-check.
#[must_use]
pub fn compute_metrics<L: LedgerView + ?Sized>(ledger: &L) -> LedgerMetrics {
    let mut metrics = LedgerMetrics::default();

    for account in ledger.accounts() {
        metrics.accounts.entry(account.id.clone()).or_default();
    }

    for debit in ledger.debits() {
        metrics.total_debits += debit.amount;
        let activity = metrics.accounts.entry(debit.account_id.clone()).or_default();
        activity.debits += debit.amount;
        activity.balance += debit.amount;
    }

    for credit in ledger.credits() {
        metrics.total_credits += credit.amount;
        let activity = metrics
            .accounts
            .entry(credit.account_id.clone())
            .or_default();
        activity.credits += credit.amount;
        activity.balance -= credit.amount;
    }

    for expense in ledger.expenses() {
        metrics.total_expenses += expense.amount;
    }

    for item in ledger.items() {
        metrics.inventory_value += item.price * Decimal::from(item.stock);
    }

    metrics.net_profit = metrics.total_debits - metrics.total_expenses;
    metrics.counts = EntityCounts {
        debits: ledger.debits().len(),
        credits: ledger.credits().len(),
        expenses: ledger.expenses().len(),
        accounts: ledger.accounts().len(),
        items: ledger.items().len(),
    };

    metrics
}

fn count_decimal(count: usize) -> Decimal {
    Decimal::from(u64::try_from(count).unwrap_or(u64::MAX))
}

/// Diffs current metrics against a baseline.
///
/// Every scalar, entity count and per-account value is compared within
/// [`EPSILON`]; any larger signed difference is surfaced. Accounts on
/// one side only are compared against implicit zero activity on the
/// other. Output order is deterministic: scalars, counts, then accounts
/// sorted by id.
#[must_use]
pub fn diff_baseline(current: &LedgerMetrics, baseline: &LedgerMetrics) -> Vec<ParityDiff> {
    let mut diffs = Vec::new();

    let mut push_scalar = |metric: ParityMetric, baseline_value: Decimal, current_value: Decimal| {
        let delta = current_value - baseline_value;
        if delta.abs() > EPSILON {
            diffs.push(ParityDiff {
                metric,
                account_id: None,
                baseline: baseline_value,
                current: current_value,
                delta,
            });
        }
    };

    push_scalar(
        ParityMetric::TotalDebits,
        baseline.total_debits,
        current.total_debits,
    );
    push_scalar(
        ParityMetric::TotalCredits,
        baseline.total_credits,
        current.total_credits,
    );
    push_scalar(
        ParityMetric::TotalExpenses,
        baseline.total_expenses,
        current.total_expenses,
    );
    push_scalar(
        ParityMetric::NetProfit,
        baseline.net_profit,
        current.net_profit,
    );
    push_scalar(
        ParityMetric::InventoryValue,
        baseline.inventory_value,
        current.inventory_value,
    );
    push_scalar(
        ParityMetric::DebitCount,
        count_decimal(baseline.counts.debits),
        count_decimal(current.counts.debits),
    );
    push_scalar(
        ParityMetric::CreditCount,
        count_decimal(baseline.counts.credits),
        count_decimal(current.counts.credits),
    );
    push_scalar(
        ParityMetric::ExpenseCount,
        count_decimal(baseline.counts.expenses),
        count_decimal(current.counts.expenses),
    );
    push_scalar(
        ParityMetric::AccountCount,
        count_decimal(baseline.counts.accounts),
        count_decimal(current.counts.accounts),
    );
    push_scalar(
        ParityMetric::ItemCount,
        count_decimal(baseline.counts.items),
        count_decimal(current.counts.items),
    );

    let account_ids: BTreeSet<&AccountId> = current
        .accounts
        .keys()
        .chain(baseline.accounts.keys())
        .collect();

    for account_id in account_ids {
        let current_activity = current
            .accounts
            .get(account_id)
            .copied()
            .unwrap_or_default();
        let baseline_activity = baseline
            .accounts
            .get(account_id)
            .copied()
            .unwrap_or_default();

        let pairs = [
            (
                ParityMetric::AccountDebits,
                baseline_activity.debits,
                current_activity.debits,
            ),
            (
                ParityMetric::AccountCredits,
                baseline_activity.credits,
                current_activity.credits,
            ),
            (
                ParityMetric::AccountBalance,
                baseline_activity.balance,
                current_activity.balance,
            ),
        ];

        for (metric, baseline_value, current_value) in pairs {
            let delta = current_value - baseline_value;
            if delta.abs() > EPSILON {
                diffs.push(ParityDiff {
                    metric,
                    account_id: Some(account_id.clone()),
                    baseline: baseline_value,
                    current: current_value,
                    delta,
                });
            }
        }
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{
        CreditRecord, DebitRecord, ExpenseRecord, InMemoryLedger, Item, ItemRef,
    };
    use rust_decimal_macros::dec;
    use tally_shared::types::{CreditId, DebitId, ExpenseId, ItemId};

    fn debit(id: &str, account: &str, amount: Decimal) -> DebitRecord {
        DebitRecord {
            id: DebitId::from(id),
            account_id: AccountId::from(account),
            item: ItemRef::Item(ItemId::from("item-1")),
            reason: None,
            amount,
            date: "2026-01-10".to_string(),
            metadata: serde_json::Value::Null,
        }
    }

    fn credit(id: &str, account: &str, amount: Decimal) -> CreditRecord {
        CreditRecord {
            id: CreditId::from(id),
            account_id: AccountId::from(account),
            amount,
            date: "2026-01-11".to_string(),
            metadata: serde_json::Value::Null,
        }
    }

    fn sample_ledger() -> InMemoryLedger {
        InMemoryLedger {
            debits: vec![
                debit("d-1", "acct-1", dec!(100)),
                debit("d-2", "acct-2", dec!(40)),
            ],
            credits: vec![credit("c-1", "acct-1", dec!(60))],
            expenses: vec![ExpenseRecord {
                id: ExpenseId::from("e-1"),
                amount: dec!(25),
                date: "2026-01-12".to_string(),
                category: "rent".to_string(),
                metadata: serde_json::Value::Null,
            }],
            accounts: vec![],
            items: vec![Item {
                id: ItemId::from("item-1"),
                name: "Widget".to_string(),
                price: dec!(4),
                stock: 10,
            }],
        }
    }

    #[test]
    fn test_compute_metrics_totals() {
        let metrics = compute_metrics(&sample_ledger());
        assert_eq!(metrics.total_debits, dec!(140));
        assert_eq!(metrics.total_credits, dec!(60));
        assert_eq!(metrics.total_expenses, dec!(25));
        assert_eq!(metrics.net_profit, dec!(115));
        assert_eq!(metrics.inventory_value, dec!(40));
        assert_eq!(metrics.counts.debits, 2);
        assert_eq!(metrics.counts.expenses, 1);
    }

    #[test]
    fn test_compute_metrics_per_account() {
        let metrics = compute_metrics(&sample_ledger());
        let acct1 = &metrics.accounts[&AccountId::from("acct-1")];
        assert_eq!(acct1.debits, dec!(100));
        assert_eq!(acct1.credits, dec!(60));
        assert_eq!(acct1.balance, dec!(40));

        let acct2 = &metrics.accounts[&AccountId::from("acct-2")];
        assert_eq!(acct2.debits, dec!(40));
        assert_eq!(acct2.balance, dec!(40));
    }

    #[test]
    fn test_identical_metrics_have_no_diffs() {
        let metrics = compute_metrics(&sample_ledger());
        assert!(diff_baseline(&metrics, &metrics.clone()).is_empty());
    }

    #[test]
    fn test_new_debit_surfaces_account_and_global_drift() {
        // Save a baseline, then add one debit of 30 to a previously
        // untouched account.
        let mut ledger = sample_ledger();
        let baseline = compute_metrics(&ledger);

        ledger.debits.push(debit("d-3", "acct-z", dec!(30)));
        let current = compute_metrics(&ledger);

        let diffs = diff_baseline(&current, &baseline);

        let global = diffs
            .iter()
            .find(|d| d.metric == ParityMetric::TotalDebits)
            .expect("global debit drift");
        assert_eq!(global.delta, dec!(30));

        let account_balance = diffs
            .iter()
            .find(|d| {
                d.metric == ParityMetric::AccountBalance
                    && d.account_id == Some(AccountId::from("acct-z"))
            })
            .expect("per-account drift");
        assert_eq!(account_balance.baseline, Decimal::ZERO);
        assert_eq!(account_balance.delta, dec!(30));
    }

    #[test]
    fn test_account_missing_from_current_compares_against_zero() {
        let ledger = sample_ledger();
        let baseline = compute_metrics(&ledger);

        let mut shrunk = ledger;
        shrunk.debits.retain(|d| d.account_id != AccountId::from("acct-2"));
        let current = compute_metrics(&shrunk);

        let diffs = diff_baseline(&current, &baseline);
        let drift = diffs
            .iter()
            .find(|d| {
                d.metric == ParityMetric::AccountDebits
                    && d.account_id == Some(AccountId::from("acct-2"))
            })
            .expect("vanished account drift");
        assert_eq!(drift.current, Decimal::ZERO);
        assert_eq!(drift.delta, dec!(-40));
    }

    #[test]
    fn test_sub_epsilon_drift_is_ignored() {
        let metrics = compute_metrics(&sample_ledger());
        let mut nudged = metrics.clone();
        nudged.total_debits += dec!(0.00001);

        assert!(diff_baseline(&nudged, &metrics).is_empty());
    }

    #[test]
    fn test_determinism_across_repeated_calls() {
        let ledger = sample_ledger();
        let a = compute_metrics(&ledger);
        let b = compute_metrics(&ledger);
        assert_eq!(a, b);
        assert_eq!(diff_baseline(&a, &b), diff_baseline(&a, &b));
    }
}
