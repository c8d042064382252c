//! Structural integrity validation over raw ledger records.
//!
//! Independent of any baseline. This is the single place malformed
//! records become user-visible findings: the segmenter and aggregator
//! skip them silently, so nothing here may be dropped.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::dates::parse_ledger_date;
use tally_shared::types::{AccountId, EntityKind};

use crate::ledger::{ItemRef, LedgerView};

use super::metrics::EPSILON;
use super::types::{Issue, IssueCategory, IssueLevel, LedgerMetrics};

struct IssueSink {
    issues: Vec<Issue>,
}

impl IssueSink {
    fn push(
        &mut self,
        level: IssueLevel,
        category: IssueCategory,
        message: String,
        entity_kind: EntityKind,
        entity_id: &str,
        account_id: Option<&AccountId>,
        date: Option<&str>,
    ) {
        self.issues.push(Issue {
            level,
            category,
            message,
            entity_kind,
            entity_id: entity_id.to_string(),
            account_id: account_id.cloned(),
            date: date.map(ToString::to_string),
        });
    }
}

fn check_date(
    sink: &mut IssueSink,
    category: IssueCategory,
    entity_kind: EntityKind,
    entity_id: &str,
    account_id: Option<&AccountId>,
    raw_date: &str,
    today: NaiveDate,
) {
    match parse_ledger_date(raw_date) {
        Ok(date) if date > today => {
            sink.push(
                IssueLevel::Warning,
                category,
                format!("{entity_kind} is dated in the future ({raw_date})"),
                entity_kind,
                entity_id,
                account_id,
                Some(raw_date),
            );
        }
        Ok(_) => {}
        Err(_) => {
            sink.push(
                IssueLevel::Warning,
                category,
                format!("{entity_kind} has an unrecognized date ({raw_date:?})"),
                entity_kind,
                entity_id,
                account_id,
                Some(raw_date),
            );
        }
    }
}

/// Runs every structural check over the raw records.
///
/// `today` anchors the future-date warning. Findings come out in
/// detection order: debits, credits, expenses.
#[must_use]
pub fn validate<L: LedgerView + ?Sized>(ledger: &L, today: NaiveDate) -> Vec<Issue> {
    let mut sink = IssueSink { issues: Vec::new() };

    validate_debits(ledger, today, &mut sink);
    validate_credits(ledger, today, &mut sink);
    validate_expenses(ledger, today, &mut sink);

    sink.issues
}

fn validate_debits<L: LedgerView + ?Sized>(ledger: &L, today: NaiveDate, sink: &mut IssueSink) {
    let mut seen: HashSet<(AccountId, String, Decimal, String)> = HashSet::new();

    for debit in ledger.debits() {
        let id = debit.id.as_str();
        let account = Some(&debit.account_id);

        if ledger.account(&debit.account_id).is_none() {
            sink.push(
                IssueLevel::Critical,
                IssueCategory::Debits,
                format!("debit references missing account {}", debit.account_id),
                EntityKind::Debit,
                id,
                account,
                Some(&debit.date),
            );
        }

        let item_key = match &debit.item {
            ItemRef::Item(item_id) => {
                if ledger.item(item_id).is_none() {
                    sink.push(
                        IssueLevel::Critical,
                        IssueCategory::Debits,
                        format!("debit references missing item {item_id}"),
                        EntityKind::Debit,
                        id,
                        account,
                        Some(&debit.date),
                    );
                }
                item_id.to_string()
            }
            ItemRef::Custom => {
                let has_reason = debit.reason.as_deref().is_some_and(|r| !r.trim().is_empty());
                if !has_reason || debit.amount <= Decimal::ZERO {
                    sink.push(
                        IssueLevel::Critical,
                        IssueCategory::Debits,
                        "custom-amount debit needs a reason and a positive amount".to_string(),
                        EntityKind::Debit,
                        id,
                        account,
                        Some(&debit.date),
                    );
                }
                "custom".to_string()
            }
        };

        if debit.amount < Decimal::ZERO {
            sink.push(
                IssueLevel::Critical,
                IssueCategory::Debits,
                format!("debit has a negative amount ({})", debit.amount),
                EntityKind::Debit,
                id,
                account,
                Some(&debit.date),
            );
        }

        check_date(
            sink,
            IssueCategory::Debits,
            EntityKind::Debit,
            id,
            account,
            &debit.date,
            today,
        );

        let key = (
            debit.account_id.clone(),
            debit.date.clone(),
            debit.amount,
            item_key,
        );
        if !seen.insert(key) {
            sink.push(
                IssueLevel::Warning,
                IssueCategory::Debits,
                "probable duplicate debit (same account, date, amount and item)".to_string(),
                EntityKind::Debit,
                id,
                account,
                Some(&debit.date),
            );
        }
    }
}

fn validate_credits<L: LedgerView + ?Sized>(ledger: &L, today: NaiveDate, sink: &mut IssueSink) {
    let mut seen: HashSet<(AccountId, String, Decimal)> = HashSet::new();

    for credit in ledger.credits() {
        let id = credit.id.as_str();
        let account = Some(&credit.account_id);

        if ledger.account(&credit.account_id).is_none() {
            sink.push(
                IssueLevel::Critical,
                IssueCategory::Credits,
                format!("credit references missing account {}", credit.account_id),
                EntityKind::Credit,
                id,
                account,
                Some(&credit.date),
            );
        }

        if credit.amount < Decimal::ZERO {
            sink.push(
                IssueLevel::Critical,
                IssueCategory::Credits,
                format!("credit has a negative amount ({})", credit.amount),
                EntityKind::Credit,
                id,
                account,
                Some(&credit.date),
            );
        }

        check_date(
            sink,
            IssueCategory::Credits,
            EntityKind::Credit,
            id,
            account,
            &credit.date,
            today,
        );

        let key = (credit.account_id.clone(), credit.date.clone(), credit.amount);
        if !seen.insert(key) {
            sink.push(
                IssueLevel::Warning,
                IssueCategory::Credits,
                "probable duplicate credit (same account, date and amount)".to_string(),
                EntityKind::Credit,
                id,
                account,
                Some(&credit.date),
            );
        }
    }
}

fn validate_expenses<L: LedgerView + ?Sized>(ledger: &L, today: NaiveDate, sink: &mut IssueSink) {
    let mut seen: HashSet<(String, Decimal, String)> = HashSet::new();

    for expense in ledger.expenses() {
        let id = expense.id.as_str();

        if expense.amount < Decimal::ZERO {
            sink.push(
                IssueLevel::Critical,
                IssueCategory::Expenses,
                format!("expense has a negative amount ({})", expense.amount),
                EntityKind::Expense,
                id,
                None,
                Some(&expense.date),
            );
        }

        check_date(
            sink,
            IssueCategory::Expenses,
            EntityKind::Expense,
            id,
            None,
            &expense.date,
            today,
        );

        let key = (expense.date.clone(), expense.amount, expense.category.clone());
        if !seen.insert(key) {
            sink.push(
                IssueLevel::Warning,
                IssueCategory::Expenses,
                "probable duplicate expense (same date, amount and category)".to_string(),
                EntityKind::Expense,
                id,
                None,
                Some(&expense.date),
            );
        }
    }
}

/// Verifies that global totals and per-account sums agree:
/// `(Σ debits - Σ credits) == Σ_accounts (debits - credits)` within
/// epsilon. A mismatch means some amount was scoped to the wrong
/// account bucket.
#[must_use]
pub fn cross_check(metrics: &LedgerMetrics) -> Vec<Issue> {
    let global = metrics.total_debits - metrics.total_credits;
    let per_account: Decimal = metrics
        .accounts
        .values()
        .map(|a| a.debits - a.credits)
        .sum();

    if (global - per_account).abs() > EPSILON {
        return vec![Issue {
            level: IssueLevel::Warning,
            category: IssueCategory::Balances,
            message: format!(
                "global net {global} disagrees with per-account net {per_account}"
            ),
            entity_kind: EntityKind::Account,
            entity_id: "*".to_string(),
            account_id: None,
            date: None,
        }];
    }

    Vec::new()
}
