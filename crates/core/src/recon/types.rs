//! Reconciliation domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, EntityKind};

/// Severity of a reconciliation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Data is wrong or unusable; must be fixed.
    Critical,
    /// Data is suspicious; worth a look.
    Warning,
}

/// Which record family a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    /// Debit record findings.
    Debits,
    /// Credit record findings.
    Credits,
    /// Expense record findings.
    Expenses,
    /// Aggregate balance cross-check findings.
    Balances,
}

/// A transient data-integrity finding. Produced only during a
/// reconciliation pass, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Severity.
    pub level: IssueLevel,
    /// Record family.
    pub category: IssueCategory,
    /// Human-readable description.
    pub message: String,
    /// Kind of the offending entity.
    pub entity_kind: EntityKind,
    /// Id of the offending entity.
    pub entity_id: String,
    /// The account involved, when there is one.
    pub account_id: Option<AccountId>,
    /// The record's raw date, when relevant.
    pub date: Option<String>,
}

impl Issue {
    /// The navigation target for opening the offending record.
    #[must_use]
    pub fn route(&self) -> RecordRoute {
        RecordRoute {
            entity_kind: self.entity_kind,
            entity_id: self.entity_id.clone(),
            account_id: self.account_id.clone(),
        }
    }
}

/// What the navigation collaborator needs to open a record's edit view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRoute {
    /// Kind of the record to open.
    pub entity_kind: EntityKind,
    /// Id of the record to open.
    pub entity_id: String,
    /// The owning account, when there is one.
    pub account_id: Option<AccountId>,
}

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Number of critical findings.
    pub criticals: usize,
    /// Number of warning findings.
    pub warnings: usize,
}

impl IssueSummary {
    /// Tallies a finding list.
    #[must_use]
    pub fn from_issues(issues: &[Issue]) -> Self {
        let criticals = issues
            .iter()
            .filter(|i| i.level == IssueLevel::Critical)
            .count();
        Self {
            criticals,
            warnings: issues.len() - criticals,
        }
    }
}

/// One account's recomputed activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountActivity {
    /// Sum of the account's debits.
    pub debits: Decimal,
    /// Sum of the account's credits.
    pub credits: Decimal,
    /// `debits - credits`.
    pub balance: Decimal,
}

/// Record counts per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityCounts {
    /// Number of debit records.
    pub debits: usize,
    /// Number of credit records.
    pub credits: usize,
    /// Number of expense records.
    pub expenses: usize,
    /// Number of accounts.
    pub accounts: usize,
    /// Number of inventory items.
    pub items: usize,
}

/// Aggregate metrics recomputed directly from the ledger, bypassing all
/// caches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerMetrics {
    /// Sum of all debits.
    pub total_debits: Decimal,
    /// Sum of all credits.
    pub total_credits: Decimal,
    /// Sum of all expenses.
    pub total_expenses: Decimal,
    /// `total_debits - total_expenses`.
    pub net_profit: Decimal,
    /// Aggregate inventory valuation (`price * stock` over items).
    pub inventory_value: Decimal,
    /// Per-account activity, sorted by account id.
    pub accounts: BTreeMap<AccountId, AccountActivity>,
    /// Entity counts.
    pub counts: EntityCounts,
}

/// An immutable, wholesale-replaceable record of previously computed
/// metrics. Created only by explicit user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    /// When the snapshot was saved.
    pub saved_at: DateTime<Utc>,
    /// The metrics at save time.
    pub metrics: LedgerMetrics,
}

/// Which metric a parity difference concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityMetric {
    /// Global debit total.
    TotalDebits,
    /// Global credit total.
    TotalCredits,
    /// Global expense total.
    TotalExpenses,
    /// Net profit.
    NetProfit,
    /// Inventory valuation.
    InventoryValue,
    /// One account's debit total.
    AccountDebits,
    /// One account's credit total.
    AccountCredits,
    /// One account's balance.
    AccountBalance,
    /// Debit record count.
    DebitCount,
    /// Credit record count.
    CreditCount,
    /// Expense record count.
    ExpenseCount,
    /// Account count.
    AccountCount,
    /// Item count.
    ItemCount,
}

/// A signed difference between current metrics and the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityDiff {
    /// The metric that drifted.
    pub metric: ParityMetric,
    /// The account concerned, for per-account metrics.
    pub account_id: Option<AccountId>,
    /// The baseline value (implicit zero for unseen accounts).
    pub baseline: Decimal,
    /// The recomputed value.
    pub current: Decimal,
    /// `current - baseline`.
    pub delta: Decimal,
}

/// The result of one reconciliation pass: the export record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconReport {
    /// When the pass ran.
    pub generated_at: DateTime<Utc>,
    /// Recomputed metrics.
    pub current: LedgerMetrics,
    /// The baseline compared against, if one was saved.
    pub baseline: Option<BaselineSnapshot>,
    /// Parity drift against the baseline.
    pub diffs: Vec<ParityDiff>,
    /// Structural findings, in detection order.
    pub issues: Vec<Issue>,
    /// Issue counts by severity.
    pub summary: IssueSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_by_severity() {
        let issue = |level| Issue {
            level,
            category: IssueCategory::Debits,
            message: String::new(),
            entity_kind: EntityKind::Debit,
            entity_id: "d-1".to_string(),
            account_id: None,
            date: None,
        };
        let issues = vec![
            issue(IssueLevel::Critical),
            issue(IssueLevel::Warning),
            issue(IssueLevel::Warning),
        ];

        let summary = IssueSummary::from_issues(&issues);
        assert_eq!(summary.criticals, 1);
        assert_eq!(summary.warnings, 2);
    }

    #[test]
    fn test_issue_route() {
        let issue = Issue {
            level: IssueLevel::Critical,
            category: IssueCategory::Credits,
            message: "dangling".to_string(),
            entity_kind: EntityKind::Credit,
            entity_id: "c-9".to_string(),
            account_id: Some(AccountId::from("acct-1")),
            date: Some("2026-01-01".to_string()),
        };

        let route = issue.route();
        assert_eq!(route.entity_kind, EntityKind::Credit);
        assert_eq!(route.entity_id, "c-9");
        assert_eq!(route.account_id, Some(AccountId::from("acct-1")));
    }
}
