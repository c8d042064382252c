//! Reconciliation engine.
//!
//! On demand it recomputes every aggregate directly from the raw
//! records, diffs the result against the saved baseline, and runs the
//! structural integrity checks. Output is a transient report; nothing
//! here mutates the ledger or the caches.

mod issues;
mod metrics;
mod store;
mod types;

pub use issues::{cross_check, validate};
pub use metrics::{compute_metrics, diff_baseline};
pub use store::{BaselineStore, InMemoryBaselineStore};
pub use types::{
    AccountActivity, BaselineSnapshot, EntityCounts, Issue, IssueCategory, IssueLevel,
    IssueSummary, LedgerMetrics, ParityDiff, ParityMetric, ReconReport, RecordRoute,
};

use chrono::{NaiveDate, Utc};

use crate::ledger::LedgerView;

/// Captures the current metrics as a baseline snapshot.
///
/// Callers persist it through a [`BaselineStore`]; saving is always an
/// explicit user action, never automatic.
#[must_use]
pub fn snapshot<L: LedgerView + ?Sized>(ledger: &L) -> BaselineSnapshot {
    BaselineSnapshot {
        saved_at: Utc::now(),
        metrics: compute_metrics(ledger),
    }
}

/// Runs one full reconciliation pass.
///
/// `today` anchors the future-date check. With no baseline the report
/// carries current metrics and structural findings only.
#[must_use]
pub fn run<L: LedgerView + ?Sized>(
    ledger: &L,
    baseline: Option<BaselineSnapshot>,
    today: NaiveDate,
) -> ReconReport {
    let current = compute_metrics(ledger);

    let diffs = baseline
        .as_ref()
        .map(|b| diff_baseline(&current, &b.metrics))
        .unwrap_or_default();

    let mut issues = validate(ledger, today);
    issues.extend(cross_check(&current));
    let summary = IssueSummary::from_issues(&issues);

    tracing::info!(
        criticals = summary.criticals,
        warnings = summary.warnings,
        diffs = diffs.len(),
        has_baseline = baseline.is_some(),
        "reconciliation pass complete"
    );

    ReconReport {
        generated_at: Utc::now(),
        current,
        baseline,
        diffs,
        issues,
        summary,
    }
}
