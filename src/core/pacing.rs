//! Standalone per-debt pacing analysis, independent of any saved plan.
//!
//! Compares the principal actually paid against a linear pace from the start
//! date to the due date and classifies each active non-recurring debt.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::urgency::{days_until_due, weeks_left, NO_DEADLINE_DAYS};
use crate::domain::debt::Debt;
use uuid::Uuid;

/// Debts further behind than this feed the aggregate arrears total.
const BEHIND_TOLERANCE: f64 = 10.0;
/// Assumed horizon for debts without a due date.
const OPEN_ENDED_TOTAL_DAYS: f64 = 365.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PacingStatus {
    OnTrack,
    Behind,
    Ahead,
    Urgent,
}

/// Pacing verdict for one debt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtPacing {
    pub debt_id: Uuid,
    pub debt_name: String,
    pub remaining_amount: f64,
    pub days_left: i64,
    pub weekly_needed: f64,
    pub status: PacingStatus,
    pub recommendation: String,
}

/// Pacing across all active non-recurring debts, soonest due first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PacingReport {
    pub entries: Vec<DebtPacing>,
    /// Sum of per-debt arrears beyond the tolerance.
    pub total_behind: f64,
}

/// Computes the pacing verdict for a single debt.
pub fn compute_pacing(debt: &Debt, today: NaiveDate) -> DebtPacing {
    let principal_paid = debt.principal_paid();
    let remaining_amount = debt.remaining_amount();
    let days_left = debt
        .due_date
        .map_or(NO_DEADLINE_DAYS, |due| days_until_due(due, today));

    // Historical pace formula: with a due date the horizon re-adds the whole
    // start-to-due span on top of the days still left, so elapsed time is
    // weighted heavier than a plain linear schedule would weight it.
    let total_days = match debt.due_date {
        Some(due) => days_left as f64 + (due - debt.start_date).num_days().abs() as f64,
        None => OPEN_ENDED_TOTAL_DAYS,
    };
    let days_passed = total_days - days_left as f64;
    let expected_paid = if total_days > 0.0 {
        debt.total_amount * days_passed / total_days
    } else {
        0.0
    };
    let actually_behind = (expected_paid - principal_paid).max(0.0);

    let weeks = weeks_left(days_left);
    let weekly_needed = remaining_amount / weeks as f64;

    let (status, recommendation) = if days_left < 0 {
        (
            PacingStatus::Urgent,
            format!(
                "URGENT! {} days overdue. You need ${:.2} weekly to catch up.",
                days_left.abs(),
                weekly_needed
            ),
        )
    } else if days_left <= 7 {
        (
            PacingStatus::Urgent,
            format!(
                "CRITICAL! Only {days_left} days left. Pay the remaining ${remaining_amount:.2} now."
            ),
        )
    } else if actually_behind > BEHIND_TOLERANCE {
        (
            PacingStatus::Behind,
            format!(
                "You are ${:.2} behind. Raise your weekly payment to ${:.2} to recover.",
                actually_behind,
                weekly_needed + actually_behind / weeks as f64
            ),
        )
    } else if principal_paid > expected_paid * 1.1 {
        (
            PacingStatus::Ahead,
            format!(
                "Ahead of schedule. You can cut back to ${:.2} weekly or focus on other debts.",
                weekly_needed * 0.8
            ),
        )
    } else {
        (
            PacingStatus::OnTrack,
            format!("Keep paying ${weekly_needed:.2} weekly to finish on time."),
        )
    };

    DebtPacing {
        debt_id: debt.id,
        debt_name: debt.name.clone(),
        remaining_amount,
        days_left,
        weekly_needed,
        status,
        recommendation,
    }
}

/// Analyzes every active non-recurring debt. Recurring obligations have no
/// terminal balance and are excluded by construction.
pub fn analyze_pacing(debts: &[Debt], today: NaiveDate) -> PacingReport {
    let mut total_behind = 0.0;
    let mut entries: Vec<DebtPacing> = debts
        .iter()
        .filter(|d| !d.is_recurring() && d.is_active())
        .map(|debt| {
            let pacing = compute_pacing(debt, today);
            // recompute the raw arrears for the aggregate line
            let days_left = pacing.days_left;
            let total_days = match debt.due_date {
                Some(due) => days_left as f64 + (due - debt.start_date).num_days().abs() as f64,
                None => OPEN_ENDED_TOTAL_DAYS,
            };
            let expected = if total_days > 0.0 {
                debt.total_amount * (total_days - days_left as f64) / total_days
            } else {
                0.0
            };
            let behind = (expected - debt.principal_paid()).max(0.0);
            if behind > BEHIND_TOLERANCE {
                total_behind += behind;
            }
            pacing
        })
        .collect();
    entries.sort_by_key(|entry| entry.days_left);
    PacingReport {
        entries,
        total_behind,
    }
}
