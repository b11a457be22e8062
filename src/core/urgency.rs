//! Maps a debt's due date to a priority tier and a numeric urgency score.

use chrono::NaiveDate;

use crate::domain::plan::DebtPriority;

/// Days a debt with no due date is treated as having left.
pub const NO_DEADLINE_DAYS: i64 = 999;

/// Priority tier, day count, and display reason for one due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgencyAssessment {
    pub priority: DebtPriority,
    pub days_left: i64,
    pub reason: String,
}

/// Whole days between `today` and the due date, both at day granularity.
/// Negative when overdue.
pub fn days_until_due(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days()
}

/// Classifies a due date against `today`. A missing due date counts as 999
/// days out and lands in the lowest tier.
pub fn classify_urgency(due_date: Option<NaiveDate>, today: NaiveDate) -> UrgencyAssessment {
    let days_left = due_date.map_or(NO_DEADLINE_DAYS, |due| days_until_due(due, today));
    let (priority, reason) = if days_left < 0 {
        (
            DebtPriority::Urgent,
            format!("OVERDUE! {} days late", days_left.abs()),
        )
    } else if days_left <= 7 {
        (DebtPriority::Urgent, format!("Due in {days_left} days"))
    } else if days_left <= 30 {
        (DebtPriority::High, format!("Due in {days_left} days"))
    } else if days_left <= 60 {
        (DebtPriority::Medium, format!("Due in {days_left} days"))
    } else {
        (DebtPriority::Low, format!("Due in {days_left} days"))
    };
    UrgencyAssessment {
        priority,
        days_left,
        reason,
    }
}

/// Sort key only: overdue debts always rank first, then fewer days left wins.
pub fn urgency_score(days_left: i64) -> i64 {
    if days_left < 0 {
        1000
    } else {
        100 - days_left
    }
}

/// Weeks remaining before the due date, never less than one.
pub fn weeks_left(days_left: i64) -> i64 {
    ((days_left as f64) / 7.0).ceil().max(1.0) as i64
}
