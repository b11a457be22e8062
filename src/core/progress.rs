//! Recomputes live progress against a saved plan.
//!
//! Pure over its inputs: the plan anchor, the current debt collection, the
//! live trailing-week income, and an explicit `now`. Persisting the refreshed
//! block back is the caller's decision, not a side effect here.

use chrono::{DateTime, Duration, Utc};

use crate::core::round_cents;
use crate::domain::{
    debt::Debt,
    plan::{PlanProgress, SavedFinancialPlan},
};

/// A debt counts as on track while it has received at least this share of the
/// expected amount.
const ON_TRACK_RATIO: f64 = 0.9;

/// Derives `PlanProgress` from the plan's stored recommendations and the
/// current debt/payment state. Recommendations whose debt has since been
/// deleted are skipped; deletion after a snapshot is legitimate.
pub fn compute_plan_progress(
    plan: &SavedFinancialPlan,
    debts: &[Debt],
    actual_weekly_income: f64,
    now: DateTime<Utc>,
) -> PlanProgress {
    let plan_start = plan.created_at.date_naive();
    let weeks_completed = ((now - plan.created_at).num_days() / 7).max(0);

    let mut total_amount_paid = 0.0;
    let mut on_track_debts = 0;
    let mut behind_debts = 0;
    let mut completed_debts = 0;
    let mut recommendations: Vec<String> = Vec::new();

    for rec in &plan.recommendations {
        let Some(debt) = debts.iter().find(|d| d.id == rec.debt_id) else {
            continue;
        };
        let principal_paid = debt.principal_paid_since(plan_start);
        total_amount_paid += principal_paid;

        let expected_paid = rec.suggested_payment * weeks_completed as f64;
        if debt.remaining_amount() <= 0.0 {
            completed_debts += 1;
        } else if principal_paid >= expected_paid * ON_TRACK_RATIO {
            on_track_debts += 1;
        } else {
            behind_debts += 1;
            let deficit = expected_paid - principal_paid;
            recommendations.push(format!(
                "{}: Need ${:.2} more to catch up",
                debt.name, deficit
            ));
        }
    }

    let total_weekly_target: f64 = plan.recommendations.iter().map(|r| r.suggested_payment).sum();
    let total_remaining: f64 = plan
        .recommendations
        .iter()
        .filter_map(|rec| debts.iter().find(|d| d.id == rec.debt_id))
        .map(|debt| debt.remaining_amount())
        .sum();
    let weeks_to_complete = if total_weekly_target > 0.0 {
        (total_remaining / total_weekly_target).ceil() as i64
    } else {
        0
    };
    let projected_completion = now + Duration::weeks(weeks_to_complete);

    let income_gap = round_cents(
        (plan.weekly_target + plan.essential_expenses + plan.other_expenses
            - actual_weekly_income)
            .max(0.0),
    );
    if income_gap > 0.0 {
        recommendations.push(format!(
            "Need ${income_gap:.2} more per week to meet the plan"
        ));
    }

    PlanProgress {
        weeks_completed,
        total_amount_paid,
        on_track_debts,
        behind_debts,
        completed_debts,
        projected_completion,
        income_gap,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        debt::{DebtKind, Payment, PaymentType},
        plan::{DebtPriority, DebtRecommendation},
    };
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn rec_for(debt: &Debt, suggested: f64) -> DebtRecommendation {
        DebtRecommendation {
            debt_id: debt.id,
            debt_name: debt.name.clone(),
            current_amount: debt.remaining_amount(),
            suggested_payment: suggested,
            priority: DebtPriority::High,
            days_left: 30,
            reason: "Due in 30 days".into(),
            weeks_paid: 0,
            total_weeks_needed: 4,
        }
    }

    fn plan_with(recs: Vec<DebtRecommendation>, created: DateTime<Utc>) -> SavedFinancialPlan {
        SavedFinancialPlan::new(500.0, 150.0, 50.0, 300.0, recs, Vec::new(), created)
    }

    #[test]
    fn week_zero_counts_only_post_creation_payments() {
        let mut debt = Debt::new("Card", 400.0, date(2025, 1, 1), DebtKind::CreditCard);
        debt.record_payment(Payment::new(100.0, date(2025, 5, 1), PaymentType::Principal));
        let created = at(2025, 8, 15);
        let plan = plan_with(vec![rec_for(&debt, 50.0)], created);

        let progress = compute_plan_progress(&plan, &[debt], 500.0, created);
        assert_eq!(progress.weeks_completed, 0);
        assert_eq!(progress.total_amount_paid, 0.0);
        // expected is zero, so any non-negative payment counts as on track
        assert_eq!(progress.on_track_debts, 1);
        assert_eq!(progress.behind_debts, 0);
        assert!(progress.recommendations.is_empty());
    }

    #[test]
    fn behind_debt_reports_its_deficit() {
        let mut debt = Debt::new("Card", 400.0, date(2025, 1, 1), DebtKind::CreditCard);
        debt.record_payment(Payment::new(40.0, date(2025, 8, 20), PaymentType::Principal));
        let created = at(2025, 8, 15);
        let plan = plan_with(vec![rec_for(&debt, 50.0)], created);

        // three weeks in, 150 expected, 40 paid
        let progress = compute_plan_progress(&plan, &[debt], 500.0, created + Duration::weeks(3));
        assert_eq!(progress.weeks_completed, 3);
        assert_eq!(progress.behind_debts, 1);
        assert_eq!(
            progress.recommendations,
            vec!["Card: Need $110.00 more to catch up".to_string()]
        );
    }

    #[test]
    fn paid_off_debt_counts_as_completed() {
        let mut debt = Debt::new("Card", 100.0, date(2025, 1, 1), DebtKind::CreditCard);
        debt.record_payment(Payment::new(100.0, date(2025, 8, 20), PaymentType::Principal));
        let created = at(2025, 8, 15);
        let plan = plan_with(vec![rec_for(&debt, 50.0)], created);

        let progress = compute_plan_progress(&plan, &[debt], 500.0, created + Duration::weeks(2));
        assert_eq!(progress.completed_debts, 1);
        assert_eq!(progress.total_amount_paid, 100.0);
    }

    #[test]
    fn deleted_debt_is_silently_skipped() {
        let debt = Debt::new("Gone", 400.0, date(2025, 1, 1), DebtKind::CreditCard);
        let mut rec = rec_for(&debt, 50.0);
        rec.debt_id = Uuid::new_v4();
        let created = at(2025, 8, 15);
        let plan = plan_with(vec![rec], created);

        let progress = compute_plan_progress(&plan, &[debt], 500.0, created + Duration::weeks(4));
        assert_eq!(progress.on_track_debts, 0);
        assert_eq!(progress.behind_debts, 0);
        assert_eq!(progress.completed_debts, 0);
        assert_eq!(progress.total_amount_paid, 0.0);
    }

    #[test]
    fn projection_divides_remaining_by_weekly_target() {
        let debt = Debt::new("Card", 400.0, date(2025, 1, 1), DebtKind::CreditCard);
        let created = at(2025, 8, 15);
        let plan = plan_with(vec![rec_for(&debt, 50.0)], created);
        let now = created + Duration::weeks(1);

        let progress = compute_plan_progress(&plan, &[debt], 500.0, now);
        // 400 remaining at 50 per week: eight weeks out
        assert_eq!(progress.projected_completion, now + Duration::weeks(8));
    }

    #[test]
    fn income_gap_appears_when_live_income_falls_short() {
        let debt = Debt::new("Card", 400.0, date(2025, 1, 1), DebtKind::CreditCard);
        let created = at(2025, 8, 15);
        let plan = plan_with(vec![rec_for(&debt, 50.0)], created);

        // target 50 + essential 150 + other 50 = 250 against 180 earned
        let debts = [debt];
        let progress = compute_plan_progress(&plan, &debts, 180.0, created);
        assert_eq!(progress.income_gap, 70.0);
        assert!(progress
            .recommendations
            .iter()
            .any(|r| r == "Need $70.00 more per week to meet the plan"));

        let flush = compute_plan_progress(&plan, &debts, 400.0, created);
        assert_eq!(flush.income_gap, 0.0);
    }
}
