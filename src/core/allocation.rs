//! Distributes a weekly money pool across competing debts.
//!
//! Two passes over debts sorted by urgency score: urgent debts first get up to
//! 1.5x their minimum weekly payment, then everything else shares what is left
//! under per-tier caps. The pool is never overspent and no debt receives more
//! than its remaining balance.

use chrono::NaiveDate;

use crate::core::round_cents;
use crate::core::urgency::{classify_urgency, urgency_score, weeks_left};
use crate::domain::{
    debt::Debt,
    plan::{DebtPriority, DebtRecommendation},
};

/// Pass 2 stops once the pool drops to this floor.
const RESIDUAL_POOL_FLOOR: f64 = 10.0;
/// Suggestions smaller than this are not worth emitting.
const MINIMUM_SUGGESTION: f64 = 5.0;

struct DebtAnalysis<'a> {
    debt: &'a Debt,
    remaining_amount: f64,
    days_left: i64,
    priority: DebtPriority,
    reason: String,
    minimum_weekly_payment: f64,
    score: i64,
}

fn analyze<'a>(debts: &'a [&'a Debt], today: NaiveDate) -> Vec<DebtAnalysis<'a>> {
    let mut analyses: Vec<DebtAnalysis<'a>> = debts
        .iter()
        .map(|debt| {
            let remaining_amount = debt.remaining_amount();
            let assessment = classify_urgency(debt.due_date, today);
            let minimum_weekly_payment = remaining_amount / weeks_left(assessment.days_left) as f64;
            DebtAnalysis {
                debt,
                remaining_amount,
                days_left: assessment.days_left,
                priority: assessment.priority,
                reason: assessment.reason,
                minimum_weekly_payment,
                score: urgency_score(assessment.days_left),
            }
        })
        .collect();
    analyses.sort_by(|a, b| b.score.cmp(&a.score));
    analyses
}

fn recommendation_for(analysis: &DebtAnalysis<'_>, suggested_payment: f64) -> DebtRecommendation {
    DebtRecommendation {
        debt_id: analysis.debt.id,
        debt_name: analysis.debt.name.clone(),
        current_amount: analysis.remaining_amount,
        suggested_payment: round_cents(suggested_payment),
        priority: analysis.priority,
        days_left: analysis.days_left,
        reason: analysis.reason.clone(),
        weeks_paid: 0,
        total_weeks_needed: (analysis.remaining_amount / suggested_payment).ceil() as u32,
    }
}

/// Produces a per-debt suggested weekly payment from a pool of
/// `available_money`. Callers pass only active debts (remaining balance above
/// zero); affordability is validated upstream.
pub fn allocate_to_debts(
    debts: &[&Debt],
    available_money: f64,
    today: NaiveDate,
) -> Vec<DebtRecommendation> {
    let analyses = analyze(debts, today);
    let mut remaining_money = available_money;
    let mut recommendations: Vec<DebtRecommendation> = Vec::new();

    for analysis in &analyses {
        if analysis.priority == DebtPriority::Urgent && remaining_money > 0.0 {
            let suggested = (analysis.minimum_weekly_payment * 1.5)
                .min(analysis.remaining_amount)
                .min(remaining_money);
            recommendations.push(recommendation_for(analysis, suggested));
            remaining_money -= suggested;
        }
    }

    for analysis in &analyses {
        if analysis.priority == DebtPriority::Urgent || remaining_money <= RESIDUAL_POOL_FLOOR {
            continue;
        }
        if recommendations.iter().any(|r| r.debt_id == analysis.debt.id) {
            continue;
        }
        let cap_factor = match analysis.priority {
            DebtPriority::High => 0.4,
            DebtPriority::Medium => 0.3,
            _ => 0.2,
        };
        let suggested = analysis
            .minimum_weekly_payment
            .min(analysis.remaining_amount)
            .min(remaining_money * cap_factor);
        if suggested >= MINIMUM_SUGGESTION {
            recommendations.push(recommendation_for(analysis, suggested));
            remaining_money -= suggested;
        }
    }

    tracing::debug!(
        debts = debts.len(),
        emitted = recommendations.len(),
        pool = available_money,
        leftover = remaining_money,
        "debt allocation complete"
    );

    // Stable: ties keep the urgency ordering established above.
    recommendations.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
    recommendations
}
