//! Distributes leftover weekly money across savings goals.
//!
//! Weighted proportional split in a single greedy pass: higher-priority goals
//! draw their share first, small shares get bumped to a five-dollar floor, and
//! later goals may receive nothing once the pool runs dry.

use chrono::NaiveDate;

use crate::core::round_cents;
use crate::domain::{plan::SavingsRecommendation, saving_goal::SavingGoal};

/// Shares below this are bumped up when the pool still allows it.
const CONTRIBUTION_FLOOR: f64 = 5.0;

fn deadline_key(goal: &SavingGoal) -> NaiveDate {
    // Goals without a deadline sort last.
    goal.deadline.unwrap_or(NaiveDate::MAX)
}

/// Produces a per-goal suggested weekly contribution from `available_money`.
/// Fully funded goals never appear in the output.
pub fn allocate_to_savings(
    goals: &[&SavingGoal],
    available_money: f64,
) -> Vec<SavingsRecommendation> {
    let mut eligible: Vec<&SavingGoal> = goals
        .iter()
        .copied()
        .filter(|g| g.current_amount < g.target_amount)
        .collect();
    if eligible.is_empty() || available_money <= 0.0 {
        return Vec::new();
    }
    eligible.sort_by(|a, b| {
        b.priority
            .weight()
            .partial_cmp(&a.priority.weight())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| deadline_key(a).cmp(&deadline_key(b)))
    });

    let total_weight: f64 = eligible.iter().map(|g| g.priority.weight()).sum();
    let single_goal = eligible.len() == 1;
    let mut remaining = available_money;
    let mut recommendations = Vec::new();

    for goal in eligible {
        if remaining <= 0.0 {
            break;
        }
        let goal_remaining = goal.target_amount - goal.current_amount;
        if goal_remaining <= 0.0 {
            continue;
        }
        let mut suggested = if single_goal {
            remaining
        } else {
            remaining * goal.priority.weight() / total_weight
        };
        if suggested < CONTRIBUTION_FLOOR && remaining >= CONTRIBUTION_FLOOR {
            suggested = CONTRIBUTION_FLOOR;
        }
        suggested = round_cents(suggested.min(goal_remaining).min(remaining));
        if suggested <= 0.0 {
            continue;
        }
        recommendations.push(SavingsRecommendation {
            goal_id: goal.id,
            goal_name: goal.name.clone(),
            suggested_contribution: suggested,
            priority: goal.priority,
            remaining_amount: round_cents(goal_remaining - suggested),
            deadline: goal.deadline,
        });
        remaining = (remaining - suggested).max(0.0);
    }

    recommendations
}
