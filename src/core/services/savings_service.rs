//! Validated CRUD helpers for savings goals.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::services::{require_name, require_positive, ServiceError, ServiceResult};
use crate::domain::portfolio::Portfolio;
use crate::domain::saving_goal::SavingGoal;

pub struct SavingsService;

impl SavingsService {
    /// Adds a new goal and returns its identifier.
    pub fn add(portfolio: &mut Portfolio, goal: SavingGoal) -> ServiceResult<Uuid> {
        require_name(&goal.name, "goal")?;
        require_positive(goal.target_amount, "goal target amount")?;
        Ok(portfolio.add_saving_goal(goal))
    }

    /// Updates the goal identified by `id` via the provided mutator.
    pub fn update<F>(portfolio: &mut Portfolio, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut SavingGoal),
    {
        let goal = portfolio
            .saving_goal_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Saving goal not found".into()))?;
        mutator(goal);
        portfolio.touch();
        Ok(())
    }

    /// Removes the goal identified by `id`, returning the removed instance.
    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> ServiceResult<SavingGoal> {
        portfolio
            .remove_saving_goal(id)
            .ok_or_else(|| ServiceError::Invalid("Saving goal not found".into()))
    }

    /// Records a contribution toward a goal, clamped at the target.
    pub fn contribute(
        portfolio: &mut Portfolio,
        id: Uuid,
        amount: f64,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> ServiceResult<()> {
        require_positive(amount, "contribution amount")?;
        let goal = portfolio
            .saving_goal_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Saving goal not found".into()))?;
        goal.contribute(amount, note, now);
        portfolio.touch();
        Ok(())
    }

    /// Snapshot of all goals.
    pub fn list(portfolio: &Portfolio) -> Vec<&SavingGoal> {
        portfolio.saving_goals.iter().collect()
    }
}
