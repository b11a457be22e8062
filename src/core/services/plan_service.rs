//! Builds, persists, and refreshes the weekly financial plan.

use chrono::{DateTime, Utc};

use crate::core::allocation::allocate_to_debts;
use crate::core::progress::compute_plan_progress;
use crate::core::savings::allocate_to_savings;
use crate::core::services::{require_positive, ServiceError, ServiceResult};
use crate::domain::plan::{PlanStatus, SavedFinancialPlan};
use crate::domain::portfolio::Portfolio;
use crate::storage::PlanRepository;

pub struct PlanService;

impl PlanService {
    /// Builds a fresh plan from explicit weekly figures. Money left after the
    /// debt allocation flows into savings recommendations.
    pub fn build(
        portfolio: &Portfolio,
        weekly_income: f64,
        essential_expenses: f64,
        other_expenses: f64,
        now: DateTime<Utc>,
    ) -> ServiceResult<SavedFinancialPlan> {
        require_positive(weekly_income, "weekly income")?;
        if essential_expenses < 0.0 || other_expenses < 0.0 {
            return Err(ServiceError::Invalid("expenses cannot be negative".into()));
        }
        let available = weekly_income - essential_expenses - other_expenses;
        if available <= 0.0 {
            return Err(ServiceError::Invalid(
                "expenses leave nothing available for debts".into(),
            ));
        }
        let today = now.date_naive();
        let active = portfolio.active_debts();
        if active.is_empty() {
            return Err(ServiceError::Invalid(
                "no active debts to build a plan for".into(),
            ));
        }

        let recommendations = allocate_to_debts(&active, available, today);
        let allocated: f64 = recommendations.iter().map(|r| r.suggested_payment).sum();
        let leftover = (available - allocated).max(0.0);
        let savings_recommendations = allocate_to_savings(&portfolio.unfunded_goals(), leftover);

        tracing::info!(
            debts = recommendations.len(),
            goals = savings_recommendations.len(),
            available,
            leftover,
            "weekly plan built"
        );

        Ok(SavedFinancialPlan::new(
            weekly_income,
            essential_expenses,
            other_expenses,
            available,
            recommendations,
            savings_recommendations,
            now,
        ))
    }

    /// Persists a plan into the single-record slot, replacing any prior plan.
    pub fn save(repository: &dyn PlanRepository, plan: &SavedFinancialPlan) -> ServiceResult<()> {
        repository.put(plan)?;
        Ok(())
    }

    pub fn load(repository: &dyn PlanRepository) -> ServiceResult<Option<SavedFinancialPlan>> {
        Ok(repository.get()?)
    }

    pub fn delete(repository: &dyn PlanRepository) -> ServiceResult<()> {
        repository.delete()?;
        Ok(())
    }

    /// Recomputes the stored plan's progress against current debt and income
    /// data and persists the refreshed plan.
    pub fn refresh_progress(
        repository: &dyn PlanRepository,
        portfolio: &Portfolio,
        now: DateTime<Utc>,
    ) -> ServiceResult<SavedFinancialPlan> {
        let mut plan = repository
            .get()?
            .ok_or_else(|| ServiceError::Invalid("No saved plan to refresh".into()))?;
        let actual_weekly_income = portfolio.weekly_income_total(now.date_naive());
        plan.progress = compute_plan_progress(&plan, &portfolio.debts, actual_weekly_income, now);
        plan.status = Self::status_for(&plan, portfolio);
        plan.updated_at = now;
        repository.put(&plan)?;
        Ok(plan)
    }

    /// Rebuilds the plan from the live trailing-week cash flow while keeping
    /// the original plan's identity and start date as the progress anchor.
    pub fn rebuild_from_cashflow(
        repository: &dyn PlanRepository,
        portfolio: &Portfolio,
        now: DateTime<Utc>,
    ) -> ServiceResult<SavedFinancialPlan> {
        let today = now.date_naive();
        let weekly_income = portfolio.weekly_income_total(today);
        let expenses = portfolio.weekly_expense_total(today);
        let essential_expenses = expenses.food + expenses.gas;
        let other_expenses = expenses.other;

        let mut plan = Self::build(
            portfolio,
            weekly_income,
            essential_expenses,
            other_expenses,
            now,
        )?;
        if let Some(previous) = repository.get()? {
            plan.id = previous.id;
            plan.created_at = previous.created_at;
            plan.progress =
                compute_plan_progress(&plan, &portfolio.debts, weekly_income, now);
        }
        repository.put(&plan)?;
        Ok(plan)
    }

    fn status_for(plan: &SavedFinancialPlan, portfolio: &Portfolio) -> PlanStatus {
        let mut tracked = 0usize;
        let mut finished = 0usize;
        let mut missing = false;
        for rec in &plan.recommendations {
            match portfolio.debt(rec.debt_id) {
                Some(debt) => {
                    tracked += 1;
                    if debt.remaining_amount() <= 0.0 {
                        finished += 1;
                    }
                }
                None => missing = true,
            }
        }
        if missing {
            PlanStatus::NeedsUpdate
        } else if tracked > 0 && finished == tracked {
            PlanStatus::Completed
        } else {
            PlanStatus::Active
        }
    }
}
