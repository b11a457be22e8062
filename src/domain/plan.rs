use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Urgency tier assigned to a debt from its due date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebtPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl DebtPriority {
    /// Sort weight for the final recommendation ordering.
    pub fn weight(&self) -> u8 {
        match self {
            DebtPriority::Urgent => 4,
            DebtPriority::High => 3,
            DebtPriority::Medium => 2,
            DebtPriority::Low => 1,
        }
    }
}

/// Suggested weekly payment toward one debt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtRecommendation {
    pub debt_id: Uuid,
    pub debt_name: String,
    /// Remaining balance at the time the recommendation was produced.
    pub current_amount: f64,
    pub suggested_payment: f64,
    pub priority: DebtPriority,
    pub days_left: i64,
    pub reason: String,
    pub weeks_paid: u32,
    pub total_weeks_needed: u32,
}

/// Suggested weekly contribution toward one savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRecommendation {
    pub goal_id: Uuid,
    pub goal_name: String,
    pub suggested_contribution: f64,
    pub priority: crate::domain::saving_goal::GoalPriority,
    /// Amount still unfunded after the suggested contribution lands.
    pub remaining_amount: f64,
    pub deadline: Option<NaiveDate>,
}

/// Live progress against a saved plan. This is a read-time projection derived
/// from current debt and payment data; only the plan's `created_at` anchors it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub weeks_completed: i64,
    /// Principal paid across recommended debts since the plan was created.
    pub total_amount_paid: f64,
    pub on_track_debts: u32,
    pub behind_debts: u32,
    pub completed_debts: u32,
    pub projected_completion: DateTime<Utc>,
    pub income_gap: f64,
    pub recommendations: Vec<String>,
}

impl PlanProgress {
    /// The week-zero baseline used before any live data is folded in.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            weeks_completed: 0,
            total_amount_paid: 0.0,
            on_track_debts: 0,
            behind_debts: 0,
            completed_debts: 0,
            projected_completion: now,
            income_gap: 0.0,
            recommendations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Active,
    Completed,
    NeedsUpdate,
}

/// The persisted weekly cash-allocation plan. At most one exists at a time;
/// see `storage::PlanRepository` for the single-record contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedFinancialPlan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub weekly_income: f64,
    pub essential_expenses: f64,
    pub other_expenses: f64,
    pub available_for_debts: f64,
    /// Sum of all suggested weekly debt payments.
    pub weekly_target: f64,
    pub recommendations: Vec<DebtRecommendation>,
    #[serde(default)]
    pub savings_recommendations: Vec<SavingsRecommendation>,
    /// Sum of all suggested weekly savings contributions.
    #[serde(default)]
    pub savings_contribution: f64,
    pub progress: PlanProgress,
    pub status: PlanStatus,
}

impl SavedFinancialPlan {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        weekly_income: f64,
        essential_expenses: f64,
        other_expenses: f64,
        available_for_debts: f64,
        recommendations: Vec<DebtRecommendation>,
        savings_recommendations: Vec<SavingsRecommendation>,
        now: DateTime<Utc>,
    ) -> Self {
        let weekly_target = recommendations.iter().map(|r| r.suggested_payment).sum();
        let savings_contribution = savings_recommendations
            .iter()
            .map(|r| r.suggested_contribution)
            .sum();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            weekly_income,
            essential_expenses,
            other_expenses,
            available_for_debts,
            weekly_target,
            recommendations,
            savings_recommendations,
            savings_contribution,
            progress: PlanProgress::empty(now),
            status: PlanStatus::Active,
        }
    }
}
