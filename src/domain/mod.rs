pub mod cashflow;
pub mod common;
pub mod debt;
pub mod plan;
pub mod portfolio;
pub mod saving_goal;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use debt::{Debt, DebtKind, Payment, PaymentType, RecurringFrequency};
pub use plan::{
    DebtPriority, DebtRecommendation, PlanProgress, PlanStatus, SavedFinancialPlan,
    SavingsRecommendation,
};
pub use portfolio::Portfolio;
pub use saving_goal::{GoalPriority, SavingGoal};
