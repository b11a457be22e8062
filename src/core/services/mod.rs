pub mod cashflow_service;
pub mod debt_service;
pub mod plan_service;
pub mod savings_service;

pub use cashflow_service::CashflowService;
pub use debt_service::DebtService;
pub use plan_service::PlanService;
pub use savings_service::SavingsService;

use crate::errors::PlannerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("{0}")]
    Invalid(String),
}

pub(crate) fn require_name(name: &str, what: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::Invalid(format!("{what} name cannot be empty")));
    }
    Ok(())
}

pub(crate) fn require_positive(value: f64, what: &str) -> ServiceResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ServiceError::Invalid(format!("{what} must be positive")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(value: f64, what: &str) -> ServiceResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ServiceError::Invalid(format!(
            "{what} cannot be negative"
        )));
    }
    Ok(())
}
