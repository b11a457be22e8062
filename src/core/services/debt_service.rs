//! Validated CRUD helpers for debts and their payments.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::pacing::{analyze_pacing, PacingReport};
use crate::core::services::{require_name, require_non_negative, require_positive, ServiceError, ServiceResult};
use crate::domain::debt::{Debt, Payment};
use crate::domain::portfolio::Portfolio;

pub struct DebtService;

impl DebtService {
    /// Adds a new debt and returns its identifier.
    pub fn add(portfolio: &mut Portfolio, debt: Debt) -> ServiceResult<Uuid> {
        require_name(&debt.name, "debt")?;
        require_non_negative(debt.total_amount, "debt total amount")?;
        Ok(portfolio.add_debt(debt))
    }

    /// Updates the debt identified by `id` via the provided mutator.
    pub fn update<F>(portfolio: &mut Portfolio, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Debt),
    {
        let debt = portfolio
            .debt_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Debt not found".into()))?;
        mutator(debt);
        portfolio.touch();
        Ok(())
    }

    /// Removes the debt identified by `id`, returning the removed instance.
    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> ServiceResult<Debt> {
        portfolio
            .remove_debt(id)
            .ok_or_else(|| ServiceError::Invalid("Debt not found".into()))
    }

    /// Records a payment against a debt and returns the payment's identifier.
    pub fn record_payment(
        portfolio: &mut Portfolio,
        debt_id: Uuid,
        payment: Payment,
    ) -> ServiceResult<Uuid> {
        require_positive(payment.amount, "payment amount")?;
        portfolio
            .add_payment(debt_id, payment)
            .ok_or_else(|| ServiceError::Invalid("Debt not found".into()))
    }

    /// Deletes a payment, returning the removed record.
    pub fn remove_payment(
        portfolio: &mut Portfolio,
        debt_id: Uuid,
        payment_id: Uuid,
    ) -> ServiceResult<Payment> {
        if portfolio.debt(debt_id).is_none() {
            return Err(ServiceError::Invalid("Debt not found".into()));
        }
        portfolio
            .remove_payment(debt_id, payment_id)
            .ok_or_else(|| ServiceError::Invalid("Payment not found".into()))
    }

    /// Snapshot of all debts.
    pub fn list(portfolio: &Portfolio) -> Vec<&Debt> {
        portfolio.debts.iter().collect()
    }

    /// Pacing verdicts across active non-recurring debts.
    pub fn pacing(portfolio: &Portfolio, today: NaiveDate) -> PacingReport {
        analyze_pacing(&portfolio.debts, today)
    }

    /// Active debts due within the notification window, soonest first.
    pub fn upcoming_due_dates(portfolio: &Portfolio, today: NaiveDate) -> Vec<(&Debt, i64)> {
        portfolio.upcoming_due_dates(today)
    }
}
