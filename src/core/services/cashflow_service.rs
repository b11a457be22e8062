//! Daily income and expense logging with trailing-week rollups.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{require_non_negative, ServiceError, ServiceResult};
use crate::domain::cashflow::{DailyExpense, DailyIncome, WeeklyExpenseTotal};
use crate::domain::portfolio::Portfolio;

pub struct CashflowService;

impl CashflowService {
    /// Logs income for a day. A second entry for the same date replaces the
    /// first.
    pub fn log_income(portfolio: &mut Portfolio, income: DailyIncome) -> ServiceResult<Uuid> {
        require_non_negative(income.amount, "income amount")?;
        Ok(portfolio.upsert_daily_income(income))
    }

    /// Logs a day's expenses, replacing any entry already on that date.
    pub fn log_expense(portfolio: &mut Portfolio, expense: DailyExpense) -> ServiceResult<Uuid> {
        require_non_negative(expense.food_amount, "food amount")?;
        require_non_negative(expense.gas_amount, "gas amount")?;
        require_non_negative(expense.other_amount, "other amount")?;
        Ok(portfolio.upsert_daily_expense(expense))
    }

    pub fn remove_income(portfolio: &mut Portfolio, id: Uuid) -> ServiceResult<DailyIncome> {
        portfolio
            .remove_daily_income(id)
            .ok_or_else(|| ServiceError::Invalid("Income record not found".into()))
    }

    pub fn remove_expense(portfolio: &mut Portfolio, id: Uuid) -> ServiceResult<DailyExpense> {
        portfolio
            .remove_daily_expense(id)
            .ok_or_else(|| ServiceError::Invalid("Expense record not found".into()))
    }

    /// Trailing-7-day income total ending at `today`.
    pub fn weekly_income(portfolio: &Portfolio, today: NaiveDate) -> f64 {
        portfolio.weekly_income_total(today)
    }

    /// Trailing-7-day expense totals ending at `today`.
    pub fn weekly_expenses(portfolio: &Portfolio, today: NaiveDate) -> WeeklyExpenseTotal {
        portfolio.weekly_expense_total(today)
    }
}
