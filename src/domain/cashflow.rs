use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// One day's earned income. A date holds at most one record; re-entry
/// replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyIncome {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DailyIncome {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Identifiable for DailyIncome {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// One day's spending split into the three tracked buckets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyExpense {
    pub id: Uuid,
    pub date: NaiveDate,
    pub food_amount: f64,
    pub gas_amount: f64,
    pub other_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DailyExpense {
    pub fn new(date: NaiveDate, food_amount: f64, gas_amount: f64, other_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            food_amount,
            gas_amount,
            other_amount,
            note: None,
        }
    }

    pub fn total(&self) -> f64 {
        self.food_amount + self.gas_amount + self.other_amount
    }
}

impl Identifiable for DailyExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Trailing-7-day expense totals per bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WeeklyExpenseTotal {
    pub food: f64,
    pub gas: f64,
    pub other: f64,
    pub total: f64,
}

/// Sums income records dated within the trailing seven days of `today`,
/// inclusive on both ends.
pub fn weekly_income_total(incomes: &[DailyIncome], today: NaiveDate) -> f64 {
    let window_start = today - Duration::days(7);
    incomes
        .iter()
        .filter(|income| income.date >= window_start && income.date <= today)
        .map(|income| income.amount)
        .sum()
}

/// Sums expense records dated within the trailing seven days of `today`.
pub fn weekly_expense_total(expenses: &[DailyExpense], today: NaiveDate) -> WeeklyExpenseTotal {
    let window_start = today - Duration::days(7);
    expenses
        .iter()
        .filter(|expense| expense.date >= window_start && expense.date <= today)
        .fold(WeeklyExpenseTotal::default(), |mut totals, expense| {
            totals.food += expense.food_amount;
            totals.gas += expense.gas_amount;
            totals.other += expense.other_amount;
            totals.total += expense.total();
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_income_only_counts_trailing_window() {
        let incomes = vec![
            DailyIncome::new(date(2025, 8, 10), 100.0),
            DailyIncome::new(date(2025, 8, 14), 50.0),
            DailyIncome::new(date(2025, 8, 1), 400.0),
            DailyIncome::new(date(2025, 8, 20), 75.0),
        ];
        let total = weekly_income_total(&incomes, date(2025, 8, 15));
        assert_eq!(total, 150.0);
    }

    #[test]
    fn weekly_expenses_split_buckets() {
        let expenses = vec![
            DailyExpense::new(date(2025, 8, 12), 20.0, 30.0, 10.0),
            DailyExpense::new(date(2025, 8, 13), 15.0, 0.0, 5.0),
            DailyExpense::new(date(2025, 7, 1), 99.0, 99.0, 99.0),
        ];
        let totals = weekly_expense_total(&expenses, date(2025, 8, 15));
        assert_eq!(totals.food, 35.0);
        assert_eq!(totals.gas, 30.0);
        assert_eq!(totals.other, 15.0);
        assert_eq!(totals.total, 80.0);
    }
}
