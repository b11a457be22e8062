use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    cashflow::{self, DailyExpense, DailyIncome, WeeklyExpenseTotal},
    debt::{Debt, Payment},
    saving_goal::SavingGoal,
};

/// The in-memory aggregate every computation runs against: debts with their
/// payments, savings goals, and the daily income/expense logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub name: String,
    pub debts: Vec<Debt>,
    pub saving_goals: Vec<SavingGoal>,
    pub daily_incomes: Vec<DailyIncome>,
    pub daily_expenses: Vec<DailyExpense>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            debts: Vec::new(),
            saving_goals: Vec::new(),
            daily_incomes: Vec::new(),
            daily_expenses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // ---- debts -------------------------------------------------------------

    pub fn add_debt(&mut self, debt: Debt) -> Uuid {
        let id = debt.id;
        self.debts.push(debt);
        self.touch();
        id
    }

    pub fn debt(&self, id: Uuid) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id == id)
    }

    pub fn debt_mut(&mut self, id: Uuid) -> Option<&mut Debt> {
        self.debts.iter_mut().find(|d| d.id == id)
    }

    pub fn remove_debt(&mut self, id: Uuid) -> Option<Debt> {
        let index = self.debts.iter().position(|d| d.id == id)?;
        let removed = self.debts.remove(index);
        self.touch();
        Some(removed)
    }

    /// Debts with principal still outstanding. Recurring debts carry a zero
    /// balance and are absent here; they are a fixed expense line, not a
    /// paydown target.
    pub fn active_debts(&self) -> Vec<&Debt> {
        self.debts.iter().filter(|d| d.is_active()).collect()
    }

    /// Appends a payment to the named debt, applying the kind-specific
    /// invariants. Returns `None` when the debt does not exist.
    pub fn add_payment(&mut self, debt_id: Uuid, payment: Payment) -> Option<Uuid> {
        let debt = self.debt_mut(debt_id)?;
        let payment_id = payment.id;
        debt.record_payment(payment);
        self.touch();
        Some(payment_id)
    }

    pub fn remove_payment(&mut self, debt_id: Uuid, payment_id: Uuid) -> Option<Payment> {
        let debt = self.debt_mut(debt_id)?;
        let removed = debt.remove_payment(payment_id)?;
        self.touch();
        Some(removed)
    }

    // ---- saving goals ------------------------------------------------------

    pub fn add_saving_goal(&mut self, goal: SavingGoal) -> Uuid {
        let id = goal.id;
        self.saving_goals.push(goal);
        self.touch();
        id
    }

    pub fn saving_goal(&self, id: Uuid) -> Option<&SavingGoal> {
        self.saving_goals.iter().find(|g| g.id == id)
    }

    pub fn saving_goal_mut(&mut self, id: Uuid) -> Option<&mut SavingGoal> {
        self.saving_goals.iter_mut().find(|g| g.id == id)
    }

    pub fn remove_saving_goal(&mut self, id: Uuid) -> Option<SavingGoal> {
        let index = self.saving_goals.iter().position(|g| g.id == id)?;
        let removed = self.saving_goals.remove(index);
        self.touch();
        Some(removed)
    }

    /// Goals still short of their target.
    pub fn unfunded_goals(&self) -> Vec<&SavingGoal> {
        self.saving_goals.iter().filter(|g| !g.is_funded()).collect()
    }

    // ---- cash-flow log -----------------------------------------------------

    /// Inserts or replaces the income record for the given date.
    pub fn upsert_daily_income(&mut self, income: DailyIncome) -> Uuid {
        let id = income.id;
        match self.daily_incomes.iter_mut().find(|i| i.date == income.date) {
            Some(existing) => {
                let id = existing.id;
                existing.amount = income.amount;
                existing.note = income.note;
                self.touch();
                return id;
            }
            None => self.daily_incomes.push(income),
        }
        self.touch();
        id
    }

    pub fn remove_daily_income(&mut self, id: Uuid) -> Option<DailyIncome> {
        let index = self.daily_incomes.iter().position(|i| i.id == id)?;
        let removed = self.daily_incomes.remove(index);
        self.touch();
        Some(removed)
    }

    /// Inserts or replaces the expense record for the given date.
    pub fn upsert_daily_expense(&mut self, expense: DailyExpense) -> Uuid {
        let id = expense.id;
        match self
            .daily_expenses
            .iter_mut()
            .find(|e| e.date == expense.date)
        {
            Some(existing) => {
                let id = existing.id;
                existing.food_amount = expense.food_amount;
                existing.gas_amount = expense.gas_amount;
                existing.other_amount = expense.other_amount;
                existing.note = expense.note;
                self.touch();
                return id;
            }
            None => self.daily_expenses.push(expense),
        }
        self.touch();
        id
    }

    pub fn remove_daily_expense(&mut self, id: Uuid) -> Option<DailyExpense> {
        let index = self.daily_expenses.iter().position(|e| e.id == id)?;
        let removed = self.daily_expenses.remove(index);
        self.touch();
        Some(removed)
    }

    /// Trailing-7-day income total ending at `today`.
    pub fn weekly_income_total(&self, today: NaiveDate) -> f64 {
        cashflow::weekly_income_total(&self.daily_incomes, today)
    }

    /// Trailing-7-day expense totals ending at `today`.
    pub fn weekly_expense_total(&self, today: NaiveDate) -> WeeklyExpenseTotal {
        cashflow::weekly_expense_total(&self.daily_expenses, today)
    }

    // ---- due-date watch ----------------------------------------------------

    /// Debts due within the notification window: three days ahead through one
    /// day late, soonest first. Recurring bills always qualify; their zero
    /// balance would otherwise hide them.
    pub fn upcoming_due_dates(&self, today: NaiveDate) -> Vec<(&Debt, i64)> {
        let mut upcoming: Vec<(&Debt, i64)> = self
            .debts
            .iter()
            .filter(|d| d.is_active() || d.is_recurring())
            .filter_map(|d| {
                let due = d.due_date?;
                let days_left = (due - today).num_days();
                (-1..=3).contains(&days_left).then_some((d, days_left))
            })
            .collect();
        upcoming.sort_by_key(|(_, days_left)| *days_left);
        upcoming
    }
}
