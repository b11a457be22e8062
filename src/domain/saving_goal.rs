use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// Priority band used to weight savings allocations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Essential,
    Important,
    NiceToHave,
}

impl GoalPriority {
    pub fn weight(&self) -> f64 {
        match self {
            GoalPriority::Essential => 3.0,
            GoalPriority::Important => 2.0,
            GoalPriority::NiceToHave => 1.0,
        }
    }
}

impl Default for GoalPriority {
    fn default() -> Self {
        GoalPriority::Important
    }
}

/// A savings target. `current_amount` never exceeds `target_amount`; the
/// dedicated contribute operation clamps on the way in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_contribution_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contribution_note: Option<String>,
}

impl SavingGoal {
    pub fn new(name: impl Into<String>, target_amount: f64, priority: GoalPriority) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline: None,
            priority,
            notes: None,
            created_at: now,
            updated_at: now,
            last_contribution_at: None,
            last_contribution_note: None,
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Amount still needed to reach the target.
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_funded(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Adds to the goal, clamped at the target, stamping the contribution
    /// metadata.
    pub fn contribute(&mut self, amount: f64, note: Option<String>, now: DateTime<Utc>) {
        self.current_amount = (self.current_amount + amount).min(self.target_amount);
        self.updated_at = now;
        self.last_contribution_at = Some(now);
        if note.is_some() {
            self.last_contribution_note = note;
        }
    }
}

impl Identifiable for SavingGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for SavingGoal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for SavingGoal {
    fn display_label(&self) -> String {
        format!(
            "{} (${:.2} of ${:.2})",
            self.name, self.current_amount, self.target_amount
        )
    }
}
