pub mod allocation;
pub mod pacing;
pub mod progress;
pub mod savings;
pub mod services;
pub mod urgency;

pub use allocation::allocate_to_debts;
pub use pacing::{analyze_pacing, compute_pacing, DebtPacing, PacingReport, PacingStatus};
pub use progress::compute_plan_progress;
pub use savings::allocate_to_savings;
pub use urgency::{classify_urgency, UrgencyAssessment};

/// Half-cent rounding used everywhere a dollar figure is emitted.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
