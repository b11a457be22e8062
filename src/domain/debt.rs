use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A single payment recorded against a debt. Payments are append-only and
/// deleted by id; there is no update-in-place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
}

impl Payment {
    pub fn new(amount: f64, date: NaiveDate, payment_type: PaymentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            note: None,
            payment_type,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether this payment reduces the outstanding balance.
    pub fn is_principal(&self) -> bool {
        matches!(self.payment_type, PaymentType::Principal)
    }
}

/// Only `Principal` payments reduce the outstanding balance; `Interest` and
/// `Fee` are recorded for informational totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Principal,
    Interest,
    Fee,
}

/// Cycle length for recurring obligations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl RecurringFrequency {
    /// Days a payment pushes the due date forward.
    pub fn day_offset(&self) -> i64 {
        match self {
            RecurringFrequency::Weekly => 7,
            RecurringFrequency::Biweekly => 15,
            RecurringFrequency::Monthly => 30,
        }
    }
}

/// Kind-specific shape of a debt. Serialized with a `kind` tag so legacy data
/// files round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DebtKind {
    Loan,
    CreditCard,
    Installment {
        #[serde(rename = "installmentAmount")]
        installment_amount: f64,
        #[serde(rename = "totalInstallments")]
        total_installments: u32,
        #[serde(rename = "completedInstallments", default)]
        completed_installments: u32,
    },
    Recurring {
        #[serde(rename = "recurringAmount")]
        recurring_amount: f64,
        #[serde(rename = "recurringFrequency")]
        frequency: RecurringFrequency,
    },
    Other,
}

/// An obligation being paid down: loan, credit card, installment plan,
/// recurring bill, or anything else with a balance and a due date.
///
/// Recurring debts conventionally carry `total_amount = 0`; they have no
/// terminal balance and roll their due date forward on every payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub total_amount: f64,
    /// Annual percentage, informational only. Never used in amortization math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    pub start_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DebtKind,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        total_amount: f64,
        start_date: NaiveDate,
        kind: DebtKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            total_amount,
            interest_rate: None,
            start_date,
            due_date: None,
            payments: Vec::new(),
            created_at: Utc::now(),
            kind,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_interest_rate(mut self, rate: f64) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    /// Sum of all principal-type payments, all-time.
    pub fn principal_paid(&self) -> f64 {
        self.payments
            .iter()
            .filter(|p| p.is_principal())
            .map(|p| p.amount)
            .sum()
    }

    /// Sum of principal-type payments dated on or after `from`.
    pub fn principal_paid_since(&self, from: NaiveDate) -> f64 {
        self.payments
            .iter()
            .filter(|p| p.is_principal() && p.date >= from)
            .map(|p| p.amount)
            .sum()
    }

    /// Informational interest total.
    pub fn interest_paid(&self) -> f64 {
        self.payments
            .iter()
            .filter(|p| matches!(p.payment_type, PaymentType::Interest))
            .map(|p| p.amount)
            .sum()
    }

    /// Informational fee total.
    pub fn fees_paid(&self) -> f64 {
        self.payments
            .iter()
            .filter(|p| matches!(p.payment_type, PaymentType::Fee))
            .map(|p| p.amount)
            .sum()
    }

    /// Outstanding principal balance, floored at zero.
    pub fn remaining_amount(&self) -> f64 {
        (self.total_amount - self.principal_paid()).max(0.0)
    }

    /// A debt is active while principal remains. Recurring debts carry a zero
    /// balance by construction, so they fall out of principal-paydown views.
    pub fn is_active(&self) -> bool {
        self.remaining_amount() > 0.0
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self.kind, DebtKind::Recurring { .. })
    }

    pub fn payment(&self, payment_id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == payment_id)
    }

    /// Appends a payment and applies the kind-specific bookkeeping:
    /// installment counters resync, recurring due dates roll forward by the
    /// frequency offset from the payment's date.
    pub fn record_payment(&mut self, payment: Payment) {
        let payment_date = payment.date;
        self.payments.push(payment);
        match &self.kind {
            DebtKind::Installment { .. } => self.sync_installments(),
            DebtKind::Recurring { frequency, .. } => {
                self.due_date = Some(payment_date + Duration::days(frequency.day_offset()));
            }
            _ => {}
        }
    }

    /// Removes a payment by id, resyncing installment counters. The recurring
    /// due date is not rolled back; the obligation only moves forward.
    pub fn remove_payment(&mut self, payment_id: Uuid) -> Option<Payment> {
        let index = self.payments.iter().position(|p| p.id == payment_id)?;
        let removed = self.payments.remove(index);
        if matches!(self.kind, DebtKind::Installment { .. }) {
            self.sync_installments();
        }
        Some(removed)
    }

    fn sync_installments(&mut self) {
        let principal = self.principal_paid();
        if let DebtKind::Installment {
            installment_amount,
            total_installments,
            completed_installments,
        } = &mut self.kind
        {
            if *installment_amount > 0.0 {
                let completed = (principal / *installment_amount).floor() as u32;
                *completed_installments = completed.min(*total_installments);
            }
        }
    }
}

impl Identifiable for Debt {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Debt {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Debt {
    fn display_label(&self) -> String {
        format!("{} (${:.2} remaining)", self.name, self.remaining_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(total: f64) -> Debt {
        Debt::new("Car", total, date(2025, 1, 1), DebtKind::Loan)
    }

    #[test]
    fn remaining_amount_never_increases_with_payments() {
        let mut debt = loan(500.0);
        let mut previous = debt.remaining_amount();
        for amount in [100.0, 250.0, 300.0] {
            debt.record_payment(Payment::new(amount, date(2025, 2, 1), PaymentType::Principal));
            let current = debt.remaining_amount();
            assert!(current <= previous, "remaining grew from {previous} to {current}");
            previous = current;
        }
        assert_eq!(debt.remaining_amount(), 0.0);
    }

    #[test]
    fn interest_and_fee_payments_do_not_reduce_balance() {
        let mut debt = loan(500.0);
        debt.record_payment(Payment::new(50.0, date(2025, 2, 1), PaymentType::Interest));
        debt.record_payment(Payment::new(25.0, date(2025, 2, 1), PaymentType::Fee));
        assert_eq!(debt.remaining_amount(), 500.0);
        assert_eq!(debt.interest_paid(), 50.0);
        assert_eq!(debt.fees_paid(), 25.0);
    }

    #[test]
    fn installment_counter_tracks_principal_and_caps_at_total() {
        let mut debt = Debt::new(
            "Phone",
            600.0,
            date(2025, 1, 1),
            DebtKind::Installment {
                installment_amount: 50.0,
                total_installments: 12,
                completed_installments: 0,
            },
        );
        debt.record_payment(Payment::new(125.0, date(2025, 2, 1), PaymentType::Principal));
        assert!(matches!(
            debt.kind,
            DebtKind::Installment { completed_installments: 2, .. }
        ));

        debt.record_payment(Payment::new(900.0, date(2025, 3, 1), PaymentType::Principal));
        assert!(matches!(
            debt.kind,
            DebtKind::Installment { completed_installments: 12, .. }
        ));

        let first = debt.payments[0].id;
        debt.remove_payment(first);
        assert!(matches!(
            debt.kind,
            DebtKind::Installment { completed_installments: 12, .. }
        ));
    }

    #[test]
    fn installment_counter_resyncs_after_delete() {
        let mut debt = Debt::new(
            "Sofa",
            300.0,
            date(2025, 1, 1),
            DebtKind::Installment {
                installment_amount: 100.0,
                total_installments: 3,
                completed_installments: 0,
            },
        );
        let payment = Payment::new(200.0, date(2025, 2, 1), PaymentType::Principal);
        let payment_id = payment.id;
        debt.record_payment(payment);
        assert!(matches!(
            debt.kind,
            DebtKind::Installment { completed_installments: 2, .. }
        ));
        debt.remove_payment(payment_id);
        assert!(matches!(
            debt.kind,
            DebtKind::Installment { completed_installments: 0, .. }
        ));
    }

    #[test]
    fn recurring_payment_advances_due_date_from_payment_date() {
        let cases = [
            (RecurringFrequency::Weekly, 7),
            (RecurringFrequency::Biweekly, 15),
            (RecurringFrequency::Monthly, 30),
        ];
        for (frequency, days) in cases {
            let mut debt = Debt::new(
                "Internet",
                0.0,
                date(2025, 1, 1),
                DebtKind::Recurring {
                    recurring_amount: 30.0,
                    frequency,
                },
            )
            .with_due_date(date(2025, 3, 1));
            let paid_on = date(2025, 4, 10);
            debt.record_payment(Payment::new(30.0, paid_on, PaymentType::Principal));
            assert_eq!(
                debt.due_date,
                Some(paid_on + Duration::days(days)),
                "frequency {frequency:?} should advance {days} days from the payment date"
            );
        }
    }

    #[test]
    fn kind_serializes_with_legacy_tag_and_field_names() {
        let debt = Debt::new(
            "Acura",
            595.0,
            date(2025, 1, 1),
            DebtKind::Installment {
                installment_amount: 49.58,
                total_installments: 12,
                completed_installments: 0,
            },
        );
        let value = serde_json::to_value(&debt).unwrap();
        assert_eq!(value["kind"], "installment");
        assert_eq!(value["installmentAmount"], 49.58);
        assert_eq!(value["totalInstallments"], 12);
        assert_eq!(value["totalAmount"], 595.0);

        let card = Debt::new("Visa", 100.0, date(2025, 1, 1), DebtKind::CreditCard);
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["kind"], "credit_card");
    }
}
