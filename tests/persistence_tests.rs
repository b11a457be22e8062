//! Data-file compatibility: field names and derived values must survive a
//! save/load cycle byte-for-byte in meaning.

use chrono::NaiveDate;
use tempfile::TempDir;

use debt_core::domain::debt::{Debt, DebtKind, Payment, PaymentType, RecurringFrequency};
use debt_core::domain::portfolio::Portfolio;
use debt_core::domain::saving_goal::{GoalPriority, SavingGoal};
use debt_core::storage::{json_backend, JsonStorage, StorageBackend};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_portfolio() -> Portfolio {
    let mut portfolio = Portfolio::new("Household");
    let mut card = Debt::new("Visa", 400.0, date(2025, 1, 1), DebtKind::CreditCard)
        .with_due_date(date(2025, 9, 1))
        .with_interest_rate(24.99);
    card.record_payment(
        Payment::new(60.0, date(2025, 3, 1), PaymentType::Principal).with_note("payday"),
    );
    card.record_payment(Payment::new(12.5, date(2025, 3, 1), PaymentType::Interest));
    portfolio.add_debt(card);

    portfolio.add_debt(Debt::new(
        "Phone",
        600.0,
        date(2025, 2, 1),
        DebtKind::Installment {
            installment_amount: 50.0,
            total_installments: 12,
            completed_installments: 0,
        },
    ));
    portfolio.add_debt(
        Debt::new(
            "Gym",
            0.0,
            date(2025, 1, 1),
            DebtKind::Recurring {
                recurring_amount: 35.0,
                frequency: RecurringFrequency::Monthly,
            },
        )
        .with_due_date(date(2025, 8, 20)),
    );
    portfolio.add_saving_goal(
        SavingGoal::new("Trip", 800.0, GoalPriority::NiceToHave).with_deadline(date(2026, 6, 1)),
    );
    portfolio
}

#[test]
fn portfolio_files_use_the_legacy_field_names() {
    let temp = TempDir::new().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let portfolio = sample_portfolio();
    storage.save(&portfolio, "household").unwrap();

    let raw = std::fs::read_to_string(storage.portfolio_path("household")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let card = &value["debts"][0];
    assert_eq!(card["name"], "Visa");
    assert_eq!(card["totalAmount"], 400.0);
    assert_eq!(card["dueDate"], "2025-09-01");
    assert_eq!(card["startDate"], "2025-01-01");
    assert_eq!(card["interestRate"], 24.99);
    assert_eq!(card["kind"], "credit_card");
    assert_eq!(card["payments"][0]["type"], "principal");
    assert_eq!(card["payments"][1]["type"], "interest");

    let phone = &value["debts"][1];
    assert_eq!(phone["kind"], "installment");
    assert_eq!(phone["installmentAmount"], 50.0);
    assert_eq!(phone["totalInstallments"], 12);
    assert_eq!(phone["completedInstallments"], 0);

    let gym = &value["debts"][2];
    assert_eq!(gym["kind"], "recurring");
    assert_eq!(gym["recurringAmount"], 35.0);
    assert_eq!(gym["recurringFrequency"], "monthly");

    let trip = &value["savingGoals"][0];
    assert_eq!(trip["targetAmount"], 800.0);
    assert_eq!(trip["currentAmount"], 0.0);
    assert_eq!(trip["priority"], "nice_to_have");
    assert_eq!(trip["deadline"], "2026-06-01");
}

#[test]
fn derived_values_survive_the_round_trip() {
    let temp = TempDir::new().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let portfolio = sample_portfolio();
    storage.save(&portfolio, "household").unwrap();
    let loaded = storage.load("household").unwrap();

    let card = &loaded.debts[0];
    assert_eq!(card.remaining_amount(), 340.0);
    assert_eq!(card.interest_paid(), 12.5);
    assert_eq!(card.payments.len(), 2);
    assert_eq!(card.payments[0].note.as_deref(), Some("payday"));

    assert_eq!(loaded.debts, portfolio.debts);
    assert_eq!(loaded.saving_goals, portfolio.saving_goals);
}

#[test]
fn debt_array_exports_reload_into_a_fresh_portfolio() {
    let temp = TempDir::new().unwrap();
    let portfolio = sample_portfolio();
    let path = temp.path().join("debts_export.json");
    json_backend::export_debts_to_path(&portfolio.debts, &path).unwrap();

    let mut fresh = Portfolio::new("Restored");
    for debt in json_backend::import_debts_from_path(&path).unwrap() {
        fresh.add_debt(debt);
    }
    assert_eq!(fresh.debts, portfolio.debts);
}

#[test]
fn untagged_legacy_json_still_parses() {
    // hand-written file in the shape older exports produced
    let raw = r#"{
        "id": "7d2f4c1a-9a1e-4a57-a6a0-2b6f54d3f111",
        "name": "Old loan",
        "totalAmount": 250.0,
        "startDate": "2025-01-15",
        "dueDate": "2025-10-01",
        "createdAt": "2025-01-15T00:00:00Z",
        "payments": [
            {
                "id": "3f0a2b9c-1d2e-4f56-8a7b-9c0d1e2f3a4b",
                "amount": 50.0,
                "date": "2025-02-01",
                "type": "principal"
            }
        ],
        "kind": "loan"
    }"#;
    let debt: Debt = serde_json::from_str(raw).unwrap();
    assert_eq!(debt.kind, DebtKind::Loan);
    assert_eq!(debt.remaining_amount(), 200.0);
    assert!(debt.description.is_none());
    assert!(debt.interest_rate.is_none());
}
