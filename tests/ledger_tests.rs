mod common;

use std::io;

use common::{date, make_expense, make_income, sample_transactions};
use finance_planner::error::{FinanceError, Result, ValidationError};
use finance_planner::form::TransactionForm;
use finance_planner::ledger::Ledger;
use finance_planner::models::{CategoryType, Transaction};
use finance_planner::storage::{CsvStorage, LedgerStorage, MemoryStorage};
use rust_decimal_macros::dec;

/// Storage whose every operation fails, as with an unreadable data file
struct BrokenStorage;

impl LedgerStorage for BrokenStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        Err(FinanceError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        )))
    }

    fn save(&mut self, _transactions: &[Transaction]) -> Result<()> {
        Err(FinanceError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        )))
    }
}

#[test]
fn test_open_loads_existing_transactions() {
    let ledger = Ledger::open(MemoryStorage::with_transactions(sample_transactions()));

    assert_eq!(ledger.len(), 8);
    assert_eq!(ledger.transactions(), sample_transactions().as_slice());
    assert_eq!(ledger.balance(), dec!(68499.50));
}

#[test]
fn test_open_degrades_to_empty_on_error() {
    let ledger = Ledger::open(BrokenStorage);

    assert!(ledger.is_empty());
    assert_eq!(ledger.balance(), dec!(0));
}

#[test]
fn test_try_open_propagates_error() {
    assert!(matches!(
        Ledger::try_open(BrokenStorage),
        Err(FinanceError::Io(_))
    ));
}

#[test]
fn test_add_appends_and_saves_everything() {
    let mut ledger = Ledger::open(MemoryStorage::with_transactions(sample_transactions()));

    ledger
        .add(make_expense(dec!(499.50), "Books", date(2024, 3, 1)))
        .unwrap();

    assert_eq!(ledger.len(), 9);
    assert_eq!(ledger.storage().save_count(), 1);
    assert_eq!(ledger.storage().stored().len(), 9);
    assert_eq!(ledger.storage().stored()[8].category().name(), "Books");
    assert_eq!(ledger.balance(), dec!(68000));
}

#[test]
fn test_failed_save_keeps_transaction_in_memory() {
    let mut ledger = Ledger::open(BrokenStorage);

    let result = ledger.add(make_income(dec!(10), "Gift", date(2024, 1, 1)));

    assert!(result.is_err());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_summary_matches_transactions() {
    let ledger = Ledger::open(MemoryStorage::with_transactions(sample_transactions()));

    let summary = ledger.summary();

    assert_eq!(summary.income, dec!(103000));
    assert_eq!(summary.expense, dec!(34500.50));
}

#[test]
fn test_ledger_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("finances.csv");

    {
        let mut ledger = Ledger::open(CsvStorage::new(&path));
        assert!(ledger.is_empty());
        let tx = TransactionForm::new("-350", "Taxi", "2024-05-04", "airport")
            .parse()
            .unwrap();
        ledger.add(tx).unwrap();
        let tx = TransactionForm::new("1200", "Cashback", "2024-05-05", "")
            .parse()
            .unwrap();
        ledger.add(tx).unwrap();
    }

    let reopened = Ledger::open(CsvStorage::new(&path));
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.transactions()[0].comment(), "airport");
    assert_eq!(reopened.balance(), dec!(850));
}

#[test]
fn test_form_positive_amount_is_income() {
    let tx = TransactionForm::new("1500.75", "Salary", "2024-01-31", " bonus ")
        .parse()
        .unwrap();

    assert_eq!(tx.amount(), dec!(1500.75));
    assert_eq!(tx.category_type(), CategoryType::Income);
    assert_eq!(tx.date(), date(2024, 1, 31));
    assert_eq!(tx.comment(), "bonus");
}

#[test]
fn test_form_negative_amount_is_expense() {
    let tx = TransactionForm::new("-20", " Coffee ", "2024-01-31", "")
        .parse()
        .unwrap();

    assert_eq!(tx.category_type(), CategoryType::Expense);
    assert_eq!(tx.category().name(), "Coffee");
}

#[test]
fn test_form_rejects_bad_amount() {
    assert_eq!(
        TransactionForm::new("", "Food", "2024-01-01", "").parse(),
        Err(ValidationError::EmptyAmount)
    );
    assert_eq!(
        TransactionForm::new("ten", "Food", "2024-01-01", "").parse(),
        Err(ValidationError::InvalidAmount("ten".to_string()))
    );
    assert_eq!(
        TransactionForm::new("0", "Food", "2024-01-01", "").parse(),
        Err(ValidationError::ZeroAmount)
    );
}

#[test]
fn test_form_rejects_empty_category() {
    assert_eq!(
        TransactionForm::new("-5", "  ", "2024-01-01", "").parse(),
        Err(ValidationError::EmptyCategoryName)
    );
}

#[test]
fn test_form_rejects_bad_date() {
    assert_eq!(
        TransactionForm::new("-5", "Food", "01.02.2024", "").parse(),
        Err(ValidationError::InvalidDate("01.02.2024".to_string()))
    );
}

#[test]
fn test_form_reports_first_field_error() {
    // Both amount and category are wrong; the amount comes first
    assert_eq!(
        TransactionForm::new("", "", "nope", "").parse(),
        Err(ValidationError::EmptyAmount)
    );
}

#[test]
fn test_snapshot_copies_source_without_touching_it() {
    let source = MemoryStorage::with_transactions(sample_transactions());

    let mut ledger = Ledger::open(MemoryStorage::snapshot(&source));
    ledger
        .add(make_income(dec!(10), "Gift", date(2024, 3, 1)))
        .unwrap();

    assert_eq!(ledger.len(), 9);
    assert_eq!(source.stored(), sample_transactions().as_slice());
    assert_eq!(source.save_count(), 0);
}

#[test]
fn test_snapshot_of_unreadable_source_starts_empty() {
    let snapshot = MemoryStorage::snapshot(&BrokenStorage);

    assert!(snapshot.stored().is_empty());
    assert_eq!(snapshot.save_count(), 0);
}
