use chrono::NaiveDate;
use finance_planner::models::{Category, CategoryType, Transaction};
use rust_decimal::Decimal;

/// Helper to build a date from its parts
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Helper to create a transaction; the category type follows the sign
pub fn make_transaction(amount: Decimal, category: &str, on: NaiveDate, comment: &str) -> Transaction {
    let category_type = if amount > Decimal::ZERO {
        CategoryType::Income
    } else {
        CategoryType::Expense
    };
    let category = Category::new(category, category_type).unwrap();
    Transaction::new(amount, category, on, comment).unwrap()
}

/// Helper to create an income transaction without a comment
pub fn make_income(amount: Decimal, category: &str, on: NaiveDate) -> Transaction {
    make_transaction(amount, category, on, "")
}

/// Helper to create an expense; `amount` is the positive magnitude
pub fn make_expense(amount: Decimal, category: &str, on: NaiveDate) -> Transaction {
    make_transaction(-amount, category, on, "")
}

/// The transactions stored in `tests/fixtures/finances.csv`
pub fn sample_transactions() -> Vec<Transaction> {
    use rust_decimal_macros::dec;

    vec![
        make_transaction(dec!(50000), "Salary", date(2024, 1, 5), "January salary"),
        make_transaction(dec!(-1200.50), "Groceries", date(2024, 1, 7), "Weekly shop"),
        make_expense(dec!(15000), "Rent", date(2024, 1, 10)),
        make_expense(dec!(800), "Groceries", date(2024, 1, 21)),
        make_transaction(dec!(50000), "Salary", date(2024, 2, 5), "February salary"),
        make_expense(dec!(15000), "Rent", date(2024, 2, 10)),
        make_transaction(dec!(-2500), "Transport", date(2024, 2, 12), "Monthly pass"),
        make_transaction(dec!(3000), "Freelance", date(2024, 2, 20), "Logo design"),
    ]
}

/// Create a data-file CSV from `(amount, category, type, date, comment)` rows
pub fn build_csv(rows: &[(&str, &str, &str, &str, &str)]) -> String {
    let mut csv = String::from("amount,category,type,date,comment\n");

    for (amount, category, category_type, date, comment) in rows {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            amount, category, category_type, date, comment
        ));
    }

    csv
}

/// Run a CSV string through the category summary and return the output
pub fn summarize_csv_string(csv_input: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut output = Vec::new();
    finance_planner::summarize_csv(csv_input.as_bytes(), &mut output)?;
    Ok(String::from_utf8(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_make_expense_is_negative() {
        let tx = make_expense(dec!(42), "Food", date(2024, 1, 1));
        assert_eq!(tx.amount(), dec!(-42));
        assert_eq!(tx.category_type(), CategoryType::Expense);
    }

    #[test]
    fn test_build_csv() {
        let csv = build_csv(&[
            ("100", "Salary", "income", "2024-01-01", "note"),
            ("-5", "Food", "expense", "2024-01-02", ""),
        ]);

        assert!(csv.starts_with("amount,category,type,date,comment\n"));
        assert!(csv.contains("100,Salary,income,2024-01-01,note\n"));
        assert!(csv.contains("-5,Food,expense,2024-01-02,\n"));
    }

    #[test]
    fn test_sample_transactions_match_fixture_size() {
        assert_eq!(sample_transactions().len(), 8);
    }
}
