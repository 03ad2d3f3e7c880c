use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{Category, CategoryType, Transaction};
use crate::validation::{parse_amount, parse_date};

/// Raw user input for a new transaction, one string per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub category: String,
    pub date: String,
    pub comment: String,
}

impl TransactionForm {
    pub fn new(amount: &str, category: &str, date: &str, comment: &str) -> Self {
        Self {
            amount: amount.to_string(),
            category: category.to_string(),
            date: date.to_string(),
            comment: comment.to_string(),
        }
    }

    /// Validate the fields and build a transaction.
    ///
    /// Fields are checked in form order (amount, category, date), so the
    /// first problem the user sees is the topmost one. The category type
    /// follows the amount's sign.
    pub fn parse(&self) -> Result<Transaction, ValidationError> {
        let amount = parse_amount(&self.amount)?;

        let category_name = self.category.trim();
        if category_name.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }

        let date = parse_date(&self.date)?;

        let category = Category::new(category_name, category_type_for(amount))?;
        Transaction::new(amount, category, date, &self.comment)
    }
}

fn category_type_for(amount: Decimal) -> CategoryType {
    if amount > Decimal::ZERO {
        CategoryType::Income
    } else {
        CategoryType::Expense
    }
}
