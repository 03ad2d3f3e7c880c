use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::category::{Category, CategoryType};
use super::record::TransactionRecord;
use crate::error::ValidationError;

/// A single recorded monetary event.
///
/// Positive amounts are income, negative amounts are expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    amount: Decimal,
    category: Category,
    date: NaiveDate,
    comment: String,
}

impl Transaction {
    /// Create a transaction, rejecting a zero amount and trimming the comment
    pub fn new(
        amount: Decimal,
        category: Category,
        date: NaiveDate,
        comment: &str,
    ) -> Result<Self, ValidationError> {
        if amount.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }

        Ok(Self {
            amount,
            category,
            date,
            comment: comment.trim().to_string(),
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn category_type(&self) -> CategoryType {
        self.category.category_type()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Flatten into the row written to the CSV file
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord::from(self)
    }
}
