use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryType};
use super::transaction::Transaction;
use crate::error::ValidationError;
use crate::validation::parse_date;

/// Date format used in the CSV file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One CSV row: `amount,category,type,date,comment`
///
/// Dates stay as text here so that a malformed date is reported through
/// the same validation path as any other bad field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub date: String,
    #[serde(default)]
    pub comment: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        Self {
            amount: tx.amount(),
            category: tx.category().name().to_string(),
            category_type: tx.category_type(),
            date: tx.date().format(DATE_FORMAT).to_string(),
            comment: tx.comment().to_string(),
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let category = Category::new(&record.category, record.category_type)?;
        let date = parse_date(&record.date)?;
        Transaction::new(record.amount, category, date, &record.comment)
    }
}

/// Read the amount as text and parse it as a Decimal.
///
/// Left to itself the CSV reader would hand numeric cells over as `u64` or
/// `f64`, losing digits past f64 precision and rejecting integers wider
/// than 64 bits.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    let s = String::deserialize(deserializer)?;
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(de::Error::custom)
}
