//! Group-by-and-sum aggregation over the transaction list.
//!
//! Income and expense are split by the sign of the amount. Expense totals
//! are reported as positive magnitudes. Totals that would leave the
//! Decimal range are clamped to `Decimal::MAX` / `Decimal::MIN`.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Transaction;

/// Totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Sum of positive amounts
    pub income: Decimal,
    /// Sum of the magnitudes of negative amounts
    pub expense: Decimal,
    /// `income - expense`
    pub balance: Decimal,
}

/// Sum of amounts for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Income and expense for one day or month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotal {
    /// The day, or the first day of the month for monthly totals
    pub period: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

impl PeriodTotal {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();

    for tx in transactions {
        if tx.is_income() {
            accumulate(&mut summary.income, tx.amount());
        } else {
            accumulate(&mut summary.expense, tx.amount().abs());
        }
    }

    summary.balance = summary.income - summary.expense;
    summary
}

/// Signed sum of amounts per category name, ordered by name
pub fn category_summary(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();

    for tx in transactions {
        accumulate(totals.entry(tx.category().name()).or_insert(Decimal::ZERO), tx.amount());
    }

    into_category_totals(totals)
}

/// Expense magnitudes per category name, ordered by name
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        accumulate(
            totals.entry(tx.category().name()).or_insert(Decimal::ZERO),
            tx.amount().abs(),
        );
    }

    into_category_totals(totals)
}

/// The `n` categories with the largest expenses, largest first.
///
/// Ties are broken by category name.
pub fn top_expenses(transactions: &[Transaction], n: usize) -> Vec<CategoryTotal> {
    let mut totals = expenses_by_category(transactions);
    // Stable sort keeps the name order from the BTreeMap for equal totals
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(n);
    totals
}

/// Income and expense per calendar day, in date order
pub fn daily_totals(transactions: &[Transaction]) -> Vec<PeriodTotal> {
    totals_by_period(transactions, |date| date)
}

/// Income and expense per calendar month, in date order
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<PeriodTotal> {
    totals_by_period(transactions, first_of_month)
}

/// Add `amount` to `total`, clamping at the Decimal range instead of panicking
fn accumulate(total: &mut Decimal, amount: Decimal) {
    *total = total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!("Total overflowed the amount range, clamping");
        if amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    });
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn totals_by_period(
    transactions: &[Transaction],
    period_of: impl Fn(NaiveDate) -> NaiveDate,
) -> Vec<PeriodTotal> {
    let mut periods: BTreeMap<NaiveDate, PeriodTotal> = BTreeMap::new();

    for tx in transactions {
        let period = period_of(tx.date());
        let entry = periods.entry(period).or_insert(PeriodTotal {
            period,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        });

        if tx.is_income() {
            accumulate(&mut entry.income, tx.amount());
        } else {
            accumulate(&mut entry.expense, tx.amount().abs());
        }
    }

    periods.into_values().collect()
}

fn into_category_totals(totals: BTreeMap<&str, Decimal>) -> Vec<CategoryTotal> {
    totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect()
}
