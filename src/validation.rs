//! Input validation and formatting helpers shared by the form and the views.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ValidationError;
use crate::models::record::DATE_FORMAT;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid")
    })
}

/// Check that `date_str` is written as `YYYY-MM-DD` and names a real calendar day.
///
/// Both checks are needed: chrono alone accepts `2023-1-01`, and the pattern
/// alone accepts `2023-02-30`.
pub fn is_valid_date(date_str: &str) -> bool {
    date_pattern().is_match(date_str) && NaiveDate::parse_from_str(date_str, DATE_FORMAT).is_ok()
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace
pub fn parse_date(date_str: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = date_str.trim();
    if !is_valid_date(trimmed) {
        return Err(ValidationError::InvalidDate(trimmed.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Parse a non-zero amount as typed by the user.
///
/// Plain decimals (`-1500.50`) and scientific notation (`1e3`) are accepted.
pub fn parse_amount(amount_str: &str) -> Result<Decimal, ValidationError> {
    let trimmed = amount_str.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;

    if amount.is_zero() {
        return Err(ValidationError::ZeroAmount);
    }

    Ok(amount)
}

/// Format an amount with two decimals and `,` thousands separators.
///
/// Negative amounts are wrapped in parentheses and the currency symbol is
/// appended after a space: `(1,234,567.89) руб.`
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = amount.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.2}", rounded);
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let body = format!("{}.{}", group_thousands(whole), fraction);
    let body = if negative { format!("({body})") } else { body };

    if symbol.is_empty() {
        body
    } else {
        format!("{body} {symbol}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
