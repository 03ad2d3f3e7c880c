//! Plain-text rendering of the ledger for the terminal.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::analysis::{CategoryTotal, PeriodTotal, Summary};
use crate::models::record::DATE_FORMAT;
use crate::models::Transaction;
use crate::validation::format_currency;

const TABLE_HEADERS: [&str; 5] = ["Amount", "Category", "Type", "Date", "Comment"];

/// One row per transaction, columns padded to the widest cell
pub fn transactions_table(transactions: &[Transaction]) -> String {
    let rows: Vec<[String; 5]> = transactions
        .iter()
        .map(|tx| {
            [
                format_currency(tx.amount(), ""),
                tx.category().name().to_string(),
                tx.category_type().to_string(),
                tx.date().format(DATE_FORMAT).to_string(),
                tx.comment().to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("  ").trim_end());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        // Amounts line up on the right, text on the left
        let padding = width.saturating_sub(cell.chars().count());
        if i == 0 {
            line.push_str(&" ".repeat(padding));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(padding));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn balance_line(balance: Decimal, symbol: &str) -> String {
    format!("Balance: {}", format_currency(balance, symbol))
}

pub fn analysis_report(summary: &Summary, symbol: &str) -> String {
    format!(
        "FINANCIAL ANALYSIS\n\nIncome: {}\nExpenses: {}\nBalance: {}\n",
        format_currency(summary.income, symbol),
        format_currency(summary.expense, symbol),
        format_currency(summary.balance, symbol),
    )
}

pub fn category_summary_table(totals: &[CategoryTotal], symbol: &str) -> String {
    let width = totals
        .iter()
        .map(|total| total.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  Total", "Category");
    for total in totals {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            total.category,
            format_currency(total.total, symbol)
        );
    }
    out
}

pub fn monthly_table(months: &[PeriodTotal], symbol: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Month    Income / Expenses / Net");
    for month in months {
        let _ = writeln!(
            out,
            "{}  {} / {} / {}",
            month.period.format("%Y-%m"),
            format_currency(month.income, symbol),
            format_currency(month.expense, symbol),
            format_currency(month.net(), symbol),
        );
    }
    out
}
