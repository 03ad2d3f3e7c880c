//! Chart generation for the analysis views.
//!
//! Charts are built as ECharts options with `charming` and written out as
//! standalone HTML pages that load ECharts from a CDN.

use std::fs;
use std::path::{Path, PathBuf};

use charming::{
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Label, Tooltip, Trigger},
    series::{Bar, Line, Pie},
    Chart,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analysis::{daily_totals, expenses_by_category, top_expenses};
use crate::error::Result;
use crate::models::record::DATE_FORMAT;
use crate::models::Transaction;

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// The charts offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Daily income and expense lines
    IncomeExpense,
    /// Share of expenses per category
    CategoryPie,
    /// Largest expense categories as horizontal bars
    TopExpenses,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::IncomeExpense,
        ChartKind::CategoryPie,
        ChartKind::TopExpenses,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::IncomeExpense => "income_expense.html",
            ChartKind::CategoryPie => "category_pie.html",
            ChartKind::TopExpenses => "top_expenses.html",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::IncomeExpense => "Income and expenses over time",
            ChartKind::CategoryPie => "Expenses by category",
            ChartKind::TopExpenses => "Top expenses",
        }
    }

    /// Build the chart, or `None` if there is nothing to plot
    pub fn build(&self, transactions: &[Transaction], top_n: usize) -> Option<Chart> {
        match self {
            ChartKind::IncomeExpense => income_expense_chart(transactions),
            ChartKind::CategoryPie => category_pie_chart(transactions),
            ChartKind::TopExpenses => top_expenses_chart(transactions, top_n),
        }
    }
}

/// Line chart of daily income and expense totals.
///
/// Returns `None` when there are no transactions.
pub fn income_expense_chart(transactions: &[Transaction]) -> Option<Chart> {
    let days = daily_totals(transactions);
    if days.is_empty() {
        return None;
    }

    let labels: Vec<String> = days
        .iter()
        .map(|day| day.period.format(DATE_FORMAT).to_string())
        .collect();
    let income: Vec<f64> = days.iter().map(|day| to_f64(day.income)).collect();
    let expense: Vec<f64> = days.iter().map(|day| to_f64(day.expense)).collect();

    let chart = Chart::new()
        .title(Title::new().text(ChartKind::IncomeExpense.title()))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expenses").data(expense));

    Some(chart)
}

/// Pie chart of expense magnitudes per category.
///
/// Returns `None` when there are no expenses.
pub fn category_pie_chart(transactions: &[Transaction]) -> Option<Chart> {
    let totals = expenses_by_category(transactions);
    if totals.is_empty() {
        return None;
    }

    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|total| (to_f64(total.total), total.category.as_str()))
        .collect();

    let chart = Chart::new()
        .title(
            Title::new()
                .text(ChartKind::CategoryPie.title())
                .left("center"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius("60%")
                .label(Label::new().formatter("{b}: {d}%"))
                .data(data),
        );

    Some(chart)
}

/// Horizontal bar chart of the `top_n` largest expense categories.
///
/// Returns `None` when there are no expenses.
pub fn top_expenses_chart(transactions: &[Transaction], top_n: usize) -> Option<Chart> {
    let mut totals = top_expenses(transactions, top_n);
    if totals.is_empty() {
        return None;
    }
    // ECharts draws the first category at the bottom
    totals.reverse();

    let labels: Vec<String> = totals.iter().map(|total| total.category.clone()).collect();
    let values: Vec<f64> = totals.iter().map(|total| to_f64(total.total)).collect();

    let chart = Chart::new()
        .title(Title::new().text(format!("Top {top_n} expenses")))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Value))
        .y_axis(Axis::new().type_(AxisType::Category).data(labels))
        .series(Bar::new().name("Expenses").data(values));

    Some(chart)
}

/// Wrap a chart's ECharts options in a standalone HTML page
pub fn render_html(chart: &Chart, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{ECHARTS_CDN}"></script>
</head>
<body>
<div id="chart" style="width: 100%; height: 90vh;"></div>
<script>
(function() {{
    const chart = echarts.init(document.getElementById("chart"));
    chart.setOption({options});
    window.addEventListener("resize", chart.resize);
}})();
</script>
</body>
</html>
"#,
        title = escape_html(title),
        options = chart,
    )
}

/// Render `chart` to `path`, creating parent directories as needed
pub fn save_chart(chart: &Chart, title: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, render_html(chart, title))?;
    tracing::info!("Chart saved to {}", path.display());
    Ok(())
}

/// Write every chart that has data into `dir`.
///
/// Returns the paths written; charts without data are skipped.
pub fn save_all_charts(
    transactions: &[Transaction],
    dir: &Path,
    top_n: usize,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for kind in ChartKind::ALL {
        let Some(chart) = kind.build(transactions, top_n) else {
            tracing::info!("Skipping '{}': no data to plot", kind.title());
            continue;
        };

        let path = dir.join(kind.file_name());
        save_chart(&chart, kind.title(), &path)?;
        written.push(path);
    }

    Ok(written)
}

fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
