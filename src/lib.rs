pub mod analysis;
pub mod charts;
pub mod config;
pub mod error;
pub mod form;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod validation;
pub mod view;

use std::io::{Read, Write};

use error::Result;

/// Read a transaction CSV and write the per-category totals as CSV.
///
/// Malformed rows are skipped, as when loading the data file.
pub fn summarize_csv<R: Read, W: Write>(reader: R, writer: W) -> Result<()> {
    let transactions = storage::read_transactions(reader)?;
    write_category_totals(&analysis::category_summary(&transactions), writer)
}

/// Write per-category totals as `category,amount` CSV rows
pub fn write_category_totals<W: Write>(totals: &[analysis::CategoryTotal], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["category", "amount"])?;

    for total in totals {
        csv_writer.write_record([total.category.as_str(), &total.total.to_string()])?;
    }

    csv_writer.flush()?;
    Ok(())
}
