use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Transaction, TransactionRecord};

/// Column order of the data file
pub const CSV_HEADER: [&str; 5] = ["amount", "category", "type", "date", "comment"];

/// Durable home of the transaction list.
///
/// There are no keys and no partial updates: `load` returns the whole list
/// and `save` replaces it.
pub trait LedgerStorage {
    /// Read every stored transaction, in stored order
    fn load(&self) -> Result<Vec<Transaction>>;

    /// Replace the stored list with `transactions`
    fn save(&mut self, transactions: &[Transaction]) -> Result<()>;
}

/// Read transactions from CSV with a header row.
///
/// Rows that fail to deserialize or validate are skipped with a warning.
/// Input without a header yields an empty list.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    if csv_reader.headers()?.is_empty() {
        tracing::warn!("CSV input is empty or has no header row");
        return Ok(Vec::new());
    }

    let mut transactions = Vec::new();
    for (index, result) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = index + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping malformed row at line {line}: {e}");
                continue;
            }
        };

        match Transaction::try_from(record) {
            Ok(transaction) => transactions.push(transaction),
            Err(e) => tracing::warn!("Skipping invalid row at line {line}: {e}"),
        }
    }

    Ok(transactions)
}

/// Write a header row followed by one row per transaction
pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    // Header written by hand so that an empty ledger still produces one
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for transaction in transactions {
        csv_writer.serialize(transaction.to_record())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Transactions stored in a CSV file, rewritten whole on every save
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for CsvStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "Data file {} not found, it will be created on first save",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let transactions = read_transactions(file)?;
        tracing::info!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        write_transactions(file, transactions)?;

        tracing::info!(
            "Saved {} transactions to {}",
            transactions.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory storage, used by tests and `--dry-run`
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    transactions: Vec<Transaction>,
    save_count: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing list, as if it had been loaded from disk
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            save_count: 0,
        }
    }

    /// Copy whatever `source` can load right now.
    ///
    /// A load error is logged and the copy starts empty.
    pub fn snapshot<S: LedgerStorage>(source: &S) -> Self {
        let transactions = source.load().unwrap_or_else(|e| {
            tracing::error!("Failed to load transactions, starting empty: {e}");
            Vec::new()
        });
        Self::with_transactions(transactions)
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn stored(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl LedgerStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        self.transactions = transactions.to_vec();
        self.save_count += 1;
        Ok(())
    }
}
