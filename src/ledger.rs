use rust_decimal::Decimal;

use crate::analysis::{self, Summary};
use crate::error::Result;
use crate::models::Transaction;
use crate::storage::LedgerStorage;

/// The user's transaction list bound to its storage backend
///
/// Every `add` appends in memory and then rewrites the whole store.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use finance_planner::ledger::Ledger;
/// use finance_planner::models::{Category, CategoryType, Transaction};
/// use finance_planner::storage::MemoryStorage;
/// use rust_decimal_macros::dec;
///
/// let mut ledger = Ledger::open(MemoryStorage::new());
///
/// let salary = Category::new("Salary", CategoryType::Income).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let tx = Transaction::new(dec!(50000), salary, date, "March").unwrap();
///
/// ledger.add(tx).unwrap();
/// assert_eq!(ledger.balance(), dec!(50000));
/// ```
pub struct Ledger<S: LedgerStorage> {
    transactions: Vec<Transaction>,
    storage: S,
}

impl<S: LedgerStorage> Ledger<S> {
    /// Load the ledger from `storage`.
    ///
    /// A storage error is logged and the ledger starts empty; the next
    /// successful save overwrites whatever could not be read.
    pub fn open(storage: S) -> Self {
        let transactions = match storage.load() {
            Ok(transactions) => transactions,
            Err(e) => {
                tracing::error!("Failed to load transactions, starting empty: {e}");
                Vec::new()
            }
        };

        Self {
            transactions,
            storage,
        }
    }

    /// Load the ledger, propagating storage errors instead of degrading
    pub fn try_open(storage: S) -> Result<Self> {
        let transactions = storage.load()?;
        Ok(Self {
            transactions,
            storage,
        })
    }

    /// Append a transaction and save the full list.
    ///
    /// The transaction is kept in memory even when the save fails.
    pub fn add(&mut self, tx: Transaction) -> Result<()> {
        tracing::debug!(
            "Adding {} {} on {} ({})",
            tx.category_type(),
            tx.amount(),
            tx.date(),
            tx.category()
        );
        self.transactions.push(tx);
        self.storage.save(&self.transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Income minus expenses over every transaction
    pub fn balance(&self) -> Decimal {
        self.summary().balance
    }

    pub fn summary(&self) -> Summary {
        analysis::summarize(&self.transactions)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
