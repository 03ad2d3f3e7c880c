pub mod category;
pub mod record;
pub mod transaction;

pub use category::{Category, CategoryType};
pub use record::TransactionRecord;
pub use transaction::Transaction;
