use thiserror::Error;

/// Errors raised while building a category or transaction from user input.
/// The messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Category name must not be empty")]
    EmptyCategoryName,

    #[error("Category name must contain only letters, digits and spaces: '{0}'")]
    InvalidCategoryName(String),

    #[error("Unknown category type '{0}', expected 'income' or 'expense'")]
    UnknownCategoryType(String),

    #[error("Amount must not be empty")]
    EmptyAmount,

    #[error("Amount must be a number: '{0}'")]
    InvalidAmount(String),

    #[error("Amount must be non-zero")]
    ZeroAmount,

    #[error("Invalid date '{0}', use YYYY-MM-DD")]
    InvalidDate(String),
}

/// Errors that can occur while loading, saving or rendering the ledger
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
