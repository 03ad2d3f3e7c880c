use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Whether a category groups incoming or outgoing money
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    #[default]
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(CategoryType::Income),
            "expense" => Ok(CategoryType::Expense),
            other => Err(ValidationError::UnknownCategoryType(other.to_string())),
        }
    }
}

/// A named grouping of transactions, tagged as income or expense
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    name: String,
    category_type: CategoryType,
}

impl Category {
    /// Create a category, trimming the name.
    ///
    /// The name must contain at least one word character and nothing but
    /// word characters and whitespace. Non-ASCII letters count as word
    /// characters, so "Продукты" is accepted.
    pub fn new(name: &str, category_type: CategoryType) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        if !name_pattern().is_match(trimmed) {
            return Err(ValidationError::InvalidCategoryName(trimmed.to_string()));
        }

        Ok(Self {
            name: trimmed.to_string(),
            category_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_type(&self) -> CategoryType {
        self.category_type
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w\s]+$").expect("category name pattern is valid"))
}
