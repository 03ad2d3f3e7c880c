use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "finance.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV file holding the transactions
    pub data_file: PathBuf,
    /// Appended to every formatted amount
    pub currency_symbol: String,
    /// Where `chart` writes its HTML files
    pub chart_dir: PathBuf,
    /// Number of categories shown in the top expenses chart
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/finances.csv"),
            currency_symbol: "руб.".to_string(),
            chart_dir: PathBuf::from("charts"),
            top_n: 5,
        }
    }
}

impl Config {
    /// Read a TOML config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Load `path` if given, else `finance.toml` if it exists, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            tracing::debug!("Using config file {}", default_path.display());
            return Self::from_file(default_path);
        }

        Ok(Self::default())
    }
}
