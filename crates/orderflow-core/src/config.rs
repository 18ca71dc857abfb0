use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

pub const DEFAULT_REGION_A_PATH: &str = "order_region_a.csv";
pub const DEFAULT_REGION_B_PATH: &str = "order_region_b.csv";
pub const DEFAULT_DESTINATION_TARGET: &str = "sqlite://db.sqlite3";
pub const DEFAULT_TABLE_NAME: &str = "sales_data";

/// Everything a single pipeline run needs to know about its inputs and destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub region_a_path: PathBuf,
    pub region_b_path: PathBuf,
    /// SQLite connection URL, e.g. `sqlite://db.sqlite3`.
    pub destination_target: String,
    pub destination_table_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            region_a_path: PathBuf::from(DEFAULT_REGION_A_PATH),
            region_b_path: PathBuf::from(DEFAULT_REGION_B_PATH),
            destination_target: DEFAULT_DESTINATION_TARGET.to_string(),
            destination_table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load a config file. Keys absent from the file keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            PipelineError::Config(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| PipelineError::Config(err.to_string()))
    }

    /// Overlay `ORDERFLOW_*` variables resolved through `lookup`, normally the process
    /// environment. `DATABASE_URL` is honoured when `ORDERFLOW_DATABASE_URL` is unset.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("ORDERFLOW_REGION_A_PATH") {
            self.region_a_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("ORDERFLOW_REGION_B_PATH") {
            self.region_b_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("ORDERFLOW_DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
            self.destination_target = url;
        }
        if let Some(table) = lookup("ORDERFLOW_TABLE") {
            self.destination_table_name = table;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.region_a_path.as_os_str().is_empty() || self.region_b_path.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "region source paths must not be empty".to_string(),
            ));
        }
        if self.destination_target.trim().is_empty() {
            return Err(PipelineError::Config(
                "destination target must not be empty".to_string(),
            ));
        }
        if !is_plain_identifier(&self.destination_table_name) {
            return Err(PipelineError::Config(format!(
                "destination table name '{}' is not a plain SQL identifier",
                self.destination_table_name
            )));
        }
        Ok(())
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
