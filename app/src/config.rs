//! FILENAME: app/src/config.rs
// PURPOSE: Dashboard configuration, loaded from an optional JSON file.

use pivot_engine::AggregationType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Product name used in export file names.
pub const DEFAULT_PRODUCT_NAME: &str = "GeniusBI";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix of exported files (`<product>_Pivot_<date>.csv`).
    pub product_name: String,

    /// Aggregation applied when a dataset is first loaded.
    pub default_aggregation: AggregationType,

    /// Directory exports are written to when no directory is requested.
    pub export_dir: PathBuf,

    /// Unified log file; console only when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            default_aggregation: AggregationType::Sum,
            export_dir: PathBuf::from("."),
            log_file: None,
        }
    }
}

impl DashboardConfig {
    /// Parses a JSON config. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Invalid config: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {:?}: {}", path, e))?;
        Self::from_json(&text)
    }
}
