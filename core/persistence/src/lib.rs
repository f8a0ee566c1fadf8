//! FILENAME: core/persistence/src/lib.rs
//! Dashboard Persistence Module
//!
//! Writes rendered pivot tables to disk: delimited text (CSV) and XLSX.

mod csv_writer;
mod error;
mod xlsx_writer;

pub use csv_writer::{encode_pivot_csv, save_pivot_csv};
pub use error::{PersistenceError, NOTHING_TO_EXPORT};
pub use xlsx_writer::save_pivot_xlsx;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use pivot_engine::PivotView;
use serde::{Deserialize, Serialize};

// ============================================================================
// EXPORT FORMAT
// ============================================================================

/// File formats a pivot table can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unknown export format '{}' (expected csv or xlsx)", other)),
        }
    }
}

/// File name of an export: `<Product>_Pivot_<YYYY-MM-DD>.<ext>`.
pub fn export_file_name(product: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!("{}_Pivot_{}.{}", product, date.format("%Y-%m-%d"), format.extension())
}

/// Writes the view to `path` in the requested format.
pub fn save_pivot(view: &PivotView, path: &Path, format: ExportFormat) -> Result<(), PersistenceError> {
    match format {
        ExportFormat::Csv => save_pivot_csv(view, path),
        ExportFormat::Xlsx => save_pivot_xlsx(view, path),
    }
}
