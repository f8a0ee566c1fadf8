//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

/// Notice shown when an export is requested before any table exists.
pub const NOTHING_TO_EXPORT: &str = "Nothing to export! Please generate a pivot table first.";

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Nothing to export! Please generate a pivot table first.")]
    NothingToExport,
}
