//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the dashboard data model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cell;
pub mod dataset;
pub mod error;
pub mod number_format;
pub mod record;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use dataset::{AnalysisPayload, Dataset, Schema, STATUS_SUCCESS};
pub use error::PayloadError;
pub use number_format::format_grouped;
pub use record::Record;
