//! FILENAME: app/src/pivot/mod.rs
//! PURPOSE: Pivot table commands for the dashboard.

pub mod commands;
pub mod types;

pub use commands::*;
pub use types::*;
