//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot Table subsystem for the dashboard.
//!
//! This crate groups a flat record set by one column and aggregates another.
//! It depends on `engine` only for shared types (CellValue, Record, Dataset).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot table IS)
//! - `cleaning`: Measure parsing and group labelling (WHAT goes in)
//! - `cache`: Per-group accumulators (HOW we compute)
//! - `view`: Renderable output (WHAT we display)
//! - `engine`: Calculation engine (HOW we calculate)

pub mod definition;
pub mod cleaning;
pub mod cache;
pub mod view;
pub mod engine;

pub use definition::*;
pub use cleaning::{clean_numeric, group_label, MISSING_GROUP_LABEL};
pub use cache::*;
pub use view::*;
pub use self::engine::{aggregate, aggregate_chunked, calculate_pivot};
