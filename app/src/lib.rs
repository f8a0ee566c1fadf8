//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the dashboard controller.
// CONTEXT: The dashboard owns the loaded dataset and the pivot workspace;
// the pivot engine only ever borrows the dataset it is handed.

use engine::Dataset;
use std::sync::{Arc, Mutex};

pub mod config;
pub mod kpi;
pub mod logging;
pub mod pivot;
pub mod render;

pub use config::DashboardConfig;
pub use kpi::DashboardKpis;
pub use logging::{init_log_file, next_seq, write_log};
pub use pivot::{
    current_view, export_pivot, export_pivot_text, generate_pivot, load_analysis,
    pivot_selectors, DashboardSummary, ExportPivotRequest, GeneratePivotRequest, PivotRowData,
    PivotSelectors, PivotState, PivotViewResponse, NOTHING_TO_EXPORT,
};
pub use render::{render_kpis, render_text_table};

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    pub config: DashboardConfig,
    /// The dataset of the last successful analysis. Shared read-only.
    pub dataset: Mutex<Option<Arc<Dataset>>>,
    pub pivot: Mutex<PivotState>,
}

pub fn create_app_state(config: DashboardConfig) -> AppState {
    AppState {
        config,
        dataset: Mutex::new(None),
        pivot: Mutex::new(PivotState::default()),
    }
}
