//! FILENAME: app/src/kpi.rs
// PURPOSE: Headline figures shown above the dashboard charts.

use engine::Dataset;
use serde::{Deserialize, Serialize};

/// The KPI cards of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardKpis {
    /// Rows in the upload (the service may send only a preview).
    pub row_count: usize,
    /// Dimensions plus measures.
    pub column_count: usize,
    pub dimension_count: usize,
    pub measure_count: usize,
    pub source_name: Option<String>,
}

impl DashboardKpis {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        DashboardKpis {
            row_count: dataset.row_count(),
            column_count: dataset.schema.column_count(),
            dimension_count: dataset.schema.dimensions.len(),
            measure_count: dataset.schema.measures.len(),
            source_name: dataset.source_name.clone(),
        }
    }
}
