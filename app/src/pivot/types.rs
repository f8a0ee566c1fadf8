//! FILENAME: app/src/pivot/types.rs
//! PURPOSE: Request/response types and state for the pivot commands.

use crate::kpi::DashboardKpis;
use persistence::ExportFormat;
use pivot_engine::{AggregationType, PivotDefinition, PivotRow, PivotView};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// STATE
// ============================================================================

/// The pivot workspace: current selection and last rendered table.
#[derive(Debug, Default)]
pub struct PivotState {
    pub definition: PivotDefinition,
    /// Last rendered view; replaced wholesale by every successful generate.
    pub view: Option<PivotView>,
}

// ============================================================================
// REQUESTS
// ============================================================================

/// Selector changes sent by the dashboard. `None` keeps the current choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePivotRequest {
    pub group_field: Option<String>,
    pub value_field: Option<String>,
    pub aggregation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPivotRequest {
    /// Target directory; the configured export directory when unset.
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub format: ExportFormat,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRowData {
    pub label: String,
    pub value: Option<f64>,
    pub formatted_value: String,
}

impl From<&PivotRow> for PivotRowData {
    fn from(row: &PivotRow) -> Self {
        PivotRowData {
            label: row.label.clone(),
            value: row.value,
            formatted_value: row.formatted_value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotViewResponse {
    pub row_header: String,
    pub value_header: String,
    pub aggregation: AggregationType,
    pub rows: Vec<PivotRowData>,
    pub grand_total: PivotRowData,
}

impl From<&PivotView> for PivotViewResponse {
    fn from(view: &PivotView) -> Self {
        PivotViewResponse {
            row_header: view.row_header.clone(),
            value_header: view.value_header.clone(),
            aggregation: view.aggregation,
            rows: view.rows.iter().map(PivotRowData::from).collect(),
            grand_total: PivotRowData::from(&view.grand_total),
        }
    }
}

/// Options for the pivot selectors plus the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotSelectors {
    pub dimensions: Vec<String>,
    pub measures: Vec<String>,
    pub aggregations: Vec<AggregationType>,
    pub selected_group: Option<String>,
    pub selected_value: Option<String>,
    pub selected_aggregation: AggregationType,
}

/// Everything the dashboard shows right after an upload was analysed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub kpis: DashboardKpis,
    pub insights: Vec<String>,
    pub selectors: PivotSelectors,
    /// Initial table for the auto-selected columns, if any.
    pub pivot: Option<PivotViewResponse>,
}
