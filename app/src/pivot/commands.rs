//! FILENAME: app/src/pivot/commands.rs
//! PURPOSE: Commands behind the dashboard's pivot workspace.
//! CONTEXT: Load an analysed upload, pick columns, render, export.

use crate::kpi::DashboardKpis;
use crate::pivot::types::*;
use crate::{log_debug, log_enter, log_enter_info, log_exit, log_exit_info, log_warn, AppState};
use chrono::NaiveDate;
use engine::{AnalysisPayload, Dataset};
use persistence::{encode_pivot_csv, export_file_name, save_pivot, PersistenceError};
use pivot_engine::{calculate_pivot, AggregationType, PivotDefinition, PivotView};
use std::path::PathBuf;
use std::sync::{Arc, MutexGuard};

pub use persistence::NOTHING_TO_EXPORT;

// Lock order is always dataset, then pivot.

fn lock_dataset(state: &AppState) -> Result<MutexGuard<'_, Option<Arc<Dataset>>>, String> {
    state.dataset.lock().map_err(|e| format!("Lock error: {}", e))
}

fn lock_pivot(state: &AppState) -> Result<MutexGuard<'_, PivotState>, String> {
    state.pivot.lock().map_err(|e| format!("Lock error: {}", e))
}

fn rendered_view(pivot: &PivotState) -> Result<&PivotView, String> {
    pivot.view.as_ref().ok_or_else(|| {
        log_warn!("PIVOT", "export requested before any table was generated");
        PersistenceError::NothingToExport.to_string()
    })
}

fn build_selectors(dataset: Option<&Dataset>, definition: &PivotDefinition) -> PivotSelectors {
    let (dimensions, measures) = dataset
        .map(|d| (d.schema.dimensions.clone(), d.schema.measures.clone()))
        .unwrap_or_default();

    PivotSelectors {
        dimensions,
        measures,
        aggregations: AggregationType::ALL.to_vec(),
        selected_group: definition.group_field.clone(),
        selected_value: definition.value_field.clone(),
        selected_aggregation: definition.aggregation,
    }
}

/// Renders the current definition against `dataset` and stores the result.
/// An incomplete definition is a no-op that keeps the previous table.
fn render_into_state(pivot: &mut PivotState, dataset: &Dataset) -> Option<PivotViewResponse> {
    let view = calculate_pivot(dataset, &pivot.definition)?;
    let response = PivotViewResponse::from(&view);
    pivot.view = Some(view);
    Some(response)
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Loads the analysis service's response for a new upload.
///
/// A payload whose status is not "success" is rejected and the previously
/// loaded dataset stays active. On success the selectors are reset to the
/// first dimension and measure and an initial table is rendered.
pub fn load_analysis(state: &AppState, payload_json: &str) -> Result<DashboardSummary, String> {
    log_enter_info!("PIVOT", "load_analysis", "bytes={}", payload_json.len());

    let payload = AnalysisPayload::from_json(payload_json).map_err(|e| e.to_string())?;
    let dataset = payload.into_dataset().map_err(|e| {
        log_warn!("PIVOT", "analysis rejected: {}", e);
        e.to_string()
    })?;
    let dataset = Arc::new(dataset);

    let definition = PivotDefinition::from_schema(&dataset.schema, state.config.default_aggregation);

    // Selection and dataset are swapped under both locks.
    let mut current = lock_dataset(state)?;
    let mut pivot = lock_pivot(state)?;
    *pivot = PivotState {
        definition,
        view: None,
    };
    let initial = render_into_state(&mut pivot, &dataset);
    let selectors = build_selectors(Some(&dataset), &pivot.definition);

    let summary = DashboardSummary {
        kpis: DashboardKpis::from_dataset(&dataset),
        insights: dataset.insights.clone(),
        selectors,
        pivot: initial,
    };
    *current = Some(dataset);
    drop(pivot);
    drop(current);

    log_exit_info!(
        "PIVOT",
        "load_analysis",
        "rows={} dims={} measures={} initial_pivot={}",
        summary.kpis.row_count,
        summary.kpis.dimension_count,
        summary.kpis.measure_count,
        summary.pivot.is_some()
    );
    Ok(summary)
}

/// Returns the selector options for the loaded dataset and the current choice.
pub fn pivot_selectors(state: &AppState) -> Result<PivotSelectors, String> {
    let dataset = lock_dataset(state)?;
    let pivot = lock_pivot(state)?;
    Ok(build_selectors(dataset.as_deref(), &pivot.definition))
}

/// Applies selector changes and regenerates the table.
///
/// Returns `Ok(None)` without touching the previous table when no dataset is
/// loaded or a column is still unselected.
pub fn generate_pivot(
    state: &AppState,
    request: GeneratePivotRequest,
) -> Result<Option<PivotViewResponse>, String> {
    log_enter!(
        "PIVOT",
        "generate_pivot",
        "group={:?} value={:?} agg={:?}",
        request.group_field,
        request.value_field,
        request.aggregation
    );

    let aggregation = request
        .aggregation
        .as_deref()
        .map(str::parse::<AggregationType>)
        .transpose()
        .map_err(|e| e.to_string())?;

    let dataset = lock_dataset(state)?;
    let mut pivot = lock_pivot(state)?;
    if let Some(group) = request.group_field {
        pivot.definition.group_field = Some(group);
    }
    if let Some(value) = request.value_field {
        pivot.definition.value_field = Some(value);
    }
    if let Some(aggregation) = aggregation {
        pivot.definition.aggregation = aggregation;
    }

    let Some(dataset) = dataset.as_deref() else {
        log_warn!("PIVOT", "pivot attempted but no dataset is loaded");
        log_exit!("PIVOT", "generate_pivot", "no dataset");
        return Ok(None);
    };

    let response = render_into_state(&mut pivot, dataset);
    match &response {
        Some(view) => log_exit!(
            "PIVOT",
            "generate_pivot",
            "rendered '{}' rows={}",
            view.value_header,
            view.rows.len()
        ),
        None => {
            log_debug!("PIVOT", "selection incomplete, table unchanged");
            log_exit!("PIVOT", "generate_pivot", "unchanged");
        }
    }
    Ok(response)
}

/// Returns the last rendered view, if any.
pub fn current_view(state: &AppState) -> Result<Option<PivotView>, String> {
    Ok(lock_pivot(state)?.view.clone())
}

/// Encodes the last rendered table as delimited text.
pub fn export_pivot_text(state: &AppState) -> Result<String, String> {
    let pivot = lock_pivot(state)?;
    let view = rendered_view(&pivot)?;
    encode_pivot_csv(view).map_err(|e| e.to_string())
}

/// Writes the last rendered table to `<dir>/<Product>_Pivot_<date>.<ext>`.
pub fn export_pivot(
    state: &AppState,
    request: ExportPivotRequest,
    date: NaiveDate,
) -> Result<PathBuf, String> {
    log_enter_info!("PIVOT", "export_pivot", "format={}", request.format);

    let pivot = lock_pivot(state)?;
    let view = rendered_view(&pivot)?;

    let directory = request
        .directory
        .unwrap_or_else(|| state.config.export_dir.clone());
    let path = directory.join(export_file_name(&state.config.product_name, date, request.format));

    save_pivot(view, &path, request.format).map_err(|e| e.to_string())?;

    log_exit_info!("PIVOT", "export_pivot", "path={:?} lines={}", path, view.line_count());
    Ok(path)
}
