//! FILENAME: core/pivot-engine/src/view.rs
//! Pivot View - Renderable output for the dashboard.
//!
//! This module turns an `AggregationResult` into a two-column table:
//! a header pair, one row per group sorted by label, and a trailing grand
//! total. The view is a plain value; any surface (terminal, web view, file)
//! renders it on its own and a new request always replaces it wholesale.

use engine::format_grouped;
use serde::{Deserialize, Serialize};

use crate::cache::AggregationResult;
use crate::definition::AggregationType;

/// Label of the trailing total row.
pub const GRAND_TOTAL_LABEL: &str = "GRAND TOTAL";

/// Shown where a figure is undefined (the mean of an empty dataset).
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// ROWS
// ============================================================================

/// Types of rows in the pivot view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotRowType {
    /// One group.
    Data,
    /// Aggregate over all records.
    GrandTotal,
}

/// A (label, value) line of the pivot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub label: String,

    /// Raw aggregate; `None` when undefined.
    pub value: Option<f64>,

    /// Pre-formatted display string.
    pub formatted_value: String,

    pub row_type: PivotRowType,
}

impl PivotRow {
    fn new(label: String, value: Option<f64>, aggregation: AggregationType, row_type: PivotRowType) -> Self {
        PivotRow {
            formatted_value: format_aggregate(value, aggregation),
            label,
            value,
            row_type,
        }
    }
}

/// Formats an aggregate for display: counts without decimals, everything else
/// with exactly two.
pub fn format_aggregate(value: Option<f64>, aggregation: AggregationType) -> String {
    match value {
        Some(v) => format_grouped(v, aggregation.decimal_places()),
        None => NOT_AVAILABLE.to_string(),
    }
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete rendered pivot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotView {
    /// Header of the label column (e.g. "SALES REGION").
    pub row_header: String,

    /// Header of the value column (e.g. "SUM OF NET REVENUE").
    pub value_header: String,

    pub aggregation: AggregationType,

    /// Data rows in ascending label order.
    pub rows: Vec<PivotRow>,

    pub grand_total: PivotRow,
}

impl PivotView {
    /// Number of visible lines: header, data rows and grand total.
    pub fn line_count(&self) -> usize {
        self.rows.len() + 2
    }

    pub fn row(&self, label: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Every visible line as display text, in display order.
    pub fn display_rows(&self) -> Vec<[String; 2]> {
        let mut lines = Vec::with_capacity(self.line_count());
        lines.push([self.row_header.clone(), self.value_header.clone()]);
        for row in self.rows.iter().chain(std::iter::once(&self.grand_total)) {
            lines.push([row.label.clone(), row.formatted_value.clone()]);
        }
        lines
    }

    /// Display rows prepared for delimited export: the field separator (`,`)
    /// is stripped from every cell, so "1,500.00" exports as "1500.00".
    pub fn export_rows(&self) -> Vec<[String; 2]> {
        self.display_rows()
            .into_iter()
            .map(|[label, value]| [label.replace(',', ""), value.replace(',', "")])
            .collect()
    }
}

/// Turns a column name into a header: upper case, underscores as spaces.
pub fn header_label(column: &str) -> String {
    column.to_uppercase().replace('_', " ")
}

/// Builds the view for an aggregation result.
pub fn render(group_column: &str, value_column: &str, result: &AggregationResult) -> PivotView {
    let aggregation = result.aggregation;

    let mut labels: Vec<&String> = result.groups.keys().collect();
    labels.sort();

    let rows = labels
        .into_iter()
        .map(|label| {
            let value = result.groups[label].value(aggregation);
            PivotRow::new(label.clone(), Some(value), aggregation, PivotRowType::Data)
        })
        .collect();

    let grand_total = PivotRow::new(
        GRAND_TOTAL_LABEL.to_string(),
        result.totals().value(aggregation),
        aggregation,
        PivotRowType::GrandTotal,
    );

    PivotView {
        row_header: header_label(group_column),
        value_header: format!("{} OF {}", aggregation.label(), header_label(value_column)),
        aggregation,
        rows,
        grand_total,
    }
}
