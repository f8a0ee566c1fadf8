//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - The calculation core that transforms records into a renderable view.
//!
//! This module takes a Dataset (data) and PivotDefinition (configuration)
//! and produces a PivotView (table ready for rendering).
//!
//! Algorithm:
//! 1. Check that both a group column and a value column are selected
//! 2. For each record, derive the group label and clean the measure
//! 3. Fold the cleaned value into the group's accumulator
//! 4. Sort groups, evaluate the aggregation and append the grand total

use engine::{Dataset, Record};

use crate::cache::AggregationResult;
use crate::cleaning::{clean_numeric, group_label};
use crate::definition::{AggregationType, PivotDefinition};
use crate::view::{render, PivotView};

/// Groups `records` by `group_column` and accumulates the cleaned values of
/// `value_column`. Empty input yields an empty result.
pub fn aggregate(
    records: &[Record],
    group_column: &str,
    value_column: &str,
    aggregation: AggregationType,
) -> AggregationResult {
    let mut result = AggregationResult::new(aggregation);

    for record in records {
        let label = group_label(record.get(group_column));
        let value = clean_numeric(record.get(value_column));
        result.fold(label, value);
    }

    result
}

/// Same as [`aggregate`], folding `chunk_size` records at a time and merging
/// the partial results. A `chunk_size` of 0 is treated as 1.
pub fn aggregate_chunked(
    records: &[Record],
    chunk_size: usize,
    group_column: &str,
    value_column: &str,
    aggregation: AggregationType,
) -> AggregationResult {
    records
        .chunks(chunk_size.max(1))
        .map(|chunk| aggregate(chunk, group_column, value_column, aggregation))
        .fold(AggregationResult::new(aggregation), |mut acc, partial| {
            acc.merge(partial);
            acc
        })
}

/// Calculates a pivot table view from a dataset and definition.
/// This is the main entry point for the calculation engine.
///
/// Returns `None` without computing anything while the definition lacks a
/// group or value column.
pub fn calculate_pivot(dataset: &Dataset, definition: &PivotDefinition) -> Option<PivotView> {
    let Some((group_column, value_column)) = definition.selected_fields() else {
        log::debug!("pivot skipped: group or value column not selected");
        return None;
    };

    let result = aggregate(&dataset.records, group_column, value_column, definition.aggregation);
    log::debug!(
        "pivot group={} value={} agg={} records={} groups={}",
        group_column,
        value_column,
        definition.aggregation,
        dataset.records.len(),
        result.len()
    );

    Some(render(group_column, value_column, &result))
}
