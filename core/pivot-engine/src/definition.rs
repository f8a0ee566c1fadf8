//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Table Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a pivot request:
//! which column groups the rows, which column is aggregated, and how.
//! These structures are designed to be:
//! - Serializable (sent from the dashboard selectors)
//! - Immutable snapshots of user intent

use std::fmt;
use std::str::FromStr;

use engine::Schema;
use serde::{Deserialize, Serialize};

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for the value column.
/// `Mean` and `Average` compute the same figure; they only differ in the
/// header label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    Sum,
    Mean,
    Average,
    Count,
    Min,
    Max,
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::Sum
    }
}

impl AggregationType {
    pub const ALL: [AggregationType; 6] = [
        AggregationType::Sum,
        AggregationType::Mean,
        AggregationType::Average,
        AggregationType::Count,
        AggregationType::Min,
        AggregationType::Max,
    ];

    /// Upper-case label used in the value column header.
    pub fn label(&self) -> &'static str {
        match self {
            AggregationType::Sum => "SUM",
            AggregationType::Mean => "MEAN",
            AggregationType::Average => "AVERAGE",
            AggregationType::Count => "COUNT",
            AggregationType::Min => "MIN",
            AggregationType::Max => "MAX",
        }
    }

    /// Fraction digits used when displaying values of this aggregation.
    pub fn decimal_places(&self) -> usize {
        match self {
            AggregationType::Count => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_ascii_lowercase())
    }
}

/// Error returned when an aggregation name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAggregation(pub String);

impl fmt::Display for UnknownAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown aggregation '{}' (expected sum, mean, average, count, min or max)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAggregation {}

impl FromStr for AggregationType {
    type Err = UnknownAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregationType::Sum),
            "mean" => Ok(AggregationType::Mean),
            "average" | "avg" => Ok(AggregationType::Average),
            "count" => Ok(AggregationType::Count),
            "min" => Ok(AggregationType::Min),
            "max" => Ok(AggregationType::Max),
            _ => Err(UnknownAggregation(s.to_string())),
        }
    }
}

// ============================================================================
// PIVOT DEFINITION
// ============================================================================

/// The current pivot selection: group-by column, value column and aggregation.
/// Either column may still be unselected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Dimension whose values become the row labels.
    pub group_field: Option<String>,

    /// Measure that is cleaned and aggregated.
    pub value_field: Option<String>,

    /// The aggregation function to apply.
    #[serde(default)]
    pub aggregation: AggregationType,
}

impl PivotDefinition {
    pub fn new(
        group_field: impl Into<String>,
        value_field: impl Into<String>,
        aggregation: AggregationType,
    ) -> Self {
        PivotDefinition {
            group_field: Some(group_field.into()),
            value_field: Some(value_field.into()),
            aggregation,
        }
    }

    /// Pre-selects the first dimension and the first measure of the schema so
    /// a freshly loaded dataset shows a table immediately.
    pub fn from_schema(schema: &Schema, aggregation: AggregationType) -> Self {
        PivotDefinition {
            group_field: schema.dimensions.first().cloned(),
            value_field: schema.measures.first().cloned(),
            aggregation,
        }
    }

    /// Returns both selected columns, or `None` while either is missing.
    pub fn selected_fields(&self) -> Option<(&str, &str)> {
        let group = self.group_field.as_deref().filter(|s| !s.is_empty())?;
        let value = self.value_field.as_deref().filter(|s| !s.is_empty())?;
        Some((group, value))
    }

    pub fn is_complete(&self) -> bool {
        self.selected_fields().is_some()
    }
}
