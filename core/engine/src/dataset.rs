//! FILENAME: core/engine/src/dataset.rs
//! PURPOSE: The analysed dataset and the analysis-service payload it comes from.
//! CONTEXT: The analysis service answers an upload with
//! `{ status, data, schema: { dimensions, measures }, insights }`.
//! `AnalysisPayload` mirrors that contract; `Dataset` is the immutable handle
//! the rest of the application passes around once the payload succeeded.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::record::Record;

/// Status value the analysis service uses for a usable payload.
pub const STATUS_SUCCESS: &str = "success";

// ============================================================================
// SCHEMA
// ============================================================================

/// Column roles suggested by the analyser.
/// Advisory only: nothing checks the records against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Categorical columns, usable as grouping keys.
    #[serde(default)]
    pub dimensions: Vec<String>,
    /// Numeric columns, usable as aggregation values.
    #[serde(default)]
    pub measures: Vec<String>,
}

impl Schema {
    pub fn new(dimensions: Vec<String>, measures: Vec<String>) -> Self {
        Schema { dimensions, measures }
    }

    pub fn column_count(&self) -> usize {
        self.dimensions.len() + self.measures.len()
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// A loaded dataset. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub schema: Schema,
    /// Free-text observations produced by the analyser.
    pub insights: Vec<String>,
    /// Name of the uploaded file, when the service reported it.
    pub source_name: Option<String>,
    /// Row count of the full upload when `records` is only a preview.
    pub full_count: Option<usize>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, schema: Schema) -> Self {
        Dataset {
            records,
            schema,
            insights: Vec::new(),
            source_name: None,
            full_count: None,
        }
    }

    /// Number of rows the upload had; falls back to the received records.
    pub fn row_count(&self) -> usize {
        self.full_count.unwrap_or(self.records.len())
    }
}

// ============================================================================
// ANALYSIS PAYLOAD
// ============================================================================

/// Response body of the analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub schema: Option<Schema>,
    #[serde(default)]
    pub insights: Option<Vec<String>>,
    #[serde(default)]
    pub full_count: Option<usize>,
}

impl AnalysisPayload {
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Converts a successful payload into a dataset.
    /// Any other status is an error and carries the service's message.
    pub fn into_dataset(self) -> Result<Dataset, PayloadError> {
        if !self.is_success() {
            let message = self
                .message
                .unwrap_or_else(|| format!("analysis returned status '{}'", self.status));
            return Err(PayloadError::AnalysisFailed(message));
        }

        Ok(Dataset {
            records: self.data,
            schema: self.schema.unwrap_or_default(),
            insights: self.insights.unwrap_or_default(),
            source_name: self.filename,
            full_count: self.full_count,
        })
    }
}
