//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}
