//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the scalar value held by a single record field.
//! CONTEXT: The analysis service ships every record as a flat JSON object whose
//! values are scalars. `CellValue` is the typed form of one of those scalars.

use serde::{Deserialize, Serialize};

/// A scalar received from the analysis service.
/// `null` (and any field the service left out) is represented as `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Returns true for values a dashboard treats as "no value":
    /// empty, empty text, `false` and NaN. Numeric zero is a real value.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Boolean(b) => !*b,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.is_empty(),
        }
    }

    /// Returns the display text of the value.
    /// Numbers use the shortest representation that round-trips (`1`, `1.5`),
    /// switching to exponent form outside `[1e-6, 1e21)` (`1e+21`, `1e-7`).
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Number(n) => {
                // -0 displays as 0
                if *n == 0.0 {
                    "0".to_string()
                } else if n.is_infinite() {
                    if *n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
                } else if n.is_finite() && (n.abs() >= 1e21 || n.abs() < 1e-6) {
                    exponent_form(*n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// `1e21` -> `1e+21`, `1.5e-7` -> `1.5e-7`.
fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}
