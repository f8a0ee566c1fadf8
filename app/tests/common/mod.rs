//! FILENAME: app/tests/common/mod.rs
//! Test harness and fixtures for dashboard integration tests.

#![allow(dead_code)]

use app_lib::{create_app_state, load_analysis, AppState, DashboardConfig, DashboardSummary};
use serde_json::{json, Value};

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with empty state and default config.
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        TestHarness {
            state: create_app_state(config),
        }
    }

    /// Create a harness with the sales fixture already loaded.
    pub fn with_sales_data() -> Self {
        let harness = Self::new();
        harness.load(&SalesFixture::payload()).expect("sales fixture loads");
        harness
    }

    /// Feed an analysis payload to the dashboard.
    pub fn load(&self, payload: &Value) -> Result<DashboardSummary, String> {
        load_analysis(&self.state, &payload.to_string())
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub struct SalesFixture;

impl SalesFixture {
    pub fn dimensions() -> Vec<&'static str> {
        vec!["region", "product", "quarter"]
    }

    pub fn measures() -> Vec<&'static str> {
        vec!["sales", "quantity"]
    }

    /// Sales figures arrive as formatted text, the way spreadsheets export them.
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, &'static str, f64)> {
        vec![
            ("North", "Widget", "Q1", "$10,000", 100.0),
            ("North", "Widget", "Q2", "$12,000", 120.0),
            ("North", "Gadget", "Q1", "8000", 80.0),
            ("North", "Gadget", "Q2", "9,000.00", 90.0),
            ("South", "Widget", "Q1", "$15,000", 150.0),
            ("South", "Widget", "Q2", "14000", 140.0),
            ("South", "Gadget", "Q1", "$11,000", 110.0),
            ("South", "Gadget", "Q2", "13000", 130.0),
            ("East", "Widget", "Q1", "$9,000", 90.0),
            ("East", "Widget", "Q2", "11000", 110.0),
            ("East", "Gadget", "Q1", "7000", 70.0),
            ("East", "Gadget", "Q2", "$8,500", 85.0),
        ]
    }

    pub fn payload() -> Value {
        let data: Vec<Value> = Self::data()
            .into_iter()
            .map(|(region, product, quarter, sales, quantity)| {
                json!({
                    "region": region,
                    "product": product,
                    "quarter": quarter,
                    "sales": sales,
                    "quantity": quantity,
                })
            })
            .collect();

        json!({
            "status": "success",
            "filename": "sales.csv",
            "table_name": "sales",
            "data": data,
            "insights": [
                "Analysis complete: 12 records across 5 fields.",
                "Top performing category in 'region': 'North'."
            ],
            "schema": {
                "dimensions": Self::dimensions(),
                "measures": Self::measures(),
            }
        })
    }
}

/// The three-record example used throughout the pivot documentation.
pub fn revenue_payload() -> Value {
    json!({
        "status": "success",
        "data": [
            {"region": "US", "rev": "$1,000"},
            {"region": "US", "rev": "500"},
            {"region": "EU", "rev": "200%"}
        ],
        "schema": {"dimensions": ["region"], "measures": ["rev"]}
    })
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert that the labels of a response appear in the expected order.
pub fn assert_labels(response: &app_lib::PivotViewResponse, expected: &[&str]) {
    let labels: Vec<&str> = response.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, expected, "unexpected row labels");
}

/// Assert the formatted value of a labelled row.
pub fn assert_row(response: &app_lib::PivotViewResponse, label: &str, expected: &str) {
    let row = response
        .rows
        .iter()
        .find(|r| r.label == label)
        .unwrap_or_else(|| panic!("row '{}' not found", label));
    assert_eq!(row.formatted_value, expected, "row '{}'", label);
}
