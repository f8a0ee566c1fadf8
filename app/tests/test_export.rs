//! FILENAME: app/tests/test_export.rs
//! Integration tests for exporting the rendered pivot table.

mod common;

use app_lib::{export_pivot, export_pivot_text, DashboardConfig, ExportPivotRequest, NOTHING_TO_EXPORT};
use chrono::NaiveDate;
use common::{revenue_payload, SalesFixture, TestHarness};
use persistence::ExportFormat;
use std::path::Path;

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn request_in(dir: &Path, format: ExportFormat) -> ExportPivotRequest {
    ExportPivotRequest {
        directory: Some(dir.to_path_buf()),
        format,
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn read_csv_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_export_without_table_reports_nothing_to_export() {
    let dir = tempfile::tempdir().unwrap();
    let harness = TestHarness::new();

    let err = export_pivot(&harness.state, request_in(dir.path(), ExportFormat::Csv), export_date())
        .unwrap_err();
    assert_eq!(err, NOTHING_TO_EXPORT);
    assert_eq!(export_pivot_text(&harness.state).unwrap_err(), NOTHING_TO_EXPORT);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_csv_export_file_name_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let harness = TestHarness::with_sales_data();

    let path = export_pivot(&harness.state, request_in(dir.path(), ExportFormat::Csv), export_date())
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "GeniusBI_Pivot_2024-05-01.csv");

    let rows = read_csv_rows(&path);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], vec!["REGION", "SUM OF SALES"]);
    assert_eq!(rows[1], vec!["East", "35500.00"]);
    assert_eq!(rows[2], vec!["North", "39000.00"]);
    assert_eq!(rows[3], vec!["South", "53000.00"]);
    assert_eq!(rows[4], vec!["GRAND TOTAL", "127500.00"]);
}

#[test]
fn test_csv_export_quotes_every_cell() {
    let harness = TestHarness::new();
    harness.load(&revenue_payload()).unwrap();

    let text = export_pivot_text(&harness.state).unwrap();
    assert_eq!(
        text,
        "\"REGION\",\"SUM OF REV\"\r\n\
         \"EU\",\"200.00\"\r\n\
         \"US\",\"1500.00\"\r\n\
         \"GRAND TOTAL\",\"1700.00\"\r\n"
    );
}

#[test]
fn test_export_uses_configured_product_and_directory() {
    let dir = tempfile::tempdir().unwrap();
    let harness = TestHarness::with_config(DashboardConfig {
        product_name: "Acme".to_string(),
        export_dir: dir.path().to_path_buf(),
        ..Default::default()
    });
    harness.load(&SalesFixture::payload()).unwrap();

    let request = ExportPivotRequest {
        directory: None,
        format: ExportFormat::Csv,
    };
    let path = export_pivot(&harness.state, request, export_date()).unwrap();
    assert_eq!(path, dir.path().join("Acme_Pivot_2024-05-01.csv"));
    assert!(path.exists());
}

#[test]
fn test_xlsx_export_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let harness = TestHarness::with_sales_data();

    let path = export_pivot(&harness.state, request_in(dir.path(), ExportFormat::Xlsx), export_date())
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "GeniusBI_Pivot_2024-05-01.xlsx");

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
}

#[test]
fn test_export_reflects_latest_generate() {
    let harness = TestHarness::with_sales_data();
    app_lib::generate_pivot(
        &harness.state,
        app_lib::GeneratePivotRequest {
            group_field: Some("product".to_string()),
            value_field: None,
            aggregation: Some("count".to_string()),
        },
    )
    .unwrap();

    let text = export_pivot_text(&harness.state).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "\"PRODUCT\",\"COUNT OF SALES\"");
    assert_eq!(lines.last().copied(), Some("\"GRAND TOTAL\",\"12\""));
}
