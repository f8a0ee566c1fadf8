//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::PersistenceError;
use pivot_engine::{PivotRow, PivotRowType, PivotView};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

const SHEET_NAME: &str = "Pivot";

/// Writes the view as a single-sheet workbook. Aggregates are stored as
/// numbers so they stay usable in formulas; undefined figures become "N/A".
pub fn save_pivot_xlsx(view: &PivotView, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let number_format = if view.aggregation.decimal_places() == 0 { "#,##0" } else { "#,##0.00" };

    let header_format = Format::new().set_bold().set_border_bottom(FormatBorder::Thin);
    let value_header_format = header_format.clone().set_align(FormatAlign::Right);
    let value_format = Format::new().set_num_format(number_format);
    let total_label_format = Format::new().set_bold().set_border_top(FormatBorder::Double);
    let total_value_format = total_label_format.clone().set_num_format(number_format);

    worksheet.write_string_with_format(0, 0, &view.row_header, &header_format)?;
    worksheet.write_string_with_format(0, 1, &view.value_header, &value_header_format)?;

    let mut row_index: u32 = 1;
    for row in view.rows.iter().chain(std::iter::once(&view.grand_total)) {
        let (label_format, cell_format) = match row.row_type {
            PivotRowType::Data => (None, &value_format),
            PivotRowType::GrandTotal => (Some(&total_label_format), &total_value_format),
        };

        match label_format {
            Some(fmt) => worksheet.write_string_with_format(row_index, 0, &row.label, fmt)?,
            None => worksheet.write_string(row_index, 0, &row.label)?,
        };
        write_value(worksheet, row_index, row, cell_format)?;
        row_index += 1;
    }

    worksheet.set_column_width(0, column_width(view.rows.iter().map(|r| r.label.as_str()), &view.row_header))?;
    worksheet.set_column_width(1, column_width(std::iter::empty(), &view.value_header))?;

    xlsx.save(path)?;
    Ok(())
}

fn write_value(
    worksheet: &mut Worksheet,
    row_index: u32,
    row: &PivotRow,
    format: &Format,
) -> Result<(), PersistenceError> {
    match row.value {
        Some(n) if n.is_finite() => {
            worksheet.write_number_with_format(row_index, 1, n, format)?;
        }
        _ => {
            worksheet.write_string_with_format(row_index, 1, &row.formatted_value, format)?;
        }
    }
    Ok(())
}

/// Excel column width in characters, clamped to a readable range.
fn column_width<'a>(labels: impl Iterator<Item = &'a str>, header: &str) -> f64 {
    let widest = labels
        .map(|l| l.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0);
    (widest as f64 + 2.0).clamp(10.0, 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_engine::{render, AggregationResult, AggregationType};

    #[test]
    fn test_save_pivot_xlsx_writes_a_workbook() {
        let mut result = AggregationResult::new(AggregationType::Count);
        result.fold("North".to_string(), 1.0);
        result.fold("South".to_string(), 2.0);
        let view = render("region", "sales", &result);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pivot.xlsx");
        save_pivot_xlsx(&view, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // XLSX files are ZIP containers.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_save_pivot_xlsx_handles_empty_mean() {
        let view = render("region", "sales", &AggregationResult::new(AggregationType::Mean));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        assert!(save_pivot_xlsx(&view, &path).is_ok());
    }

    #[test]
    fn test_column_width_bounds() {
        assert_eq!(column_width(["a", "bb"].into_iter(), "X"), 10.0);
        assert_eq!(column_width(std::iter::once("x".repeat(100).as_str()), "X"), 60.0);
    }
}
