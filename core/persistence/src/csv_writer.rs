//! FILENAME: core/persistence/src/csv_writer.rs

use crate::PersistenceError;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use pivot_engine::PivotView;
use std::fs;
use std::path::Path;

/// Encodes every visible line of the view (header, groups, grand total) as
/// delimited text. Each field is quoted, embedded quotes are doubled and
/// lines end with CRLF. Commas were already stripped from the cell text.
pub fn encode_pivot_csv(view: &PivotView) -> Result<String, PersistenceError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    for row in view.export_rows() {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PersistenceError::Io(e.into_error()))?;

    // Only UTF-8 strings were written.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn save_pivot_csv(view: &PivotView, path: &Path) -> Result<(), PersistenceError> {
    let content = encode_pivot_csv(view)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::ReaderBuilder;
    use pivot_engine::{render, AggregationResult, AggregationType};

    fn sample_view() -> PivotView {
        let mut result = AggregationResult::new(AggregationType::Sum);
        result.fold("US".to_string(), 1000.0);
        result.fold("US".to_string(), 500.0);
        result.fold("EU".to_string(), 200.0);
        result.fold("Say \"hi\", Inc".to_string(), 7.25);
        render("region", "rev", &result)
    }

    #[test]
    fn test_encode_quotes_every_field() {
        let text = encode_pivot_csv(&sample_view()).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();

        assert_eq!(lines[0], "\"REGION\",\"SUM OF REV\"");
        assert_eq!(lines[1], "\"EU\",\"200.00\"");
        assert_eq!(lines[2], "\"Say \"\"hi\"\" Inc\",\"7.25\"");
        assert_eq!(lines[3], "\"US\",\"1500.00\"");
        assert_eq!(lines[4], "\"GRAND TOTAL\",\"1707.25\"");
        assert_eq!(lines[5], "");
        assert!(text.ends_with("\r\n"));
    }

    #[test]
    fn test_round_trip_recovers_labels_and_values() {
        let view = sample_view();
        let text = encode_pivot_csv(&view).unwrap();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(text.as_bytes());
        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();

        let expected: Vec<Vec<String>> = view.export_rows().into_iter().map(|r| r.to_vec()).collect();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.len(), view.line_count());

        for (row, line) in view.rows.iter().zip(parsed.iter().skip(1)) {
            let number: f64 = line[1].parse().unwrap();
            assert!((number - row.value.unwrap()).abs() < 0.005);
        }
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pivot.csv");
        save_pivot_csv(&sample_view(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("\"REGION\",\"SUM OF REV\"\r\n"));
    }
}
