//! FILENAME: core/pivot-engine/src/cleaning.rs
//! Value cleaning applied before aggregation.
//!
//! Uploaded spreadsheets routinely carry measures as text ("$1,000", "12%").
//! Cleaning turns such a cell into a number, and turns the group column into a
//! display label. Both are lossy on purpose: an unparsable measure becomes 0
//! and every kind of missing group value collapses into one bucket.

use engine::CellValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Label of the bucket collecting records without a usable group value.
pub const MISSING_GROUP_LABEL: &str = "Undefined";

/// Currency symbols, thousands separators and percent signs.
static DECORATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$,%]").expect("decoration pattern is valid"));

/// Longest leading decimal number: sign, digits, fraction, exponent.
static NUMBER_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("number prefix pattern is valid")
});

/// Converts a measure cell into the number that is aggregated.
///
/// Numbers pass through. Text has `$`, `,` and `%` removed, is trimmed, and its
/// leading numeric part is parsed ("12.5kg" reads as 12.5). Anything that
/// yields no number, including absent cells, booleans and NaN, becomes 0.
pub fn clean_numeric(value: Option<&CellValue>) -> f64 {
    let parsed = match value {
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Text(s)) => parse_decorated(s),
        Some(CellValue::Boolean(_)) | Some(CellValue::Empty) | None => 0.0,
    };

    if parsed.is_nan() {
        0.0
    } else {
        parsed
    }
}

fn parse_decorated(text: &str) -> f64 {
    let stripped = DECORATION_RE.replace_all(text, "");
    let trimmed = stripped.trim();

    NUMBER_PREFIX_RE
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Converts a group cell into its row label.
/// Missing, empty text, `false` and NaN map to [`MISSING_GROUP_LABEL`];
/// numeric zero keeps its own bucket ("0").
pub fn group_label(value: Option<&CellValue>) -> String {
    match value {
        Some(v) if !v.is_blank() => v.display_value(),
        _ => MISSING_GROUP_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_clean_numeric_passes_numbers_through() {
        assert_eq!(clean_numeric(Some(&CellValue::Number(42.5))), 42.5);
        assert_eq!(clean_numeric(Some(&CellValue::Number(-3.0))), -3.0);
        assert_eq!(clean_numeric(Some(&CellValue::Number(f64::NAN))), 0.0);
    }

    #[test]
    fn test_clean_numeric_strips_decorations() {
        assert_eq!(clean_numeric(Some(&text("$1,000"))), 1000.0);
        assert_eq!(clean_numeric(Some(&text("200%"))), 200.0);
        assert_eq!(clean_numeric(Some(&text("  $ 12.50 "))), 12.5);
        assert_eq!(clean_numeric(Some(&text("-$1,234.5"))), -1234.5);
        assert_eq!(clean_numeric(Some(&text("1.5e3"))), 1500.0);
    }

    #[test]
    fn test_clean_numeric_reads_leading_number() {
        assert_eq!(clean_numeric(Some(&text("12.5kg"))), 12.5);
        assert_eq!(clean_numeric(Some(&text("7 units"))), 7.0);
        assert_eq!(clean_numeric(Some(&text(".5"))), 0.5);
        assert_eq!(clean_numeric(Some(&text("3e"))), 3.0);
    }

    #[test]
    fn test_clean_numeric_falls_back_to_zero() {
        assert_eq!(clean_numeric(Some(&text(""))), 0.0);
        assert_eq!(clean_numeric(Some(&text("n/a"))), 0.0);
        assert_eq!(clean_numeric(Some(&text("$"))), 0.0);
        assert_eq!(clean_numeric(Some(&CellValue::Boolean(true))), 0.0);
        assert_eq!(clean_numeric(Some(&CellValue::Empty)), 0.0);
        assert_eq!(clean_numeric(None), 0.0);
    }

    #[test]
    fn test_clean_numeric_infinity() {
        assert_eq!(clean_numeric(Some(&text("Infinity"))), f64::INFINITY);
        assert_eq!(clean_numeric(Some(&text("-Infinity"))), f64::NEG_INFINITY);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        for raw in ["$1,000", "200%", "12.5kg", "garbage", "-0.25"] {
            let once = clean_numeric(Some(&text(raw)));
            let twice = clean_numeric(Some(&CellValue::Number(once)));
            assert_eq!(once, twice, "cleaning {:?} twice changed the value", raw);

            let via_text = clean_numeric(Some(&text(&once.to_string())));
            assert_eq!(once, via_text);
        }
    }

    #[test]
    fn test_group_label() {
        assert_eq!(group_label(Some(&text("US"))), "US");
        assert_eq!(group_label(Some(&CellValue::Number(0.0))), "0");
        assert_eq!(group_label(Some(&CellValue::Number(2019.0))), "2019");
        assert_eq!(group_label(Some(&CellValue::Number(2.5))), "2.5");
        assert_eq!(group_label(Some(&CellValue::Boolean(true))), "true");
    }

    #[test]
    fn test_group_label_exponent_range_numbers() {
        assert_eq!(group_label(Some(&CellValue::Number(1e21))), "1e+21");
        assert_eq!(group_label(Some(&CellValue::Number(1e-7))), "1e-7");
        assert_eq!(group_label(Some(&CellValue::Number(123456.0))), "123456");
    }

    #[test]
    fn test_group_label_missing_values() {
        assert_eq!(group_label(None), MISSING_GROUP_LABEL);
        assert_eq!(group_label(Some(&CellValue::Empty)), MISSING_GROUP_LABEL);
        assert_eq!(group_label(Some(&text(""))), MISSING_GROUP_LABEL);
        assert_eq!(group_label(Some(&CellValue::Boolean(false))), MISSING_GROUP_LABEL);
        assert_eq!(group_label(Some(&CellValue::Number(f64::NAN))), MISSING_GROUP_LABEL);
    }
}
