//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying aggregated values.
//! CONTEXT: Dashboard figures are shown in en-US style: thousands grouped with
//! commas and a fixed number of fraction digits.

/// Format a number with exactly `decimal_places` fraction digits and
/// thousands separators.
pub fn format_grouped(value: f64, decimal_places: usize) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }

    let rounded = format!("{:.prec$}", value, prec = decimal_places);
    add_thousands_separator(&rounded)
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
