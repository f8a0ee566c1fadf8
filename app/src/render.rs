//! FILENAME: app/src/render.rs
// PURPOSE: Plain-text rendering of pivot views and KPI cards for the terminal.

use crate::kpi::DashboardKpis;
use pivot_engine::PivotView;

/// Renders the view as an aligned two-column table.
/// Labels are left-aligned, values right-aligned, and a rule separates the
/// grand total from the groups.
pub fn render_text_table(view: &PivotView) -> String {
    let lines = view.display_rows();

    let label_width = lines.iter().map(|[l, _]| l.chars().count()).max().unwrap_or(0);
    let value_width = lines.iter().map(|[_, v]| v.chars().count()).max().unwrap_or(0);
    let rule = format!("{}  {}", "-".repeat(label_width), "-".repeat(value_width));

    let mut out = String::new();
    let last = lines.len().saturating_sub(1);
    for (i, [label, value]) in lines.iter().enumerate() {
        if i == last {
            out.push_str(&rule);
            out.push('\n');
        }
        out.push_str(&format!("{:<lw$}  {:>vw$}\n", label, value, lw = label_width, vw = value_width));
        if i == 0 {
            out.push_str(&rule);
            out.push('\n');
        }
    }
    out
}

pub fn render_kpis(kpis: &DashboardKpis) -> String {
    let mut out = String::new();
    if let Some(name) = &kpis.source_name {
        out.push_str(&format!("Source:     {}\n", name));
    }
    out.push_str(&format!("Rows:       {}\n", engine::format_grouped(kpis.row_count as f64, 0)));
    out.push_str(&format!(
        "Columns:    {} ({} dimensions, {} measures)\n",
        kpis.column_count, kpis.dimension_count, kpis.measure_count
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_engine::{render, AggregationResult, AggregationType};

    #[test]
    fn test_render_text_table_layout() {
        let mut result = AggregationResult::new(AggregationType::Sum);
        result.fold("US".to_string(), 1500.0);
        result.fold("EU".to_string(), 200.0);
        let view = render("region", "rev", &result);

        let text = render_text_table(&view);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "REGION       SUM OF REV");
        assert_eq!(lines[1], "-----------  ----------");
        assert_eq!(lines[2], "EU               200.00");
        assert_eq!(lines[3], "US             1,500.00");
        assert_eq!(lines[4], "-----------  ----------");
        assert_eq!(lines[5], "GRAND TOTAL    1,700.00");
    }

    #[test]
    fn test_render_kpis() {
        let kpis = DashboardKpis {
            row_count: 12345,
            column_count: 4,
            dimension_count: 1,
            measure_count: 3,
            source_name: Some("sales.csv".to_string()),
        };
        let text = render_kpis(&kpis);
        assert!(text.contains("Source:     sales.csv"));
        assert!(text.contains("Rows:       12,345"));
        assert!(text.contains("4 (1 dimensions, 3 measures)"));
    }
}
