//! Plain-text rendering of the reports.
//!
//! Output depends only on the report: tables never ask the terminal for its size, carry no color,
//! and floats use a fixed precision.

use crate::report::stats::Describe;
use crate::report::stats::Frequencies;
use crate::report::DetailsReport;
use crate::report::OverviewReport;
use crate::report::SheetOverview;
use crate::table::value::Value;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::CellAlignment;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use std::fmt::Display;
use std::fmt::Formatter;

impl Display for OverviewReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Workbook: {}", self.workbook)?;
        writeln!(f, "Sheets: {}", self.sheet_names.join(", "))?;
        for sheet in &self.sheets {
            writeln!(f)?;
            write!(f, "{sheet}")?;
        }
        Ok(())
    }
}

impl Display for SheetOverview {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Sheet: {} ===", self.name)?;
        writeln!(f, "Columns: {}", self.labels.join(", "))?;
        writeln!(f, "Shape: ({}, {})", self.shape.0, self.shape.1)?;

        writeln!(f, "Column types:")?;
        let mut types = new_table(vec!["column", "type"]);
        for (label, kind) in &self.types {
            types.add_row(vec![label.to_owned(), kind.to_string()]);
        }
        writeln!(f, "{types}")?;

        writeln!(f, "First {} rows:", self.head.len())?;
        let mut head = new_table(self.labels.iter().map(String::as_str).collect());
        for row in &self.head {
            head.add_row(row.iter().map(Value::to_string).collect::<Vec<_>>());
        }
        writeln!(f, "{head}")?;

        writeln!(f, "Unique values and nulls per column:")?;
        let mut unique = new_table(vec!["column", "unique", "nulls"]);
        for ((label, count), (_, nulls)) in self.unique_counts.iter().zip(&self.null_counts) {
            unique.add_row(vec![label.to_owned(), count.to_string(), nulls.to_string()]);
        }
        align_column(&mut unique, 1, CellAlignment::Right);
        align_column(&mut unique, 2, CellAlignment::Right);
        writeln!(f, "{unique}")?;

        for (label, min, max) in self.date_ranges() {
            writeln!(f, "Date range of '{label}': {min} to {max}")?;
        }

        if !self.describes.is_empty() {
            writeln!(f, "Summary statistics:")?;
            writeln!(f, "{}", describe_table(&self.describes))?;
        }
        Ok(())
    }
}

impl Display for DetailsReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Sheet: {} ===", self.sheet)?;
        writeln!(f, "Columns: {}", self.labels.join(", "))?;

        if let Some((label, frequencies)) = &self.group_counts {
            writeln!(f)?;
            writeln!(f, "Value counts of '{label}':")?;
            writeln!(f, "{}", frequency_table(label, frequencies))?;
        }

        for sample in &self.samples {
            writeln!(f)?;
            writeln!(f, "Sample rows for {} = {}:", self.group_counts.as_ref().map(|(label, _)| label.as_str()).unwrap_or(""), sample.group)?;
            let mut rows = new_table(sample.columns.iter().map(String::as_str).collect());
            for row in &sample.rows {
                rows.add_row(row.iter().map(Value::to_string).collect::<Vec<_>>());
            }
            writeln!(f, "{rows}")?;
        }

        writeln!(f)?;
        match &self.date_range {
            Some(range) => writeln!(f, "Date range of '{}': {} to {}", range.column, range.min, range.max)?,
            None => writeln!(f, "Date range: no dated values")?,
        }
        writeln!(f, "Total records: {}", self.total_records)?;

        for (label, values) in &self.unique_values {
            let values: Vec<String> = values.iter().map(Value::to_string).collect();
            writeln!(f, "Unique values of '{label}': {}", values.join(", "))?;
        }

        if !self.null_counts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Null counts:")?;
            let mut nulls = new_table(vec!["column", "nulls"]);
            for (label, count) in &self.null_counts {
                nulls.add_row(vec![label.to_owned(), count.to_string()]);
            }
            align_column(&mut nulls, 1, CellAlignment::Right);
            writeln!(f, "{nulls}")?;
        }

        if !self.describes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Summary statistics:")?;
            writeln!(f, "{}", describe_table(&self.describes))?;
        }
        Ok(())
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .force_no_tty()
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// One row per statistic, one column per described column.
fn describe_table(describes: &[(String, Describe)]) -> Table {
    let mut header = vec![""];
    header.extend(describes.iter().map(|(label, _)| label.as_str()));
    let mut table = new_table(header);
    let columns: Vec<[(&str, f64); 8]> = describes.iter().map(|(_, describe)| describe.rows()).collect();
    let Some(first) = columns.first() else {
        return table;
    };
    for (index, (name, _)) in first.iter().enumerate() {
        let mut row = vec![name.to_string()];
        row.extend(columns.iter().map(|rows| format_statistic(rows[index].1)));
        table.add_row(row);
    }
    for index in 1..=describes.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

fn frequency_table(label: &str, frequencies: &Frequencies) -> Table {
    let mut table = new_table(vec![label, "count"]);
    for (value, count) in &frequencies.entries {
        table.add_row(vec![value.to_string(), count.to_string()]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

fn format_statistic(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetailsOptions;
    use crate::table::column::Column;

    fn table() -> crate::table::Table {
        crate::table::Table::new("MCP Details", vec![
            Column::new("TYPE", vec![Value::Text("DAM".into()), Value::Text("RTM".into()), Value::Text("DAM".into())]),
            Column::new("MCP (Rs./kWh)", vec![Value::Float(1.0), Value::Float(2.0), Value::Null]),
        ]).unwrap()
    }

    #[test]
    fn rendering_is_deterministic() {
        let options = DetailsOptions {
            group_by: Some("TYPE".into()),
            describe: vec!["MCP (Rs./kWh)".into()],
            ..DetailsOptions::default()
        };
        let first = DetailsReport::build(&table(), &options).unwrap().to_string();
        let second = DetailsReport::build(&table(), &options).unwrap().to_string();
        assert_eq!(first, second);
        assert!(first.contains("Value counts of 'TYPE':"));
        assert!(first.contains("Sample rows for TYPE = DAM:"));
        assert!(first.contains("Total records: 3"));
        assert!(first.contains("0.707107"));
        assert!(!first.contains('\u{1b}'));
    }

    #[test]
    fn overview_lists_sheets_and_shape() {
        let report = OverviewReport::build("prices.xlsx", vec!["MCP Details".into(), "Notes".into()], &[table()]).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("Workbook: prices.xlsx\nSheets: MCP Details, Notes\n"));
        assert!(text.contains("Shape: (3, 2)"));
        assert!(text.contains("First 3 rows:"));
        assert!(text.contains("NaN"));
        assert!(text.contains("Unique values and nulls per column:"));
    }

    #[test]
    fn statistics_use_fixed_precision() {
        assert_eq!(format_statistic(1.5811388300841898), "1.581139");
        assert_eq!(format_statistic(f64::NAN), "NaN");
    }
}
