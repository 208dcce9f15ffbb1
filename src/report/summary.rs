//! Per-column summaries and the lookups the reports are assembled from.
//!
//! Every operation resolves its labels through [`Table::column`], so a label missing
//! after normalization fails with [`TableError::ColumnNotFound`] before any work is done.

use crate::report::stats::Describe;
use crate::report::stats::Frequencies;
use crate::table::column::Column;
use crate::table::column::ColumnType;
use crate::table::value::Value;
use crate::table::Table;
use crate::table::TableError;
use std::collections::HashMap;
use std::collections::HashSet;

/// Default number of rows shown per group.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSummary {
    pub label: String,
    pub kind: ColumnType,
    pub unique: usize,
    pub nulls: usize,
    pub non_null: usize,
    pub body: SummaryBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SummaryBody {
    Numeric(Describe),
    Categorical(Frequencies),
    Temporal { min: Option<Value>, max: Option<Value> },
}

/// The first rows of one group, restricted to the requested columns.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSample {
    pub group: Value,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DateRange {
    pub column: String,
    pub min: Value,
    pub max: Value,
}

/// Summarizes a column according to its type. `top` limits categorical frequency tables.
pub fn summarize_column(table: &Table, label: &str, top: Option<usize>) -> Result<ColumnSummary, TableError> {
    let column = table.column(label)?;
    let body = match column.kind {
        kind if kind.is_numeric() => SummaryBody::Numeric(describe_column(column)?),
        kind if kind.is_categorical() => SummaryBody::Categorical(count_values(column)?.truncate(top)),
        kind if kind.is_temporal() => {
            let (min, max) = min_max(column);
            SummaryBody::Temporal { min, max }
        }
        kind => Err(unsupported(column, kind, "summaries"))?,
    };
    Ok(ColumnSummary {
        label: column.label.to_owned(),
        kind: column.kind,
        unique: unique_count(column),
        nulls: column.null_count(),
        non_null: column.non_null_count(),
        body,
    })
}

/// Distinct non-null values with counts, most frequent first.
pub fn value_counts(table: &Table, label: &str) -> Result<Frequencies, TableError> {
    count_values(table.column(label)?)
}

pub fn describe(table: &Table, label: &str) -> Result<Describe, TableError> {
    describe_column(table.column(label)?)
}

/// Null count of each requested column, in request order.
pub fn null_counts<S: AsRef<str>>(table: &Table, labels: &[S]) -> Result<Vec<(String, usize)>, TableError> {
    labels
        .iter()
        .map(|label| {
            let column = table.column(label.as_ref())?;
            Ok((column.label.to_owned(), column.null_count()))
        })
        .collect()
}

/// Number of distinct non-null values.
pub fn unique_count(column: &Column) -> usize {
    column
        .non_null()
        .map(Value::distinct_key)
        .collect::<HashSet<_>>()
        .len()
}

/// For each distinct non-null value of `group_label`, in first-seen order, the first
/// `k` rows of that group projected onto `columns`.
pub fn group_samples<S: AsRef<str>>(
    table: &Table,
    group_label: &str,
    columns: &[S],
    k: usize,
) -> Result<Vec<GroupSample>, TableError> {
    let group = table.column(group_label)?;
    let projection = columns
        .iter()
        .map(|label| table.column(label.as_ref()))
        .collect::<Result<Vec<&Column>, TableError>>()?;
    let labels: Vec<String> = projection.iter().map(|column| column.label.to_owned()).collect();

    let mut positions = HashMap::<(u8, String), usize>::new();
    let mut samples = Vec::<GroupSample>::new();
    for (row, value) in group.values.iter().enumerate() {
        if value.is_null() {
            continue;
        }
        let position = *positions.entry(value.distinct_key()).or_insert_with(|| {
            samples.push(GroupSample {
                group: value.to_owned(),
                columns: labels.to_owned(),
                rows: Vec::new(),
            });
            samples.len() - 1
        });
        let sample = &mut samples[position];
        if sample.rows.len() < k {
            sample.rows.push(projection.iter().map(|column| column.values[row].to_owned()).collect());
        }
    }
    Ok(samples)
}

/// Min and max of `label`, or of the first temporal column when no label is given.
/// `None` when there is no temporal column or it holds no values.
pub fn date_range(table: &Table, label: Option<&str>) -> Result<Option<DateRange>, TableError> {
    let column = match label {
        Some(label) => {
            let column = table.column(label)?;
            if !column.kind.is_temporal() {
                Err(unsupported(column, column.kind, "date ranges"))?
            }
            column
        }
        None => match table.columns.iter().find(|column| column.kind.is_temporal()) {
            Some(column) => column,
            None => return Ok(None),
        },
    };
    let range = match min_max(column) {
        (Some(min), Some(max)) => Some(DateRange {
            column: column.label.to_owned(),
            min,
            max,
        }),
        _ => None,
    };
    Ok(range)
}

/// Distinct non-null values in ascending order.
pub fn sorted_unique(table: &Table, label: &str) -> Result<Vec<Value>, TableError> {
    let column = table.column(label)?;
    let mut seen = HashSet::new();
    let mut values: Vec<Value> = column
        .non_null()
        .filter(|value| seen.insert(value.distinct_key()))
        .cloned()
        .collect();
    values.sort_by(Value::total_cmp);
    Ok(values)
}

/// The first `n` rows, every column.
pub fn head(table: &Table, n: usize) -> Vec<Vec<Value>> {
    (0..table.row_count().min(n))
        .map(|row| table.row(row).into_iter().cloned().collect())
        .collect()
}

fn count_values(column: &Column) -> Result<Frequencies, TableError> {
    if column.kind == ColumnType::Mixed {
        Err(unsupported(column, column.kind, "value counts"))?
    }
    Ok(Frequencies::count(&column.values))
}

fn describe_column(column: &Column) -> Result<Describe, TableError> {
    if !column.kind.is_numeric() {
        Err(unsupported(column, column.kind, "descriptive statistics"))?
    }
    let values: Vec<f64> = column.non_null().filter_map(Value::as_f64).collect();
    Ok(Describe::from_values(&values))
}

fn min_max(column: &Column) -> (Option<Value>, Option<Value>) {
    let min = column.non_null().min_by(|a, b| a.total_cmp(b)).cloned();
    let max = column.non_null().max_by(|a, b| a.total_cmp(b)).cloned();
    (min, max)
}

fn unsupported(column: &Column, kind: ColumnType, operation: &'static str) -> TableError {
    TableError::UnsupportedType {
        column: column.label.to_owned(),
        kind,
        operation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn text(values: &[&str]) -> Vec<Value> {
        values.iter().map(|value| Value::Text(value.to_string())).collect()
    }

    fn date(day: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(2024, 4, day).unwrap())
    }

    fn market() -> Table {
        Table::new("MCP Details", vec![
            Column::new("TYPE", text(&["DAM", "RTM", "DAM", "GDAM", "DAM"])),
            Column::new("Date", vec![date(3), date(1), Value::Null, date(2), date(5)]),
            Column::new("Year", vec![Value::Integer(2024), Value::Integer(2023), Value::Integer(2024), Value::Null, Value::Integer(2022)]),
            Column::new("MCP (Rs./kWh)", vec![Value::Float(1.0), Value::Float(2.0), Value::Float(3.0), Value::Float(4.0), Value::Float(5.0)]),
            Column::new("Note", vec![Value::Integer(1), Value::Text("x".into()), Value::Null, Value::Null, Value::Null]),
        ]).unwrap()
    }

    #[test]
    fn summaries_by_type() {
        let table = market();
        let summary = summarize_column(&table, "TYPE", None).unwrap();
        assert_eq!(summary.unique, 3);
        match summary.body {
            SummaryBody::Categorical(frequencies) => assert_eq!(frequencies.entries[0], (Value::Text("DAM".into()), 3)),
            other => panic!("unexpected body {other:?}"),
        }

        let summary = summarize_column(&table, "MCP (Rs./kWh)", None).unwrap();
        assert!(matches!(summary.body, SummaryBody::Numeric(ref describe) if describe.count == 5));

        let summary = summarize_column(&table, "Date", None).unwrap();
        assert_eq!(summary.nulls, 1);
        assert_eq!(summary.body, SummaryBody::Temporal { min: Some(date(1)), max: Some(date(5)) });

        let error = summarize_column(&table, "Note", None).unwrap_err();
        assert!(matches!(error, TableError::UnsupportedType { kind: ColumnType::Mixed, .. }));
    }

    #[test]
    fn missing_labels_fail_eagerly() {
        let table = market();
        assert!(matches!(value_counts(&table, "type"), Err(TableError::ColumnNotFound { .. })));
        assert!(matches!(null_counts(&table, &["TYPE", "MCV (GW)"]), Err(TableError::ColumnNotFound { .. })));
        assert!(matches!(group_samples(&table, "TYPE", &["Nope"], 2), Err(TableError::ColumnNotFound { .. })));
    }

    #[test]
    fn describe_rejects_text_and_mixed() {
        let table = market();
        assert!(matches!(describe(&table, "TYPE"), Err(TableError::UnsupportedType { .. })));
        assert!(matches!(value_counts(&table, "Note"), Err(TableError::UnsupportedType { .. })));
    }

    #[test]
    fn groups_keep_first_seen_order_and_limit_rows() {
        let table = market();
        let samples = group_samples(&table, "TYPE", &["Year", "MCP (Rs./kWh)"], 2).unwrap();
        let groups: Vec<String> = samples.iter().map(|sample| sample.group.to_string()).collect();
        assert_eq!(groups, vec!["DAM", "RTM", "GDAM"]);
        assert_eq!(samples[0].rows, vec![
            vec![Value::Integer(2024), Value::Float(1.0)],
            vec![Value::Integer(2024), Value::Float(3.0)],
        ]);
        assert_eq!(samples[0].columns, vec!["Year", "MCP (Rs./kWh)"]);
    }

    #[test]
    fn date_range_defaults_to_first_temporal_column() {
        let table = market();
        let range = date_range(&table, None).unwrap().unwrap();
        assert_eq!((range.column.as_str(), range.min, range.max), ("Date", date(1), date(5)));
        assert!(matches!(date_range(&table, Some("Year")), Err(TableError::UnsupportedType { .. })));

        let undated = Table::new("Sheet1", vec![Column::new("TYPE", text(&["DAM"]))]).unwrap();
        assert_eq!(date_range(&undated, None).unwrap(), None);
    }

    #[test]
    fn sorted_unique_years() {
        let years = sorted_unique(&market(), "Year").unwrap();
        assert_eq!(years, vec![Value::Integer(2022), Value::Integer(2023), Value::Integer(2024)]);
    }

    #[test]
    fn head_stops_at_table_end() {
        let table = market();
        assert_eq!(head(&table, 2).len(), 2);
        assert_eq!(head(&table, 50).len(), 5);
        assert_eq!(head(&table, 1)[0][0], Value::Text("DAM".into()));
    }

    proptest! {
        #[test]
        fn nulls_and_non_nulls_add_up_to_rows(cells in proptest::collection::vec(proptest::option::of(-50i64..50), 0..40)) {
            let values: Vec<Value> = cells.iter().map(|cell| cell.map(Value::Integer).unwrap_or(Value::Null)).collect();
            let table = Table::new("Sheet1", vec![Column::new("x", values)]).unwrap();
            let counts = null_counts(&table, &["x"]).unwrap();
            let summary = summarize_column(&table, "x", None).unwrap();
            prop_assert_eq!(counts[0].1 + summary.non_null, table.row_count());
            let frequencies = value_counts(&table, "x").unwrap();
            prop_assert_eq!(frequencies.entries.iter().map(|(_, count)| count).sum::<usize>(), summary.non_null);
        }
    }
}
