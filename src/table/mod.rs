//! # Tables
//!
//! A [`Table`] is the typed, column-oriented view of one sheet. Labels are unique and
//! resolved once through a schema; every lookup by label goes through [`Table::column`]
//! and fails eagerly with [`TableError::ColumnNotFound`].
mod build;
pub mod column;
pub mod normalize;
pub mod value;

use crate::table::column::Column;
use crate::table::column::ColumnType;
use crate::table::value::Value;
use std::collections::HashMap;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{column}' not found in '{table}' (available: {})", .available.join(", "))]
    ColumnNotFound {
        table: String,
        column: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' of type {kind} does not support {operation}")]
    UnsupportedType {
        column: String,
        kind: ColumnType,
        operation: &'static str,
    },

    #[error("Column '{column}' has {found} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Clone, Debug)]
pub struct Table {
    /// Sheet name
    pub name: String,
    /// Columns in sheet order, all of equal length
    pub columns: Vec<Column>,
    schema: HashMap<String, usize>,
}

impl Table {
    /// Validates that all columns have equal length and de-duplicates labels.
    pub fn new(name: &str, columns: Vec<Column>) -> Result<Self, TableError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(column) = columns.iter().find(|column| column.len() != expected) {
                Err(TableError::RaggedColumns {
                    column: column.label.to_owned(),
                    expected,
                    found: column.len(),
                })?
            }
        }
        Ok(Self::assemble(name, columns))
    }

    /// Re-indexes columns and rebuilds the schema. Callers guarantee equal lengths.
    fn assemble(name: &str, mut columns: Vec<Column>) -> Self {
        let labels = dedupe_labels(columns.iter().map(|column| column.label.to_owned()).collect());
        for (index, (column, label)) in columns.iter_mut().zip(labels).enumerate() {
            column.index = index;
            column.label = label;
        }
        let schema = columns
            .iter()
            .map(|column| (column.label.to_owned(), column.index))
            .collect();
        Self {
            name: name.to_owned(),
            columns,
            schema,
        }
    }

    pub fn column(&self, label: &str) -> Result<&Column, TableError> {
        self.schema
            .get(label)
            .map(|index| &self.columns[*index])
            .ok_or_else(|| TableError::ColumnNotFound {
                table: self.name.to_owned(),
                column: label.to_owned(),
                available: self.labels().into_iter().map(str::to_owned).collect(),
            })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.label.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.columns.len())
    }

    pub fn row(&self, index: usize) -> Vec<&Value> {
        self.columns.iter().map(|column| &column.values[index]).collect()
    }
}

/// Suffixes repeated labels with `.1`, `.2`, ... in order of appearance,
/// skipping suffixes that collide with labels already taken.
pub(crate) fn dedupe_labels(labels: Vec<String>) -> Vec<String> {
    let mut taken = HashSet::<String>::new();
    let mut counters = HashMap::<String, usize>::new();
    labels
        .into_iter()
        .map(|label| {
            let mut candidate = label.to_owned();
            if taken.contains(&candidate) {
                let counter = counters.entry(label.to_owned()).or_insert(0);
                loop {
                    *counter += 1;
                    candidate = format!("{label}.{counter}");
                    if !taken.contains(&candidate) {
                        break;
                    }
                }
            }
            taken.insert(candidate.to_owned());
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Vec<Value> {
        values.iter().map(|value| Value::Text(value.to_string())).collect()
    }

    #[test]
    fn duplicate_labels_get_suffixes() {
        let labels = dedupe_labels(vec!["A".into(), "B".into(), "A".into(), "A.1".into(), "A".into()]);
        assert_eq!(labels, vec!["A", "B", "A.1", "A.1.1", "A.2"]);
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let error = Table::new("Sheet1", vec![
            Column::new("TYPE", text(&["DAM", "RTM"])),
            Column::new("Year", vec![Value::Integer(2024)]),
        ]).unwrap_err();
        assert!(matches!(error, TableError::RaggedColumns { ref column, expected: 2, found: 1 } if column == "Year"));
    }

    #[test]
    fn lookups_go_through_the_schema() {
        let table = Table::new("Sheet1", vec![
            Column::new("TYPE", text(&["DAM", "RTM"])),
            Column::new("TYPE", text(&["x", "y"])),
        ]).unwrap();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.column("TYPE.1").unwrap().index, 1);
        let error = table.column("type").unwrap_err();
        assert_eq!(error.to_string(), "Column 'type' not found in 'Sheet1' (available: TYPE, TYPE.1)");
    }

    #[test]
    fn empty_tables_have_no_rows() {
        let table = Table::new("Empty", Vec::new()).unwrap();
        assert_eq!(table.shape(), (0, 0));
    }
}
