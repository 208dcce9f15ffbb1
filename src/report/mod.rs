//! # Reports
//!
//! Statistics over normalized tables, gathered into the two text reports the binary prints:
//! an overview of every sheet and a focused report on one sheet.
pub mod render;
pub mod stats;
pub mod summary;

use crate::config::DetailsOptions;
use crate::report::stats::Describe;
use crate::report::stats::Frequencies;
use crate::report::summary::ColumnSummary;
use crate::report::summary::DateRange;
use crate::report::summary::GroupSample;
use crate::report::summary::SummaryBody;
use crate::table::column::ColumnType;
use crate::table::value::Value;
use crate::table::Table;
use crate::table::TableError;

/// Rows shown in an overview's preview.
pub const PREVIEW_ROWS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct OverviewReport {
    pub workbook: String,
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetOverview>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetOverview {
    pub name: String,
    pub labels: Vec<String>,
    /// (rows, columns)
    pub shape: (usize, usize),
    pub types: Vec<(String, ColumnType)>,
    pub head: Vec<Vec<Value>>,
    pub unique_counts: Vec<(String, usize)>,
    pub null_counts: Vec<(String, usize)>,
    /// Every column with a single type; mixed columns have no summary
    pub summaries: Vec<ColumnSummary>,
    /// Every numeric column, in table order
    pub describes: Vec<(String, Describe)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailsReport {
    pub sheet: String,
    pub labels: Vec<String>,
    pub group_counts: Option<(String, Frequencies)>,
    pub samples: Vec<GroupSample>,
    pub date_range: Option<DateRange>,
    pub total_records: usize,
    pub unique_values: Vec<(String, Vec<Value>)>,
    pub null_counts: Vec<(String, usize)>,
    pub describes: Vec<(String, Describe)>,
}

impl OverviewReport {
    pub fn build(workbook: &str, sheet_names: Vec<String>, tables: &[Table]) -> Result<Self, TableError> {
        let sheets = tables
            .iter()
            .map(SheetOverview::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OverviewReport {
            workbook: workbook.to_owned(),
            sheet_names,
            sheets,
        })
    }
}

impl SheetOverview {
    pub fn build(table: &Table) -> Result<Self, TableError> {
        let summaries = table
            .columns
            .iter()
            .filter(|column| column.kind != ColumnType::Mixed)
            .map(|column| summary::summarize_column(table, &column.label, Some(PREVIEW_ROWS)))
            .collect::<Result<Vec<_>, TableError>>()?;
        let describes = summaries
            .iter()
            .filter_map(|summary| match &summary.body {
                SummaryBody::Numeric(describe) => Some((summary.label.to_owned(), describe.to_owned())),
                _ => None,
            })
            .collect();
        let labels: Vec<String> = table.labels().into_iter().map(str::to_owned).collect();
        Ok(SheetOverview {
            name: table.name.to_owned(),
            shape: table.shape(),
            types: table.columns.iter().map(|column| (column.label.to_owned(), column.kind)).collect(),
            head: summary::head(table, PREVIEW_ROWS),
            unique_counts: table
                .columns
                .iter()
                .map(|column| (column.label.to_owned(), summary::unique_count(column)))
                .collect(),
            null_counts: summary::null_counts(table, &labels)?,
            labels,
            summaries,
            describes,
        })
    }

    /// Min and max of every temporal column that holds values.
    pub fn date_ranges(&self) -> impl Iterator<Item = (&str, &Value, &Value)> {
        self.summaries.iter().filter_map(|summary| match &summary.body {
            SummaryBody::Temporal { min: Some(min), max: Some(max) } => Some((summary.label.as_str(), min, max)),
            _ => None,
        })
    }
}

impl DetailsReport {
    /// Resolves every requested label before computing anything.
    pub fn build(table: &Table, options: &DetailsOptions) -> Result<Self, TableError> {
        let key_columns: Vec<String> = if options.columns.is_empty() {
            table.labels().into_iter().map(str::to_owned).collect()
        } else {
            options.columns.to_owned()
        };
        for label in options
            .group_by
            .iter()
            .chain(&key_columns)
            .chain(&options.describe)
            .chain(&options.unique)
            .chain(&options.date_column)
        {
            table.column(label)?;
        }

        let (group_counts, samples) = match &options.group_by {
            Some(group) => {
                let counts = summary::value_counts(table, group)?.truncate(options.top);
                let samples = summary::group_samples(table, group, &key_columns, options.sample_size)?;
                (Some((group.to_owned(), counts)), samples)
            }
            None => (None, Vec::new()),
        };
        let unique_values = options
            .unique
            .iter()
            .map(|label| Ok((label.to_owned(), summary::sorted_unique(table, label)?)))
            .collect::<Result<Vec<_>, TableError>>()?;
        let describes = options
            .describe
            .iter()
            .map(|label| Ok((label.to_owned(), summary::describe(table, label)?)))
            .collect::<Result<Vec<_>, TableError>>()?;

        Ok(DetailsReport {
            sheet: table.name.to_owned(),
            labels: table.labels().into_iter().map(str::to_owned).collect(),
            group_counts,
            samples,
            date_range: summary::date_range(table, options.date_column.as_deref())?,
            total_records: table.row_count(),
            unique_values,
            null_counts: summary::null_counts(table, &key_columns)?,
            describes,
        })
    }
}
