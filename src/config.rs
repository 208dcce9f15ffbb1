//! Typed options for the library operations the CLI drives.
//!
//! Nothing here has a hard-coded workbook path; the binary fills these from arguments.

use crate::report::summary::DEFAULT_SAMPLE_SIZE;
pub use crate::spreadsheet::LoadOptions;
use std::path::PathBuf;

/// What the details report covers. Sections whose inputs are absent are left out.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailsOptions {
    /// Column whose values are counted and whose groups are sampled
    pub group_by: Option<String>,
    /// Key columns: the projection of group samples and the targets of null counts.
    /// Empty means every column.
    pub columns: Vec<String>,
    /// Rows shown per group
    pub sample_size: usize,
    /// Numeric columns to describe
    pub describe: Vec<String>,
    /// Columns whose sorted distinct values are listed
    pub unique: Vec<String>,
    /// Temporal column for the date range; the first temporal column when absent
    pub date_column: Option<String>,
    /// Limit on frequency table entries
    pub top: Option<usize>,
}

impl Default for DetailsOptions {
    fn default() -> Self {
        Self {
            group_by: None,
            columns: Vec::new(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            describe: Vec::new(),
            unique: Vec::new(),
            date_column: None,
            top: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    pub sheet: String,
    pub output: PathBuf,
}
