//! Atomic CSV export of a table.

use crate::error::InspectError;
use crate::table::Table;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Header of the written file
    pub labels: Vec<String>,
}

/// Writes `table` as CSV: one header row of labels, then the data rows, no index column.
///
/// The file is written next to `destination` and renamed into place once complete, so a
/// failed export leaves nothing at `destination`.
pub fn export_csv(table: &Table, destination: &Path) -> Result<ExportSummary, InspectError> {
    let write_error = |source: io::Error| ExportError::Write {
        path: destination.to_path_buf(),
        source,
    };
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(parent).map_err(write_error)?;
    {
        let mut writer = csv::Writer::from_writer(temp.as_file());
        if !table.columns.is_empty() {
            writer.write_record(table.labels()).map_err(|e| write_error(e.into()))?;
            for row in 0..table.row_count() {
                let fields = table.row(row).into_iter().map(|value| value.to_field());
                writer.write_record(fields).map_err(|e| write_error(e.into()))?;
            }
        }
        writer.flush().map_err(write_error)?;
    }
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(destination).map_err(|e| write_error(e.error))?;

    let (rows, columns) = table.shape();
    tracing::info!(path = %destination.display(), rows, columns, "export written");
    Ok(ExportSummary {
        path: destination.to_path_buf(),
        rows,
        columns,
        labels: table.labels().into_iter().map(str::to_owned).collect(),
    })
}
