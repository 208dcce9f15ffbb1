//! # Workbook Loading
//!
//! Opens Office Open XML (`.xlsx`, `.xlsm`, `.xltx`, `.xltm`, `.xlam`), OpenDocument (`.ods`)
//! and delimited text (`.csv`) files, reads the selected sheets cell by cell and turns each
//! into a [`Table`].
pub(crate) mod cell;
pub(crate) mod criteria;
pub(crate) mod delimited;
pub(crate) mod excel;
pub(crate) mod ods;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod xlsx;

use crate::error::InspectError;
use crate::error::ResultMessage;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::delimited::DelimitedSpreadsheet;
use crate::spreadsheet::ods::OdsSpreadsheet;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use crate::table::Table;
pub use criteria::LoadOptions;
pub use criteria::SheetSelector;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

/// Errors raised while locating and reading a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Workbook '{0}' does not exist")]
    NotFound(String),

    #[error("Sheet '{sheet}' not found in '{file}' (available: {})", .available.join(", "))]
    SheetNotFound {
        file: String,
        sheet: String,
        available: Vec<String>,
    },

    #[error("Unsupported workbook format '{0}'")]
    UnsupportedFormat(String),

    #[error("Missing part '{0}' in workbook container")]
    FileError(String),

    #[error("Workbook '{0}' contains no sheets")]
    SpreadsheetEmptyError(String),

    #[error("Workbook '{0}' is password protected")]
    SpreadsheetPasswordProtectedError(String),

    #[error("Invalid cell value in '{0}' sheet '{1}' at {2}: '{3}'")]
    CellValueError(String, String, String, String),
}

/// A workbook format reader.
pub(crate) trait Spreadsheet {
    /// Path of the workbook, as given by the caller.
    fn name(&self) -> String;

    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the cells of every sheet accepted by `criteria`, in workbook order.
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, InspectError>;
}

/// Opens a workbook with the reader its extension calls for.
pub(crate) fn open_spreadsheet(path: &Path) -> Result<Box<dyn Spreadsheet>, InspectError> {
    let name = path.display().to_string();
    if !path.exists() {
        Err(SpreadsheetError::NotFound(name.clone()))?
    }

    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(|extension| extension.to_ascii_lowercase());
    let spreadsheet: Box<dyn Spreadsheet> = match extension.as_deref() {
        Some("xlsx") | Some("xlsm") | Some("xltx") | Some("xltm") | Some("xlam") => {
            Box::new(XlsxSpreadsheet::open(path).with_prefix(&name)?)
        }
        Some("ods") => Box::new(OdsSpreadsheet::open(path).with_prefix(&name)?),
        Some("csv") => Box::new(DelimitedSpreadsheet::open(path)?),
        _ => Err(SpreadsheetError::UnsupportedFormat(name.to_owned()))?,
    };
    tracing::debug!(workbook = %name, sheets = ?spreadsheet.sheet_names(), "opened workbook");
    Ok(spreadsheet)
}

/// Lists the sheet names of a workbook in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, InspectError> {
    Ok(open_spreadsheet(path)?.sheet_names())
}

/// Loads every sheet accepted by `selector` as a table, in workbook order.
///
/// A [`SheetSelector::Named`] sheet that the workbook does not contain fails with
/// [`SpreadsheetError::SheetNotFound`]; names are never matched loosely.
/// The workbook is closed before this returns.
pub fn load_tables(path: &Path, selector: &SheetSelector, options: &LoadOptions) -> Result<Vec<Table>, InspectError> {
    let mut spreadsheet = open_spreadsheet(path)?;
    let name = spreadsheet.name();
    if let SheetSelector::Named(sheet) = selector {
        let available = spreadsheet.sheet_names();
        if !available.iter().any(|it| it == sheet) {
            Err(SpreadsheetError::SheetNotFound {
                file: name.to_owned(),
                sheet: sheet.to_owned(),
                available,
            })?
        }
    }

    let criteria = Criteria {
        sheets: selector.to_owned(),
        error_as_null: options.error_as_null,
        nulls: options.nulls.to_owned(),
    };
    let sheets = spreadsheet.read_sheets(&criteria).with_prefix(&name)?;
    drop(spreadsheet);

    sheets
        .iter()
        .map(|sheet| {
            let table = Table::from_sheet(sheet, options)?;
            tracing::info!(
                workbook = %name,
                sheet = %table.name,
                rows = table.row_count(),
                columns = table.columns.len(),
                "loaded sheet"
            );
            Ok(table)
        })
        .collect()
}

/// Loads the single sheet named `sheet_name`.
pub fn load_table(path: &Path, sheet_name: &str, options: &LoadOptions) -> Result<Table, InspectError> {
    let selector = SheetSelector::Named(sheet_name.to_owned());
    load_tables(path, &selector, options)?
        .into_iter()
        .next()
        .ok_or_else(|| SpreadsheetError::SheetNotFound {
            file: path.display().to_string(),
            sheet: sheet_name.to_owned(),
            available: Vec::new(),
        }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_workbooks_are_not_found() {
        let error = sheet_names(Path::new("no/such/workbook.xlsx")).unwrap_err();
        assert!(matches!(error, InspectError::SpreadsheetError(SpreadsheetError::NotFound(_))));
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let error = sheet_names(Path::new("Cargo.toml")).unwrap_err();
        assert!(matches!(error, InspectError::SpreadsheetError(SpreadsheetError::UnsupportedFormat(ref name)) if name == "Cargo.toml"));
    }

    #[test]
    fn sheet_not_found_lists_available_sheets() {
        let error = SpreadsheetError::SheetNotFound {
            file: "prices.xlsx".to_string(),
            sheet: "mcp details".to_string(),
            available: vec!["MCP Details".to_string(), "Summary".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Sheet 'mcp details' not found in 'prices.xlsx' (available: MCP Details, Summary)"
        );
    }
}
