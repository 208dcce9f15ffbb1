//! The three workflows behind the binary's subcommands:
//! load, then normalize, then report or export.

use crate::config::ConvertOptions;
use crate::config::DetailsOptions;
use crate::error::InspectError;
use crate::export::export_csv;
use crate::export::ExportSummary;
use crate::report::DetailsReport;
use crate::report::OverviewReport;
use crate::spreadsheet;
use crate::spreadsheet::LoadOptions;
use crate::spreadsheet::SheetSelector;
use crate::table::normalize::normalize;
use std::path::Path;

/// Overview of every selected sheet.
pub fn run_analyze(workbook: &Path, selector: &SheetSelector, options: &LoadOptions) -> Result<OverviewReport, InspectError> {
    let sheet_names = spreadsheet::sheet_names(workbook)?;
    let tables: Vec<_> = spreadsheet::load_tables(workbook, selector, options)?
        .into_iter()
        .map(normalize)
        .collect();
    Ok(OverviewReport::build(&workbook.display().to_string(), sheet_names, &tables)?)
}

/// Focused report on one sheet.
pub fn run_details(
    workbook: &Path,
    sheet: &str,
    options: &LoadOptions,
    details: &DetailsOptions,
) -> Result<DetailsReport, InspectError> {
    let table = normalize(spreadsheet::load_table(workbook, sheet, options)?);
    Ok(DetailsReport::build(&table, details)?)
}

/// Normalizes one sheet and exports it as CSV.
pub fn run_convert(workbook: &Path, options: &LoadOptions, convert: &ConvertOptions) -> Result<ExportSummary, InspectError> {
    let table = normalize(spreadsheet::load_table(workbook, &convert.sheet, options)?);
    export_csv(&table, &convert.output)
}
