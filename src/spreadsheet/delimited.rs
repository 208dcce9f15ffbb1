//! Comma separated text, read so exported tables can be loaded back.
//!
//! CSV carries no cell types, so each field is classified from its text.

use crate::error::InspectError;
use crate::helpers::reader::open_workbook_file;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::table::column::ColumnType;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use regex::Regex;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("Hardcode regex pattern")
});
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Hardcode regex pattern")
});
static DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})[ T](\d{2}:\d{2}:\d{2}(\.\d+)?)$").expect("Hardcode regex pattern")
});
static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?$").expect("Hardcode regex pattern")
});

/// A CSV file seen as a workbook with one sheet named after the file stem.
pub(crate) struct DelimitedSpreadsheet {
    name: String,
    path: PathBuf,
    sheet_name: String,
}

impl DelimitedSpreadsheet {
    pub(crate) fn open(path: &Path) -> Result<Self, InspectError> {
        // Fail early on unreadable files; the handle is reopened per read.
        drop(open_workbook_file(path)?);
        let sheet_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(DelimitedSpreadsheet {
            name: path.display().to_string(),
            path: path.to_path_buf(),
            sheet_name,
        })
    }
}

impl Spreadsheet for DelimitedSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        vec![self.sheet_name.to_owned()]
    }

    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, InspectError> {
        if !criteria.accept(&self.sheet_name) {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(open_workbook_file(&self.path)?);
        let mut sheet = Sheet::new(&self.name, &self.sheet_name);
        let mut columns = Vec::<Vec<(Cell, String)>>::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            if !record.is_empty() {
                sheet.update_bound(row, record.len() - 1);
            }
            for (col, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                // Labels and null literals keep their text.
                if row == 0 || criteria.nulls.contains(field) {
                    sheet.push(Cell { row, col, kind: CellType::InlineString, value: field.to_owned() });
                    continue;
                }
                if let Some((kind, value)) = classify(field) {
                    if columns.len() <= col {
                        columns.resize_with(col + 1, Vec::new);
                    }
                    columns[col].push((Cell { row, col, kind, value }, field.to_owned()));
                }
            }
        }
        for cells in columns {
            for cell in settle_column(cells) {
                sheet.push(cell);
            }
        }
        sheet.finish();
        Ok(vec![sheet])
    }
}

/// Keeps the classified kinds of a column unless they conflict, in which case every field
/// reads back as its original text. A text column holding `DAM` and `007` stays text.
fn settle_column(cells: Vec<(Cell, String)>) -> impl Iterator<Item = Cell> {
    let conflicting = ColumnType::detect(cells.iter().filter_map(|(cell, _)| ColumnType::from(cell))) == ColumnType::Mixed;
    cells.into_iter().map(move |(cell, field)| {
        if conflicting {
            Cell { kind: CellType::InlineString, value: field, ..cell }
        } else {
            cell
        }
    })
}

/// Picks the storage kind a field's text denotes. Empty fields are missing.
fn classify(field: &str) -> Option<(CellType, String)> {
    if field.is_empty() {
        return None;
    }

    let classified = if field.eq_ignore_ascii_case("true") {
        (CellType::Boolean, "1".to_string())
    } else if field.eq_ignore_ascii_case("false") {
        (CellType::Boolean, "0".to_string())
    } else if NUMBER.is_match(field) {
        (CellType::Number, field.to_string())
    } else if DATE.is_match(field) && NaiveDate::parse_from_str(field, "%Y-%m-%d").is_ok() {
        (CellType::IsoDateTime, field.to_string())
    } else if let Some(captures) = DATETIME.captures(field) {
        let normalized = format!("{}T{}", &captures[1], &captures[2]);
        match NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(_) => (CellType::IsoDateTime, normalized),
            Err(_) => (CellType::InlineString, field.to_string()),
        }
    } else if TIME.is_match(field) && NaiveTime::parse_from_str(field, "%H:%M:%S%.f").is_ok() {
        (CellType::IsoTime, field.to_string())
    } else {
        (CellType::InlineString, field.to_string())
    };
    Some(classified)
}
