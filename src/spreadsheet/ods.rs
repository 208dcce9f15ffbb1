use crate::error::InspectError;
use crate::helpers::reader::open_workbook_file;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;

/// ODS file MIME type identifier
const MIME_TYPE: &[u8] = b"application/vnd.oasis.opendocument.spreadsheet";
const CONTENT: &str = "content.xml";
const SPREADSHEET: QName = QName(b"office:spreadsheet");
const TABLE: QName = QName(b"table:table");
const TABLE_ROW: QName = QName(b"table:table-row");
const TABLE_CELL: QName = QName(b"table:table-cell");
/// Covered cells sit under a merged range
const TABLE_COVERED_CELL: QName = QName(b"table:covered-table-cell");
/// Comments attached to a cell
const ANNOTATION: QName = QName(b"office:annotation");
const PARAGRAPH: QName = QName(b"text:p");
/// Run of `text:c` spaces
const SPACES: QName = QName(b"text:s");

#[derive(Error, Debug)]
pub enum OdsError {
    #[error("Invalid ODS MIME type")]
    MimeTypeError,

    #[error("Table without a name in content.xml")]
    TableNameError,
}

/// An OpenDocument spreadsheet (`.ods`).
pub(crate) struct OdsSpreadsheet {
    name: String,
    zip: ZipArchive<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl OdsSpreadsheet {
    /// Opens the container, validates its MIME type and indexes the sheet names.
    pub(crate) fn open(path: &Path) -> Result<Self, InspectError> {
        let name = path.display().to_string();
        let mut zip = ZipArchive::new(open_workbook_file(path)?)?;
        check_mime(&mut zip)?;
        if is_password_protected(&mut zip)? {
            Err(SpreadsheetError::SpreadsheetPasswordProtectedError(name.to_owned()))?;
        }
        let sheet_names = load_sheet_names(&mut zip)?;
        if sheet_names.is_empty() {
            Err(SpreadsheetError::SpreadsheetEmptyError(name.to_owned()))?;
        }
        Ok(OdsSpreadsheet {
            name,
            zip,
            sheet_names,
        })
    }
}

impl Spreadsheet for OdsSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheet_names.to_owned()
    }

    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, InspectError> {
        let mut sheets = Vec::<Sheet>::new();
        let mut reader = self.zip
            .xml_reader(CONTENT)?
            .ok_or_else(|| SpreadsheetError::FileError(CONTENT.to_string()))?;
        loop {
            let mut selected = None::<String>;
            match_xml_events!(reader => {
                Event::End(event) if event.name() == SPREADSHEET => break,
                Event::Start(event) if event.name() == TABLE => {
                    let table_name = event.get_attribute_value("table:name")?.ok_or(OdsError::TableNameError)?;
                    if criteria.accept(&table_name) {
                        selected = Some(table_name.to_string());
                        break;
                    }
                }
            });
            let Some(sheet_name) = selected else {
                break;
            };
            let mut sheet = Sheet::new(&self.name, &sheet_name);

            let mut row = 0usize;
            let mut col = 0usize;
            let mut row_count = 0usize;
            let mut col_count = 0usize;
            let mut kind = CellType::default();
            let mut value = String::new();
            let mut element_context = false; // reading a string cell's paragraphs
            let mut comment_context = false; // inside an annotation
            match_xml_events!(reader => {
                Event::End(event) if event.name() == TABLE => break,
                Event::Start(event) if event.name() == TABLE_ROW => {
                    row_count = event.parse_attribute_value("table:number-rows-repeated")?.unwrap_or(1);
                    col = 0;
                }
                Event::End(event) if event.name() == TABLE_ROW => {
                    row += row_count;
                }
                Event::Start(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
                    value.clear();
                    col_count = event.parse_attribute_value::<usize>("table:number-columns-repeated")?.unwrap_or(1);
                    let value_type = event.get_attribute_value("office:value-type")?;
                    kind = match value_type.as_deref() {
                        Some("boolean") => CellType::Boolean,
                        Some("date") => CellType::IsoDateTime,
                        Some("time") => CellType::IsoDuration,
                        Some("string") => {
                            let is_error = event.get_attribute_value("calcext:value-type")?
                                .map(|cow| cow == "error")
                                .unwrap_or(false);
                            if is_error { CellType::Error } else { CellType::InlineString }
                        }
                        Some(_) => CellType::Number,
                        None => CellType::Empty,
                    };

                    match value_type.as_deref() {
                        Some("string") => element_context = true,
                        Some("boolean") => {
                            let truth = event.get_attribute_value("office:boolean-value")?
                                .map(|cow| cow != "false" && cow != "0")
                                .unwrap_or(false);
                            value.push_str(if truth { "1" } else { "0" });
                        }
                        Some("date") => if let Some(data) = event.get_attribute_value("office:date-value")? {
                            value.push_str(&data);
                        }
                        Some("time") => if let Some(data) = event.get_attribute_value("office:time-value")? {
                            value.push_str(&data);
                        }
                        Some(_) => if let Some(data) = event.get_attribute_value("office:value")? {
                            value.push_str(&data);
                        }
                        None => (),
                    }
                }
                Event::End(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
                    if kind == CellType::Error {
                        if !criteria.error_as_null {
                            Err(SpreadsheetError::CellValueError(
                                sheet.file_name.to_owned(),
                                sheet.name.to_owned(),
                                index_to_reference(row, col),
                                value.to_owned(),
                            ))?
                        }
                        sheet.update_bound(row + row_count.saturating_sub(1), col + col_count.saturating_sub(1));
                        sheet.update_bound(row, col);
                        kind = CellType::Empty;
                    }
                    if kind != CellType::Empty && !value.is_empty() {
                        for row_offset in 0..row_count {
                            for col_offset in 0..col_count {
                                sheet.push(Cell {
                                    row: row + row_offset,
                                    col: col + col_offset,
                                    kind,
                                    value: value.to_owned(),
                                });
                            }
                        }
                    }
                    col += col_count;
                    kind = CellType::Empty;
                    element_context = false;
                    comment_context = false;
                }
                Event::Start(event) if element_context && event.name() == ANNOTATION => comment_context = true,
                Event::End(event) if element_context && comment_context && event.name() == ANNOTATION => comment_context = false,
                Event::Start(event) if element_context && !comment_context && event.name() == PARAGRAPH => {
                    if !value.is_empty() {
                        value.push('\n');
                    }
                }
                Event::Start(event) if element_context && !comment_context && event.name() == SPACES => {
                    let count = event.parse_attribute_value("text:c")?.unwrap_or(1);
                    for _ in 0..count {
                        value.push(' ');
                    }
                }
                Event::Text(event) if element_context && !comment_context => value.push_bytes_text(&event)?,
                Event::GeneralRef(event) if element_context && !comment_context => value.push_bytes_ref(&event)?,
            });
            sheet.finish();
            sheets.push(sheet);
        }

        Ok(sheets)
    }
}

/// Validates the container's `mimetype` entry, when present.
fn check_mime(zip: &mut ZipArchive<BufReader<File>>) -> Result<(), InspectError> {
    if let Some(file) = &mut zip.file("mimetype")? {
        let mut buffer = Vec::with_capacity(MIME_TYPE.len());
        file.read_to_end(&mut buffer)?;
        if buffer.trim_ascii() != MIME_TYPE {
            Err(OdsError::MimeTypeError)?;
        }
    }
    Ok(())
}

/// Encrypted packages list `manifest:encryption-data` under a file entry.
fn is_password_protected(zip: &mut ZipArchive<BufReader<File>>) -> Result<bool, InspectError> {
    let mut reader = match zip.xml_reader("META-INF/manifest.xml")? {
        Some(reader) => reader,
        None => return Ok(false),
    };
    let mut in_file_entry = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == QName(b"manifest:file-entry") => in_file_entry = true,
        Event::End(event) if event.name() == QName(b"manifest:file-entry") => in_file_entry = false,
        Event::Start(event) if in_file_entry && event.name() == QName(b"manifest:encryption-data") => {
            return Ok(true);
        }
    });
    Ok(false)
}

fn load_sheet_names(zip: &mut ZipArchive<BufReader<File>>) -> Result<Vec<String>, InspectError> {
    let mut reader = zip
        .xml_reader(CONTENT)?
        .ok_or_else(|| SpreadsheetError::FileError(CONTENT.to_string()))?;
    let mut names = Vec::new();
    let mut depth = 0usize;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TABLE => {
            // Tables nested in cells (subtables) are not sheets.
            if depth == 0 {
                let name = event.get_attribute_value("table:name")?.ok_or(OdsError::TableNameError)?;
                names.push(name.to_string());
            }
            depth += 1;
        }
        Event::End(event) if event.name() == TABLE => depth = depth.saturating_sub(1),
        Event::End(event) if event.name() == SPREADSHEET => break,
    });
    Ok(names)
}
