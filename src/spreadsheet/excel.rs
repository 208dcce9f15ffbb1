//! Office Open XML package helpers shared by the xlsx reader.
use crate::error::InspectError;
use crate::helpers::reader::open_workbook_file;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use zip::ZipArchive;

pub(crate) type PackageReader = BufReader<File>;

/// XML tag name for relationship elements in Excel files
const TAG_RELATIONSHIP: &[u8] = b"Relationship";

/// Leading bytes of an OLE compound file (password-protected packages and legacy `.xls`).
const CFB_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Opens an Excel package and loads the parts every sheet read depends on.
///
/// Returns the archive, the cell type of every style index, and the (name, zip path)
/// of every worksheet in workbook order.
pub(super) fn open<W, F>(path: &Path, load_workbook: W, load_number_formats: F) -> Result<(
    ZipArchive<PackageReader>,
    Vec<CellType>,
    Vec<(String, String)>
), InspectError>
where
    W: Fn(&mut ZipArchive<PackageReader>) -> Result<(Vec<(String, String)>, bool), InspectError>,
    F: Fn(&mut ZipArchive<PackageReader>, bool) -> Result<Vec<CellType>, InspectError>,
{
    let file_name = path.display().to_string();
    let mut reader = open_workbook_file(path)?;
    if is_compound_file(&mut reader)? {
        Err(SpreadsheetError::SpreadsheetPasswordProtectedError(file_name.to_owned()))?;
    }

    let mut zip = ZipArchive::new(reader)?;
    let (sheets, is_1904) = load_workbook(&mut zip)?;
    if sheets.is_empty() {
        Err(SpreadsheetError::SpreadsheetEmptyError(file_name))?
    }

    let number_formats = load_number_formats(&mut zip, is_1904)?;
    Ok((zip, number_formats, sheets))
}

/// Maps relationship ids to worksheet part paths.
pub(super) fn load_relationships(zip: &mut ZipArchive<PackageReader>, path: &str) -> Result<HashMap<String, String>, InspectError> {
    let mut reader = zip.xml_reader(path)?
        .ok_or_else(|| SpreadsheetError::FileError(path.to_string()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only worksheets; chartsheets and dialog sheets carry no cell grid.
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Resolves each style index to a cell type, preferring custom formats over built-in ids.
pub(super) fn load_number_formats(format_indexes: Vec<String>, custom_formats: HashMap<String, CellType>, is_1904: bool) -> Vec<CellType> {
    format_indexes
        .iter()
        .map(|id| {
            custom_formats
                .get(id)
                .copied()
                .or_else(|| CellType::parse_builtin_number_format_id(id, is_1904))
                .unwrap_or(CellType::Number)
        })
        .collect()
}

/// Normalizes a relationship target to a path inside the package.
pub(crate) fn to_zip_path(path: Cow<'_, str>) -> String {
    if let Some(stripped) = path.strip_prefix('/') {
        stripped.to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}

fn is_compound_file(reader: &mut PackageReader) -> Result<bool, InspectError> {
    let mut signature = [0u8; 8];
    let matched = match reader.read_exact(&mut signature) {
        Ok(()) => signature == CFB_SIGNATURE,
        Err(error) if error.kind() == std::io::ErrorKind::UnexpectedEof => false,
        Err(error) => Err(error)?,
    };
    reader.seek(SeekFrom::Start(0))?;
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_targets_resolve_inside_xl() {
        assert_eq!(to_zip_path(Cow::Borrowed("worksheets/sheet1.xml")), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path(Cow::Borrowed("/xl/worksheets/sheet2.xml")), "xl/worksheets/sheet2.xml");
        assert_eq!(to_zip_path(Cow::Borrowed("xl/worksheets/sheet3.xml")), "xl/worksheets/sheet3.xml");
    }

    #[test]
    fn custom_formats_override_builtin_ids() {
        let custom = HashMap::from([("164".to_string(), CellType::NumberDate1900)]);
        let formats = load_number_formats(
            vec!["0".to_string(), "164".to_string(), "22".to_string()],
            custom,
            false,
        );
        assert_eq!(formats, vec![CellType::Number, CellType::NumberDate1900, CellType::NumberDateTime1900]);
    }
}
