use crate::error::InspectError;
use crate::spreadsheet::SpreadsheetError;
use std::fs::File;
use std::io::BufReader;
use std::io::ErrorKind;
use std::path::Path;

/// Opens a local workbook for buffered reading.
///
/// A path that does not resolve is reported as [`SpreadsheetError::NotFound`] so callers
/// can tell a missing input apart from an unreadable one.
pub(crate) fn open_workbook_file(path: &Path) -> Result<BufReader<File>, InspectError> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            Err(SpreadsheetError::NotFound(path.display().to_string()))?
        }
        Err(error) => Err(error)?,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_local_file() {
        let result = open_workbook_file(Path::new("Cargo.toml"));
        assert!(result.is_ok(), "Failed to open local file: {:?}", result.err());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let error = open_workbook_file(Path::new("non_existent_file.xlsx")).unwrap_err();
        assert!(matches!(
            error,
            InspectError::SpreadsheetError(SpreadsheetError::NotFound(ref path)) if path == "non_existent_file.xlsx"
        ));
    }
}
