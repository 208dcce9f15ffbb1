//! Workbook fixtures written on the fly into temporary directories.
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

const WORKBOOK_RELS_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#;

/// One worksheet: its name and the `<sheetData>` body.
pub struct XlsxSheet<'a> {
    pub name: &'a str,
    pub rows: &'a str,
}

/// Writes a minimal xlsx package. Style index `1` formats numbers as dates (`numFmtId` 14).
pub fn write_xlsx(dir: &Path, file_name: &str, sheets: &[XlsxSheet], shared_strings: &[&str]) -> PathBuf {
    let path = dir.join(file_name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><workbookPr/><sheets>"#,
    );
    let mut relationships = String::from(WORKBOOK_RELS_HEADER);
    for (index, sheet) in sheets.iter().enumerate() {
        let number = index + 1;
        workbook.push_str(&format!(r#"<sheet name="{}" sheetId="{number}" r:id="rId{number}"/>"#, sheet.name));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{number}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{number}.xml"/>"#
        ));
        zip.start_file(format!("xl/worksheets/sheet{number}.xml"), options).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            sheet.rows
        ).unwrap();
    }
    workbook.push_str("</sheets></workbook>");
    relationships.push_str("</Relationships>");

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(workbook.as_bytes()).unwrap();
    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(relationships.as_bytes()).unwrap();

    zip.start_file("xl/styles.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="14" applyNumberFormat="1"/></cellXfs></styleSheet>"#).unwrap();

    if !shared_strings.is_empty() {
        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        let items: String = shared_strings.iter().map(|text| format!("<si><t>{text}</t></si>")).collect();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{items}</sst>"#,
            shared_strings.len()
        ).unwrap();
    }

    zip.finish().unwrap();
    path
}

/// Writes a minimal ods package; `tables` is the body of `<office:spreadsheet>`.
pub fn write_ods(dir: &Path, file_name: &str, tables: &str) -> PathBuf {
    let path = dir.join(file_name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/vnd.oasis.opendocument.spreadsheet").unwrap();

    zip.start_file("content.xml", SimpleFileOptions::default()).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:spreadsheet>{tables}</office:spreadsheet></office:body></office:document-content>"#
    ).unwrap();
    zip.finish().unwrap();
    path
}

/// A market price sheet: dates styled as dates, shared-string types, integer prices, fractional volumes.
pub fn write_prices(dir: &Path) -> PathBuf {
    let rows = r#"
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="inlineStr"><is><t>MCP (Rs./kWh)</t></is></c><c r="D1" t="inlineStr"><is><t> Volume </t></is></c></row>
<row r="2"><c r="A2" s="1"><v>45292</v></c><c r="B2" t="s"><v>2</v></c><c r="C2"><v>1</v></c><c r="D2"><v>10.5</v></c></row>
<row r="3"><c r="A3" s="1"><v>45293</v></c><c r="B3" t="s"><v>2</v></c><c r="C3"><v>2</v></c><c r="D3"><v>11.25</v></c></row>
<row r="4"><c r="A4" s="1"><v>45294</v></c><c r="B4" t="s"><v>3</v></c><c r="C4"><v>3</v></c><c r="D4"><v>9.75</v></c></row>
<row r="5"><c r="A5" s="1"><v>45295</v></c><c r="B5" t="s"><v>2</v></c><c r="C5"><v>4</v></c><c r="D5"><v>12.5</v></c></row>
<row r="6"><c r="A6" s="1"><v>45296</v></c><c r="B6" t="s"><v>4</v></c><c r="C6"><v>5</v></c><c r="D6"><v>8.25</v></c></row>
"#;
    let summary = r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Note</t></is></c></row><row r="2"><c r="A2" t="inlineStr"><is><t>ok</t></is></c></row>"#;
    write_xlsx(
        dir,
        "prices.xlsx",
        &[XlsxSheet { name: "MCP Details", rows }, XlsxSheet { name: "Summary", rows: summary }],
        &["Date", "TYPE", "A", "B", "C"],
    )
}
