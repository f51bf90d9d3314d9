//! Spreadsheet (Office Open XML) output format.
//!
//! Writes a minimal single-sheet workbook. Headers and timestamps are
//! inline strings, prices and volumes are numeric cells.

use std::io::{Cursor, Write};

use tickgetter_types::Tick;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::{FormatError, Formatter, TIMESTAMP_FORMAT, escape_markup};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Longest worksheet name spreadsheet applications accept.
const MAX_SHEET_NAME: usize = 31;

/// Column letters for the six tick columns.
const COLUMN_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Spreadsheet formatter.
#[derive(Debug, Clone)]
pub struct XlsxFormatter {
    /// Worksheet name.
    sheet_name: String,
}

impl Default for XlsxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxFormatter {
    /// Creates a new formatter writing to `Sheet1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
        }
    }

    /// Sets the worksheet name, usually the exported symbol.
    ///
    /// Characters a worksheet name may not hold are replaced with `_` and the
    /// name is cut to 31 characters. An empty name keeps `Sheet1`.
    #[must_use]
    pub fn with_sheet_name(mut self, name: impl AsRef<str>) -> Self {
        let name: String = name
            .as_ref()
            .chars()
            .map(|c| match c {
                '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
                c => c,
            })
            .take(MAX_SHEET_NAME)
            .collect();
        if !name.is_empty() {
            self.sheet_name = name;
        }
        self
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            escape_markup(&self.sheet_name)
        )
    }

    fn sheet_xml(ticks: &[Tick]) -> String {
        let mut sheet = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );

        sheet.push_str(r#"<row r="1">"#);
        for (letter, column) in COLUMN_LETTERS.iter().zip(Tick::COLUMNS) {
            sheet.push_str(&inline_cell(*letter, 1, column));
        }
        sheet.push_str("</row>");

        for (idx, tick) in ticks.iter().enumerate() {
            let r = idx + 2;
            sheet.push_str(&format!(r#"<row r="{r}">"#));
            sheet.push_str(&inline_cell(
                'A',
                r,
                &tick.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ));
            sheet.push_str(&number_cell('B', r, tick.bid));
            sheet.push_str(&number_cell('C', r, tick.ask));
            sheet.push_str(&number_cell('D', r, tick.last));
            sheet.push_str(&number_cell('E', r, tick.volume));
            sheet.push_str(&number_cell('F', r, f64::from(tick.flags)));
            sheet.push_str("</row>");
        }

        sheet.push_str("</sheetData></worksheet>");
        sheet
    }
}

fn inline_cell(column: char, row: usize, text: &str) -> String {
    format!(
        r#"<c r="{column}{row}" t="inlineStr"><is><t>{}</t></is></c>"#,
        escape_markup(text)
    )
}

fn number_cell(column: char, row: usize, value: f64) -> String {
    format!(r#"<c r="{column}{row}"><v>{value}</v></c>"#)
}

impl Formatter for XlsxFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        // The container needs a seekable sink, so the archive is built in memory.
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", self.workbook_xml()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml", Self::sheet_xml(ticks)),
        ];
        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        let bytes = zip.finish()?.into_inner();
        writer.write_all(&bytes)?;
        Ok(())
    }
}
