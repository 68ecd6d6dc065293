//! Reading and writing `.xlsx` workbooks of `Key / English / Translation` rows.

use crate::error::SheetError;
use crate::model::{ENGLISH_HEADER, FlatRecord, KEY_HEADER, TRANSLATION_HEADER};
use calamine::{Data, Range, Reader as _, Xlsx, open_workbook};
use std::path::Path;

const HEADERS: [&str; 3] = [KEY_HEADER, ENGLISH_HEADER, TRANSLATION_HEADER];

/// A named sheet of flat records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub records: Vec<FlatRecord>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, records: Vec<FlatRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

/// An ordered list of sheets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Read every sheet of an `.xlsx` file.
    ///
    /// The first row is the header; columns are matched by header name, so
    /// their order does not matter. Fully blank rows are skipped.
    pub fn read(path: &Path) -> Result<Self, SheetError> {
        let mut xlsx: Xlsx<_> = open_workbook(path)?;
        let mut workbook = Workbook::new();

        for name in xlsx.sheet_names() {
            let range = xlsx.worksheet_range(&name)?;
            let records = records_from_range(&range);
            tracing::debug!(sheet = %name, rows = records.len(), "read sheet");
            workbook.push(Sheet::new(name, records));
        }

        Ok(workbook)
    }

    /// Write all sheets to `path`. A sheet with no records still gets its header row.
    pub fn write(&self, path: &Path) -> Result<(), SheetError> {
        let mut book = rust_xlsxwriter::Workbook::new();

        for sheet in &self.sheets {
            let worksheet = book.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (col, header) in (0u16..).zip(HEADERS) {
                worksheet.write_string(0, col, header)?;
            }

            for (row, record) in (1u32..).zip(&sheet.records) {
                let cells = [
                    Some(record.key.as_str()),
                    record.english.as_deref(),
                    record.translation.as_deref(),
                ];
                for (col, cell) in (0u16..).zip(cells) {
                    if let Some(text) = cell.filter(|t| !t.is_empty()) {
                        worksheet.write_string(row, col, text)?;
                    }
                }
            }
        }

        book.save(path)?;
        tracing::debug!(path = %path.display(), sheets = self.sheets.len(), "wrote workbook");
        Ok(())
    }
}

struct Columns {
    key: Option<usize>,
    english: Option<usize>,
    translation: Option<usize>,
}

impl Columns {
    fn from_header(header: &[Data]) -> Self {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell).is_some_and(|text| text.trim() == name))
        };
        Self {
            key: find(KEY_HEADER),
            english: find(ENGLISH_HEADER),
            translation: find(TRANSLATION_HEADER),
        }
    }
}

fn records_from_range(range: &Range<Data>) -> Vec<FlatRecord> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let columns = Columns::from_header(header);

    let cell = |row: &[Data], col: Option<usize>| -> Option<String> {
        col.and_then(|c| row.get(c))
            .and_then(cell_text)
            .filter(|text| !text.is_empty())
    };

    rows.filter(|row| row.iter().any(|c| cell_text(c).is_some_and(|t| !t.is_empty())))
        .map(|row| FlatRecord {
            key: cell(row, columns.key).unwrap_or_default(),
            english: cell(row, columns.english),
            translation: cell(row, columns.translation),
        })
        .collect()
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_keeps_sheets_and_cells() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("agent.xlsx");

        let mut workbook = Workbook::new();
        workbook.push(Sheet::new(
            "en",
            vec![
                FlatRecord::base("agent:a.b", "hello"),
                FlatRecord::base("agent:d", "world"),
            ],
        ));
        workbook.push(Sheet::new(
            "zh",
            vec![
                FlatRecord::translated("agent:a.b", Some("hello".into()), "你好"),
                FlatRecord::translated("agent:x", None, "新"),
            ],
        ));
        workbook.write(&path).unwrap();

        let read = Workbook::read(&path).unwrap();

        assert_eq!(read, workbook);
        assert_eq!(read.sheet_names(), vec!["en", "zh"]);
    }

    #[test]
    fn test_read_rows_without_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("_merge.xlsx");

        let mut workbook = Workbook::new();
        workbook.push(Sheet::new(
            "zh",
            vec![
                FlatRecord::translated("", Some("orphan".into()), "孤儿"),
                FlatRecord::translated("f:a", None, "甲"),
            ],
        ));
        workbook.write(&path).unwrap();

        let mut read = Workbook::read(&path).unwrap();
        let sheet = read.sheets.remove(0);

        assert_eq!(sheet.records.len(), 2);
        assert!(!sheet.records[0].has_key());
        assert_eq!(sheet.records[0].translation.as_deref(), Some("孤儿"));
        assert!(sheet.records[1].has_key());
    }

    #[test]
    fn test_write_empty_sheet_has_header_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.xlsx");

        let mut workbook = Workbook::new();
        workbook.push(Sheet::new("en", Vec::new()));
        workbook.write(&path).unwrap();

        let read = Workbook::read(&path).unwrap();
        assert_eq!(read.sheets, vec![Sheet::new("en", Vec::new())]);
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(Workbook::read(&temp.path().join("nope.xlsx")).is_err());
    }
}
