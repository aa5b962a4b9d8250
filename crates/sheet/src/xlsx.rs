use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::table::Table;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Excel serial date (days since 1899-12-30), kept numeric
            CellValue::Float(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

impl Table {
    /// Decode a spreadsheet held entirely in memory and normalize its first sheet.
    ///
    /// The container format is detected from the bytes, so legacy `.xls`,
    /// `.xlsx`, `.xlsb` and `.ods` all work. Only the first declared sheet is read.
    ///
    /// # Errors
    ///
    /// Every failure (corrupt bytes, unsupported container, no sheets, empty
    /// sheet) is reported as `SheetError::Parse`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| SheetError::Parse(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SheetError::Parse("Workbook contains no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| SheetError::Parse(e.to_string()))?;

        let grid: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        tracing::debug!(
            sheet = %sheet_name,
            rows = grid.len(),
            cols = range.width(),
            "decoded first sheet"
        );

        Self::from_grid(sheet_name, grid)
    }

    /// Read a spreadsheet file fully into memory and decode it.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Io` if the file cannot be read, otherwise the same
    /// errors as [`Table::from_bytes`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes(build: impl FnOnce(&mut Workbook)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(&mut workbook);
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_first_sheet() {
        let bytes = workbook_bytes(|wb| {
            let first = wb.add_worksheet();
            first.set_name("Sales").unwrap();
            first.write_string(0, 0, "Month").unwrap();
            first.write_string(0, 1, "Sales").unwrap();
            first.write_string(1, 0, "Jan").unwrap();
            first.write_number(1, 1, 100).unwrap();
            first.write_string(2, 0, "Feb").unwrap();
            first.write_string(3, 0, "Mar").unwrap();
            first.write_string(3, 1, "250").unwrap();

            let second = wb.add_worksheet();
            second.set_name("Other").unwrap();
            second.write_string(0, 0, "Ignored").unwrap();
        });

        let table = Table::from_bytes(&bytes).unwrap();

        assert_eq!(table.sheet_name, "Sales");
        assert_eq!(table.headers, vec!["Month", "Sales"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.get(0, 0), Some(&CellValue::from("Jan")));
        assert_eq!(table.get(0, 1), Some(&CellValue::Float(100.0)));
        assert_eq!(table.get(1, 1), Some(&CellValue::Null));
        // Numeric-looking text keeps its string type
        assert_eq!(table.get(2, 1), Some(&CellValue::from("250")));
    }

    #[test]
    fn test_blank_header_cells() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(0, 0, "A").unwrap();
            ws.write_string(1, 0, "x").unwrap();
            ws.write_number(1, 2, 3).unwrap();
        });

        let table = Table::from_bytes(&bytes).unwrap();
        assert_eq!(table.headers, vec!["A", "Column", "Column"]);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(0, 0, "Name").unwrap();
            ws.write_string(1, 0, "first").unwrap();
            // rows 2 and 3 left empty
            ws.write_string(4, 0, "last").unwrap();
        });

        let table = Table::from_bytes(&bytes).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, 0), Some(&CellValue::from("last")));
    }

    #[test]
    fn test_booleans_keep_type() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(0, 0, "Flag").unwrap();
            ws.write_boolean(1, 0, true).unwrap();
        });

        let table = Table::from_bytes(&bytes).unwrap();
        assert_eq!(table.get(0, 0), Some(&CellValue::Bool(true)));
    }

    #[test]
    fn test_empty_sheet() {
        let bytes = workbook_bytes(|wb| {
            wb.add_worksheet();
        });

        let err = Table::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, SheetError::Parse(ref msg) if msg == "Empty spreadsheet"));
    }

    #[test]
    fn test_corrupt_bytes() {
        let err = Table::from_bytes(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, SheetError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse Excel file: "));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xlsx");
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(0, 0, "Only").unwrap();
            ws.write_number(1, 0, 1.5).unwrap();
        });
        std::fs::write(&path, bytes).unwrap();

        let table = Table::from_path(&path).unwrap();
        assert_eq!(table.headers, vec!["Only"]);
        assert_eq!(table.get(0, 0), Some(&CellValue::Float(1.5)));

        let missing = Table::from_path(dir.path().join("missing.xlsx")).unwrap_err();
        assert!(matches!(missing, SheetError::Io(_)));
    }
}
