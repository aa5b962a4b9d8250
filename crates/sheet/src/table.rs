use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};

/// Label used for header cells that are empty.
pub const BLANK_HEADER: &str = "Column";

/// A normalized sheet: one header row plus data rows.
///
/// Rows keep their native cell types and may be shorter or longer than
/// `headers`. Entirely blank rows are dropped when the table is built and never
/// reappear. Header names are not deduplicated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub sheet_name: String,
}

impl Table {
    /// Build a table from a raw grid whose first row is the header row.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Parse("Empty spreadsheet")` if the grid has no rows.
    pub fn from_grid(sheet_name: impl Into<String>, grid: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut grid = grid.into_iter();
        let header_row = grid
            .next()
            .ok_or_else(|| SheetError::Parse("Empty spreadsheet".to_string()))?;

        let headers = header_row.iter().map(header_label).collect();
        let rows = grid.filter(|row| !is_blank_row(row)).collect();

        Ok(Self {
            headers,
            rows,
            sheet_name: sheet_name.into(),
        })
    }

    /// Number of data rows (header excluded)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.headers.len()
    }

    /// Position of the first header equal to `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Check whether a header named `name` exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row`/`col`, or `None` for short rows and out-of-range indices.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// True when every cell in `row` is null or the empty string.
#[must_use]
pub fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

fn header_label(cell: &CellValue) -> String {
    if cell.is_blank() {
        BLANK_HEADER.to_string()
    } else {
        cell.to_string()
    }
}
