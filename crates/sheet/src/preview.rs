//! Paged previews of a table for display layers.

use crate::cell::CellValue;
use crate::table::Table;
use serde::Serialize;

/// Placeholder shown for null cells in previews.
pub const NULL_PLACEHOLDER: &str = "—";

/// Options for previewing a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Rows per page (default: 10)
    pub page_size: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl PreviewOptions {
    /// Set the number of rows per page
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Slice out page `page_index` (0-based) of `rows`.
///
/// Bounds are clamped to the slice, so out-of-range pages are empty and the
/// last page may be short. A page size of zero yields an empty page.
#[must_use]
pub fn page<T>(rows: &[T], page_index: usize, page_size: usize) -> &[T] {
    let start = page_index.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed to show `total` rows.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Display text for a cell in a preview.
#[must_use]
pub fn display_cell(cell: &CellValue) -> String {
    if cell.is_null() {
        NULL_PLACEHOLDER.to_string()
    } else {
        cell.to_string()
    }
}

/// One page of a table plus the summary numbers shown around it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview<'a> {
    pub sheet_name: &'a str,
    pub headers: &'a [String],
    pub rows: &'a [Vec<CellValue>],
    pub total_rows: usize,
    pub column_count: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// 1-based index of the first row on this page (0 when the page is empty).
    pub first_row: usize,
    /// 1-based index of the last row on this page (0 when the page is empty).
    pub last_row: usize,
    /// "first-last" row range for display, e.g. `11-20`.
    pub showing: String,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Preview<'_> {
    /// Rows of this page rendered with [`display_cell`].
    #[must_use]
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(display_cell).collect())
            .collect()
    }
}

impl Table {
    /// Preview page `page_index` (0-based).
    #[must_use]
    pub fn preview(&self, page_index: usize, options: &PreviewOptions) -> Preview<'_> {
        let rows = page(&self.rows, page_index, options.page_size);
        let start = page_index
            .saturating_mul(options.page_size)
            .min(self.rows.len());
        let (first_row, last_row) = if rows.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + rows.len())
        };

        let total_pages = page_count(self.rows.len(), options.page_size);
        Preview {
            sheet_name: &self.sheet_name,
            headers: &self.headers,
            rows,
            total_rows: self.rows.len(),
            column_count: self.headers.len(),
            page_index,
            page_size: options.page_size,
            total_pages,
            first_row,
            last_row,
            showing: format!("{first_row}-{last_row}"),
            has_previous: page_index > 0,
            has_next: page_index.saturating_add(1) < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Table {
        let mut grid = vec![vec![CellValue::from("n")]];
        grid.extend((0..n).map(|i| vec![CellValue::Int(i as i64)]));
        Table::from_grid("Numbers", grid).unwrap()
    }

    #[test]
    fn test_page_slicing() {
        let rows: Vec<u32> = (0..25).collect();
        assert_eq!(page(&rows, 0, 10), &rows[0..10]);
        assert_eq!(page(&rows, 2, 10), &rows[20..25]);
        assert!(page(&rows, 3, 10).is_empty());
        assert!(page(&rows, usize::MAX, 10).is_empty());
        assert!(page(&rows, 0, 0).is_empty());
    }

    #[test]
    fn test_pages_cover_rows_exactly_once() {
        let rows: Vec<u32> = (0..23).collect();
        for size in 1..=30 {
            let joined: Vec<u32> = (0..page_count(rows.len(), size))
                .flat_map(|i| page(&rows, i, size).iter().copied())
                .collect();
            assert_eq!(joined, rows, "page size {size}");
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_preview_summary() {
        let table = numbered(25);
        let options = PreviewOptions::default();

        let first = table.preview(0, &options);
        assert_eq!(first.sheet_name, "Numbers");
        assert_eq!(first.total_rows, 25);
        assert_eq!(first.column_count, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.showing, "1-10");
        assert!(!first.has_previous);
        assert!(first.has_next);

        let last = table.preview(2, &options);
        assert_eq!(last.rows.len(), 5);
        assert_eq!(last.showing, "21-25");
        assert!(last.has_previous);
        assert!(!last.has_next);
    }

    #[test]
    fn test_preview_of_empty_table() {
        let table = numbered(0);
        let preview = table.preview(0, &PreviewOptions::default().with_page_size(5));
        assert_eq!(preview.total_pages, 0);
        assert_eq!(preview.showing, "0-0");
        assert!(!preview.has_next);
    }

    #[test]
    fn test_display_rows_use_placeholder() {
        let table = Table::from_grid(
            "S",
            vec![
                vec!["a".into(), "b".into()],
                vec![CellValue::Null, 2.5.into()],
            ],
        )
        .unwrap();
        let preview = table.preview(0, &PreviewOptions::default());
        assert_eq!(
            preview.display_rows(),
            vec![vec!["—".to_string(), "2.5".to_string()]]
        );
    }

    #[test]
    fn test_preview_serializes() {
        let table = numbered(3);
        let json = serde_json::to_value(table.preview(0, &PreviewOptions::default())).unwrap();
        assert_eq!(json["totalRows"], 3);
        assert_eq!(json["rows"][2][0], 2);
        assert_eq!(json["sheetName"], "Numbers");
        assert_eq!(json["showing"], "1-3");
        assert_eq!(json["hasPrevious"], false);
        assert_eq!(json["hasNext"], false);
    }
}
