//! Spreadsheet intake for chartsheet
//!
//! Turns an uploaded spreadsheet into a normalized [`Table`]: a header row,
//! data rows of typed cells, and the name of the sheet they came from.
//!
//! # Examples
//!
//! ## Validating an upload
//!
//! ```
//! use chartsheet_sheet::{validate_upload, FileInfo, UploadLimits};
//!
//! let file = FileInfo::new("sales.xlsx", None, 2048);
//! assert!(validate_upload(&file, &UploadLimits::default()).is_ok());
//!
//! let file = FileInfo::new("notes.txt", Some("text/plain".into()), 10);
//! assert!(validate_upload(&file, &UploadLimits::default()).is_err());
//! ```
//!
//! ## Building a table
//!
//! ```
//! use chartsheet_sheet::{CellValue, Table};
//!
//! let table = Table::from_grid("Sheet1", vec![
//!     vec!["Month".into(), "".into()],
//!     vec!["Jan".into(), 100.into()],
//!     vec![CellValue::Null, CellValue::Null],
//! ]).unwrap();
//!
//! assert_eq!(table.headers, vec!["Month", "Column"]);
//! assert_eq!(table.row_count(), 1);
//! ```
//!
//! ## Loading from a file
//!
//! ```no_run
//! use chartsheet_sheet::Table;
//!
//! let table = Table::from_path("data.xlsx").unwrap();
//! ```

mod cell;
mod error;
mod preview;
mod table;
mod upload;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export pagination helpers.
pub use preview::{display_cell, page, page_count, Preview, PreviewOptions, NULL_PLACEHOLDER};
/// Re-export table type.
pub use table::{is_blank_row, Table, BLANK_HEADER};
/// Re-export upload validation.
pub use upload::{
    format_file_size, validate_upload, FileInfo, UploadLimits, ValidationReport,
    ACCEPTED_EXTENSIONS, ACCEPTED_MEDIA_TYPES, DEFAULT_MAX_BYTES,
};
