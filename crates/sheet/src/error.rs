use crate::upload::format_file_size;
use thiserror::Error;

/// Errors that can occur while accepting or decoding a spreadsheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Please upload a valid Excel file (.xlsx or .xls)")]
    InvalidFileType {
        name: String,
        media_type: Option<String>,
    },

    #[error("File size must be less than {}", size_limit(.limit))]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Failed to parse Excel file: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// True for failures raised before any bytes were decoded.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidFileType { .. } | Self::FileTooLarge { .. })
    }
}

/// Limit without the unit space, as in "10MB".
fn size_limit(limit: &u64) -> String {
    format_file_size(*limit).replace(' ', "")
}

pub type Result<T> = std::result::Result<T, SheetError>;
