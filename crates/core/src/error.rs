//! Error types for chartsheet.

use chartsheet_sheet::SheetError;
use chartsheet_viz::ChartError;
use thiserror::Error;

/// Result type for chartsheet operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in chartsheet.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Upload rejected or spreadsheet could not be decoded.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// Chart configuration does not fit the table.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// Another upload is still being processed.
    #[error("Another upload is already in progress")]
    UploadInProgress,

    /// Nothing has been uploaded in this session.
    #[error("No file has been uploaded yet")]
    NoCurrentFile,

    /// Session key contains characters a store cannot use.
    #[error("Invalid session key: {0}")]
    InvalidKey(String),

    /// Session store failure.
    #[error("Session store error: {0}")]
    Store(String),

    /// Background parse task failed to complete.
    #[error("Parse task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
