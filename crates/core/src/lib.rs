//! # chartsheet-core
//!
//! Upload pipeline tying the sheet and chart crates together.
//!
//! This crate provides:
//! - [`Uploader`], which validates and parses one upload at a time
//! - [`UploadedFile`], the record kept for the current session
//! - [`SessionStore`] with in-memory and on-disk implementations
//! - [`CoreError`], wrapping the sheet and chart errors

/// Error types and result aliases.
pub mod error;
/// Session persistence.
pub mod session;
/// Upload validation and parsing.
pub mod upload;

pub use error::{CoreError, CoreResult};
pub use session::{FileStore, MemoryStore, SessionStore, CURRENT_FILE_KEY};
pub use upload::{
    parse_upload, IncomingFile, UploadProgress, UploadStatus, UploadedFile, Uploader,
};

pub use chartsheet_sheet as sheet;
pub use chartsheet_viz as viz;

use chartsheet_viz::{build_chart, ChartConfig, ChartSpec};

/// Build a chart from the session's current upload.
pub fn chart_current_file(store: &dyn SessionStore, config: &ChartConfig) -> CoreResult<ChartSpec> {
    let file = store.load_current_file()?.ok_or(CoreError::NoCurrentFile)?;
    Ok(build_chart(&file.data, config)?)
}

/// Default chart configuration for the session's current upload.
pub fn default_config(store: &dyn SessionStore) -> CoreResult<ChartConfig> {
    let file = store.load_current_file()?.ok_or(CoreError::NoCurrentFile)?;
    Ok(ChartConfig::defaults_for(&file.data))
}
