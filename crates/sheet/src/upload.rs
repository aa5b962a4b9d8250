//! Pre-parse checks for candidate spreadsheet files.
//!
//! Validation looks only at metadata (name, declared media type, size) and
//! never opens the file.

use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};

/// Media types accepted without looking at the file name.
pub const ACCEPTED_MEDIA_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "application/x-excel",
    "application/x-msexcel",
];

/// File extensions accepted when the declared media type is missing or unknown.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Default upload ceiling: 10 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata describing a file offered for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    /// Declared media type, as reported by the browser or OS. Often missing
    /// or wrong, which is why the extension is checked too.
    pub media_type: Option<String>,
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, media_type: Option<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type,
            size,
        }
    }

    /// Lowercased extension of the file name, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Limits applied by [`validate_upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Largest accepted file, in bytes (inclusive).
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl UploadLimits {
    /// Set the size ceiling in bytes
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

/// Serializable outcome of a validation, shaped for display layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Result<()>> for ValidationReport {
    fn from(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self {
                is_valid: true,
                error: None,
            },
            Err(e) => Self {
                is_valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Check a candidate file's type and size before parsing.
///
/// The type check passes if the declared media type is in
/// [`ACCEPTED_MEDIA_TYPES`] or, failing that, if the file name ends in one of
/// [`ACCEPTED_EXTENSIONS`] (case-insensitive). The type check runs first.
pub fn validate_upload(file: &FileInfo, limits: &UploadLimits) -> Result<()> {
    let type_ok = file
        .media_type
        .as_deref()
        .is_some_and(|mt| ACCEPTED_MEDIA_TYPES.contains(&mt));
    let extension_ok = file
        .extension()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));

    if !type_ok && !extension_ok {
        return Err(SheetError::InvalidFileType {
            name: file.name.clone(),
            media_type: file.media_type.clone(),
        });
    }

    if file.size > limits.max_bytes {
        return Err(SheetError::FileTooLarge {
            size: file.size,
            limit: limits.max_bytes,
        });
    }

    Ok(())
}

/// Format a byte count for humans: `0 Bytes`, `1.5 KB`, `10 MB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    fn info(name: &str, media_type: Option<&str>, size: u64) -> FileInfo {
        FileInfo::new(name, media_type.map(str::to_string), size)
    }

    #[test]
    fn test_accepts_known_media_type() {
        let file = info("upload.bin", Some(XLSX), 1024);
        assert!(validate_upload(&file, &UploadLimits::default()).is_ok());

        let file = info("upload", Some("application/x-msexcel"), 10);
        assert!(validate_upload(&file, &UploadLimits::default()).is_ok());
    }

    #[test]
    fn test_extension_fallback_is_case_insensitive() {
        for name in ["report.xlsx", "REPORT.XLSX", "legacy.Xls"] {
            let file = info(name, Some("application/octet-stream"), 10);
            assert!(validate_upload(&file, &UploadLimits::default()).is_ok(), "{name}");
        }
        assert!(validate_upload(&info("data.xls", None, 10), &UploadLimits::default()).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        for name in ["notes.csv", "archive.xlsx.zip", "xlsx", "sheet.xlsm"] {
            let err = validate_upload(&info(name, Some("text/csv"), 10), &UploadLimits::default())
                .unwrap_err();
            assert!(matches!(err, SheetError::InvalidFileType { .. }), "{name}");
            assert_eq!(
                err.to_string(),
                "Please upload a valid Excel file (.xlsx or .xls)"
            );
        }
    }

    #[test]
    fn test_size_ceiling() {
        let limits = UploadLimits::default();
        assert!(validate_upload(&info("a.xlsx", None, DEFAULT_MAX_BYTES), &limits).is_ok());

        let err = validate_upload(&info("a.xlsx", None, DEFAULT_MAX_BYTES + 1), &limits)
            .unwrap_err();
        assert!(matches!(
            err,
            SheetError::FileTooLarge { size, limit }
                if size == DEFAULT_MAX_BYTES + 1 && limit == DEFAULT_MAX_BYTES
        ));
        assert_eq!(err.to_string(), "File size must be less than 10MB");
        assert!(err.is_validation());
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate_upload(&info("a.txt", None, u64::MAX), &UploadLimits::default())
            .unwrap_err();
        assert!(matches!(err, SheetError::InvalidFileType { .. }));
    }

    #[test]
    fn test_custom_limit() {
        let limits = UploadLimits::default().with_max_bytes(100);
        assert!(validate_upload(&info("a.xlsx", None, 101), &limits).is_err());
    }

    #[test]
    fn test_report() {
        let ok = ValidationReport::from(&Ok::<(), SheetError>(()));
        assert!(ok.is_valid);
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"isValid":true}"#);

        let failed = validate_upload(&info("a.txt", None, 1), &UploadLimits::default());
        let report = ValidationReport::from(&failed);
        assert!(!report.is_valid);
        assert!(report.error.unwrap().contains(".xlsx or .xls"));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(DEFAULT_MAX_BYTES), "10 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }
}
