//! Upload pipeline: validate, then decode on a blocking worker.

use crate::error::{CoreError, CoreResult};
use chartsheet_sheet::{validate_upload, FileInfo, Table, UploadLimits};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Semaphore;

/// A spreadsheet received from the user, not yet validated.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, media_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            bytes,
        }
    }

    /// Read a file from disk. The declared media type is left unknown, so
    /// validation falls back to the extension.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, None, bytes))
    }

    /// Metadata used for validation; the size is the actual byte count.
    #[must_use]
    pub fn info(&self) -> FileInfo {
        FileInfo::new(
            self.name.clone(),
            self.media_type.clone(),
            self.bytes.len() as u64,
        )
    }
}

/// A parsed upload together with its metadata, as kept in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub data: Table,
    pub user_id: String,
}

impl UploadedFile {
    /// Wrap a parsed table with a fresh id and the current time.
    pub fn new(info: &FileInfo, data: Table, user_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: info.name.clone(),
            size: info.size,
            uploaded_at: Utc::now(),
            data,
            user_id: user_id.into(),
        }
    }
}

/// Stage of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Idle,
    Uploading,
    Processing,
    Complete,
    Error,
}

/// Progress report emitted while an upload moves through its stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    /// Percent complete, 0-100.
    pub progress: u8,
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadProgress {
    fn at(progress: u8, status: UploadStatus) -> Self {
        Self {
            progress,
            status,
            error: None,
        }
    }

    fn failed(error: &CoreError) -> Self {
        Self {
            progress: 0,
            status: UploadStatus::Error,
            error: Some(error.to_string()),
        }
    }
}

/// Decode spreadsheet bytes without blocking the async runtime.
///
/// The whole buffer is decoded at once; the future resolves to the table or a
/// parse error, with nothing observable in between.
pub async fn parse_upload(bytes: Vec<u8>) -> CoreResult<Table> {
    let table = tokio::task::spawn_blocking(move || Table::from_bytes(&bytes)).await??;
    Ok(table)
}

/// Runs uploads one at a time.
///
/// A submission that arrives while another is still being processed is
/// rejected with [`CoreError::UploadInProgress`] rather than queued.
#[derive(Debug)]
pub struct Uploader {
    limits: UploadLimits,
    gate: Semaphore,
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new(UploadLimits::default())
    }
}

impl Uploader {
    #[must_use]
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            limits,
            gate: Semaphore::new(1),
        }
    }

    /// Limits applied to every upload
    #[must_use]
    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// Whether an upload is currently being processed.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.gate.available_permits() == 0
    }

    /// Validate and parse `file` on behalf of `user_id`.
    pub async fn upload(&self, file: IncomingFile, user_id: &str) -> CoreResult<UploadedFile> {
        self.upload_with_progress(file, user_id, |_| {}).await
    }

    /// Like [`Uploader::upload`], reporting each stage to `on_progress`.
    ///
    /// Stages: `uploading` (30%), `processing` (60%), then `complete` (100%)
    /// or `error` with the failure message. A rejected validation goes
    /// straight to `error`.
    pub async fn upload_with_progress<F>(
        &self,
        file: IncomingFile,
        user_id: &str,
        mut on_progress: F,
    ) -> CoreResult<UploadedFile>
    where
        F: FnMut(UploadProgress) + Send,
    {
        let Ok(_permit) = self.gate.try_acquire() else {
            tracing::warn!(file = %file.name, "upload ignored, another one is in progress");
            return Err(CoreError::UploadInProgress);
        };

        let info = file.info();
        if let Err(e) = validate_upload(&info, &self.limits) {
            tracing::warn!(file = %info.name, size = info.size, error = %e, "upload rejected");
            let e = CoreError::from(e);
            on_progress(UploadProgress::failed(&e));
            return Err(e);
        }

        on_progress(UploadProgress::at(30, UploadStatus::Uploading));
        on_progress(UploadProgress::at(60, UploadStatus::Processing));

        match parse_upload(file.bytes).await {
            Ok(table) => {
                tracing::info!(
                    file = %info.name,
                    sheet = %table.sheet_name,
                    rows = table.row_count(),
                    columns = table.col_count(),
                    "upload parsed"
                );
                on_progress(UploadProgress::at(100, UploadStatus::Complete));
                Ok(UploadedFile::new(&info, table, user_id))
            }
            Err(e) => {
                tracing::warn!(file = %info.name, error = %e, "upload failed to parse");
                on_progress(UploadProgress::failed(&e));
                Err(e)
            }
        }
    }
}
