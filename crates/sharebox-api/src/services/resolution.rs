//! Describe and download: resolve an identifier to its record, then its bytes.

use super::{file_not_found, parse_file_id};
use sharebox_core::models::{FileRecord, FileSummary};
use sharebox_core::AppError;
use sharebox_db::FileRecordStore;
use sharebox_storage::{ByteStream, StorageError, UrlFetcher};
use std::sync::Arc;

#[derive(Clone)]
pub struct ResolutionService {
    files: Arc<dyn FileRecordStore>,
    fetcher: Arc<dyn UrlFetcher>,
}

impl ResolutionService {
    pub fn new(files: Arc<dyn FileRecordStore>, fetcher: Arc<dyn UrlFetcher>) -> Self {
        Self { files, fetcher }
    }

    pub async fn find(&self, id: &str) -> Result<FileRecord, AppError> {
        let id = parse_file_id(id)?;
        self.files.get_by_id(id).await?.ok_or_else(file_not_found)
    }

    #[tracing::instrument(skip(self))]
    pub async fn describe(&self, id: &str) -> Result<FileSummary, AppError> {
        let record = self.find(id).await?;
        Ok(FileSummary::from(&record))
    }

    /// Open the stored bytes for relaying. The stream is not buffered; an upstream
    /// failure mid-stream simply ends it early.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, id: &str) -> Result<(FileRecord, ByteStream), AppError> {
        let record = self.find(id).await?;

        let stream = self.fetcher.open(&record.secure_url).await.map_err(|e| {
            tracing::error!(
                error = %e,
                file_id = %record.id,
                secure_url = %record.secure_url,
                "Failed to open stored object"
            );
            match e {
                StorageError::NotFound(_) => {
                    AppError::Storage(format!("stored object missing for {}", record.id))
                }
                other => AppError::Storage(other.to_string()),
            }
        })?;

        tracing::debug!(file_id = %record.id, format = %record.format, "Relaying stored object");
        Ok((record, stream))
    }
}
