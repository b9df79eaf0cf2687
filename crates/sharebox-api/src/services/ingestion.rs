//! Upload: object store first, then exactly one metadata record.

use bytes::Bytes;
use sharebox_core::models::{FileRecord, NewFileRecord};
use sharebox_core::{download_page_link, AppError};
use sharebox_db::FileRecordStore;
use sharebox_storage::{Storage, StoredObject, UploadRequest};
use std::sync::Arc;

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub record: FileRecord,
    pub download_page_link: String,
}

#[derive(Clone)]
pub struct IngestionService {
    storage: Arc<dyn Storage>,
    files: Arc<dyn FileRecordStore>,
    folder: String,
    public_base_url: String,
}

impl IngestionService {
    pub fn new(
        storage: Arc<dyn Storage>,
        files: Arc<dyn FileRecordStore>,
        folder: String,
        public_base_url: String,
    ) -> Self {
        Self {
            storage,
            files,
            folder,
            public_base_url,
        }
    }

    /// Store the bytes, then record what the store reported.
    ///
    /// Size and format always come from the store, never from the client. A store
    /// failure aborts before any metadata write. A metadata failure after a
    /// successful store leaves an orphaned object, which is logged with its key.
    #[tracing::instrument(
        skip_all,
        fields(original_name = %original_name, content_type = %content_type, upload_bytes = data.len())
    )]
    pub async fn upload(
        &self,
        original_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<UploadOutcome, AppError> {
        let stored = self
            .storage
            .upload(UploadRequest {
                folder: &self.folder,
                original_name,
                content_type,
                data,
            })
            .await
            .and_then(StoredObject::validate)
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    backend = %self.storage.backend_type(),
                    "Object store rejected upload"
                );
                AppError::StorageUpload(e.to_string())
            })?;

        let size_in_bytes = i64::try_from(stored.bytes)
            .map_err(|_| AppError::StorageUpload(format!("size {} out of range", stored.bytes)))?;

        let record = self
            .files
            .create(NewFileRecord {
                filename: original_name.to_string(),
                size_in_bytes,
                format: stored.format.clone(),
                secure_url: stored.secure_url.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    key = %stored.key,
                    secure_url = %stored.secure_url,
                    "Metadata write failed after upload; stored object is orphaned"
                );
                e
            })?;

        tracing::info!(
            file_id = %record.id,
            key = %stored.key,
            size_bytes = record.size_in_bytes,
            format = %record.format,
            "File uploaded"
        );

        Ok(UploadOutcome {
            download_page_link: download_page_link(&self.public_base_url, record.id),
            record,
        })
    }
}
