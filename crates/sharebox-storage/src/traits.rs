//! Storage abstraction traits
//!
//! [`Storage`] is the write side of the object store, [`UrlFetcher`] the read side:
//! stored bytes are always read back through the permanent URL the store reported.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The store answered, but not with something we can persist.
    #[error("Invalid storage response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunks of a stored object, relayed as they arrive.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// A single upload into the object store.
#[derive(Debug, Clone)]
pub struct UploadRequest<'a> {
    /// Logical namespace the object is filed under
    pub folder: &'a str,
    /// Client-declared name, used only for format detection
    pub original_name: &'a str,
    /// Client-declared content type, used only for format detection
    pub content_type: &'a str,
    pub data: Bytes,
}

/// What the object store reports after accepting an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    /// Permanent, publicly fetchable location of the bytes
    pub secure_url: String,
    /// Byte count actually stored
    pub bytes: u64,
    /// Detected content format, e.g. `"png"`
    pub format: String,
}

impl StoredObject {
    /// Reject responses that cannot back a file record.
    pub fn validate(self) -> StorageResult<Self> {
        if self.key.is_empty() {
            return Err(StorageError::InvalidResponse("empty storage key".to_string()));
        }
        if self.format.trim().is_empty() {
            return Err(StorageError::InvalidResponse("missing format".to_string()));
        }
        if i64::try_from(self.bytes).is_err() {
            return Err(StorageError::InvalidResponse(format!(
                "byte count {} out of range",
                self.bytes
            )));
        }
        let url = url::Url::parse(&self.secure_url).map_err(|e| {
            StorageError::InvalidResponse(format!("unparseable url {}: {}", self.secure_url, e))
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(StorageError::InvalidResponse(format!(
                "url scheme {} is not fetchable",
                url.scheme()
            )));
        }
        Ok(self)
    }
}

/// Object store write side.
///
/// All backends (S3, local filesystem) implement this trait.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store the bytes under `request.folder`, detecting their format.
    async fn upload(&self, request: UploadRequest<'_>) -> StorageResult<StoredObject>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Opens a pass-through byte stream from a permanent URL.
#[async_trait]
pub trait UrlFetcher: Send + Sync {
    async fn open(&self, url: &str) -> StorageResult<ByteStream>;
}
