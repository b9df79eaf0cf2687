//! Sharebox Storage Library
//!
//! Object-store abstraction and its backends (S3 via `object_store`, local
//! filesystem), plus the pass-through fetcher used to relay stored bytes back to
//! clients from their permanent URL.
//!
//! # Storage key format
//!
//! Keys are `{folder}/{uuid}.{format}`. The client-supplied filename never takes
//! part in addressing. Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod fetch;
pub mod format;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_storage, StorageHandles};
pub use fetch::HttpFetcher;
pub use format::detect_format;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use sharebox_core::StorageBackend;
pub use traits::{
    ByteStream, Storage, StorageError, StorageResult, StoredObject, UploadRequest, UrlFetcher,
};
