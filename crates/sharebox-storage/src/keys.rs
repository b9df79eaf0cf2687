//! Shared key generation for storage backends.
//!
//! Key format: `{folder}/{uuid}.{format}`.

use crate::{StorageError, StorageResult};
use uuid::Uuid;

/// Generate a fresh storage key inside `folder`.
pub fn generate_storage_key(folder: &str, format: &str) -> StorageResult<String> {
    let folder = folder.trim_matches('/');
    if folder.is_empty() || folder.contains("..") || folder.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "invalid storage folder '{}'",
            folder
        )));
    }
    Ok(format!("{}/{}.{}", folder, Uuid::new_v4(), format))
}
