//! Object store setup

use anyhow::{Context, Result};
use sharebox_core::Config;
use sharebox_storage::{create_storage, StorageHandles};

/// Build the object store handles once for the whole process.
pub async fn setup_storage(config: &Config) -> Result<StorageHandles> {
    let handles = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %handles.storage.backend_type(),
        folder = %config.storage_folder,
        "Storage backend initialized"
    );

    Ok(handles)
}
