//! Application state and sub-state extractors.
//!
//! Handlers extract only the service they need via Axum's `FromRef`.

use crate::services::{IngestionService, MailTransport, NotificationService, ResolutionService};
use sharebox_db::FileRecordStore;
use sharebox_storage::StorageHandles;
use std::sync::Arc;

/// Deployment settings the services need at request time.
#[derive(Clone, Debug)]
pub struct ShareSettings {
    /// Base of every download-page link
    pub public_base_url: String,
    /// Namespace uploads are filed under in the object store
    pub storage_folder: String,
}

#[derive(Clone)]
pub struct AppState {
    /// Metadata store, also pinged by the readiness probe
    pub files: Arc<dyn FileRecordStore>,
    pub ingestion: IngestionService,
    pub resolution: ResolutionService,
    pub notification: NotificationService,
}

impl AppState {
    /// Wire the services around the process-wide handles.
    pub fn new(
        files: Arc<dyn FileRecordStore>,
        storage: StorageHandles,
        mail: Arc<dyn MailTransport>,
        settings: ShareSettings,
    ) -> Self {
        Self {
            ingestion: IngestionService::new(
                storage.storage,
                files.clone(),
                settings.storage_folder,
                settings.public_base_url.clone(),
            ),
            resolution: ResolutionService::new(files.clone(), storage.fetcher),
            notification: NotificationService::new(files.clone(), mail, settings.public_base_url),
            files,
        }
    }
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for IngestionService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.ingestion.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for ResolutionService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.resolution.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for NotificationService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.notification.clone()
    }
}
