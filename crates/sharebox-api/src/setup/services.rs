//! Service wiring: metadata store, mail transport, and application state.

use crate::services::{MailTransport, SmtpMailTransport, UnconfiguredMailTransport};
use crate::state::{AppState, ShareSettings};
use anyhow::{Context, Result};
use sharebox_core::Config;
use sharebox_db::FileRecordRepository;
use sharebox_storage::StorageHandles;
use sqlx::PgPool;
use std::sync::Arc;

/// Pick the mail transport. Without `SMTP_HOST` the service still starts and
/// every notify fails when it tries to send.
pub fn setup_mail_transport(config: &Config) -> Result<Arc<dyn MailTransport>> {
    let transport = SmtpMailTransport::from_config(&config.smtp)
        .context("Failed to initialize SMTP transport")?;

    Ok(match transport {
        Some(smtp) => Arc::new(smtp),
        None => {
            tracing::warn!("SMTP_HOST not set; share emails will fail until it is configured");
            Arc::new(UnconfiguredMailTransport)
        }
    })
}

/// Initialize all services and repositories
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: StorageHandles,
) -> Result<Arc<AppState>> {
    let files = Arc::new(FileRecordRepository::new(pool));
    let mail = setup_mail_transport(config)?;

    let state = AppState::new(
        files,
        storage,
        mail,
        ShareSettings {
            public_base_url: config.public_base_url.clone(),
            storage_folder: config.storage_folder.clone(),
        },
    );

    Ok(Arc::new(state))
}
