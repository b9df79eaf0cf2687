//! Upload, resolve and notify services, plus the mail transport seam.
//!
//! Each service owns the process-wide handles it needs (`Arc<dyn ...>`), built
//! once in `setup::services` and cloned into handlers through `FromRef`.

pub mod email;
pub mod ingestion;
pub mod notification;
pub mod resolution;
pub mod template;

pub use email::{
    MailError, MailTransport, OutgoingMail, SmtpMailTransport, UnconfiguredMailTransport,
};
pub use ingestion::{IngestionService, UploadOutcome};
pub use notification::NotificationService;
pub use resolution::ResolutionService;

use sharebox_core::AppError;
use uuid::Uuid;

pub(crate) const FILE_NOT_FOUND: &str = "File does not exist";

/// Identifiers that are not valid keys resolve to nothing, like unknown keys.
pub(crate) fn parse_file_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| file_not_found())
}

pub(crate) fn file_not_found() -> AppError {
    AppError::NotFound(FILE_NOT_FOUND.to_string())
}
