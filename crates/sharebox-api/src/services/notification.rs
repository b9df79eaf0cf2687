//! Notify: email a download link, then record who shared with whom.

use super::email::{MailTransport, OutgoingMail};
use super::template::render_share_email;
use super::{file_not_found, parse_file_id};
use sharebox_core::models::FileRecord;
use sharebox_core::{download_page_link, human_readable_size, AppError};
use sharebox_db::FileRecordStore;
use std::sync::Arc;

pub const SHARE_SUBJECT: &str = "File shared with you";

/// Compose the share message for `record`. Addresses are passed through untouched.
pub fn compose_share_mail(
    record: &FileRecord,
    email_from: &str,
    email_to: &str,
    public_base_url: &str,
) -> OutgoingMail {
    let link = download_page_link(public_base_url, record.id);
    let size = human_readable_size(record.size_in_bytes);

    OutgoingMail {
        from: email_from.to_string(),
        to: email_to.to_string(),
        subject: SHARE_SUBJECT.to_string(),
        text: format!("{} shared a file with you", email_from),
        html: render_share_email(email_from, &link, &record.filename, &size),
    }
}

#[derive(Clone)]
pub struct NotificationService {
    files: Arc<dyn FileRecordStore>,
    mail: Arc<dyn MailTransport>,
    public_base_url: String,
}

impl NotificationService {
    pub fn new(
        files: Arc<dyn FileRecordStore>,
        mail: Arc<dyn MailTransport>,
        public_base_url: String,
    ) -> Self {
        Self {
            files,
            mail,
            public_base_url,
        }
    }

    /// Send the share email, then overwrite `sender`/`receiver`.
    ///
    /// Order is read, send, write. A failed send leaves the record untouched. Not
    /// idempotent: retrying a send that actually succeeded mails the recipient twice.
    #[tracing::instrument(skip(self, email_from, email_to))]
    pub async fn notify(
        &self,
        id: &str,
        email_from: &str,
        email_to: &str,
    ) -> Result<FileRecord, AppError> {
        let file_id = parse_file_id(id)?;
        let record = self
            .files
            .get_by_id(file_id)
            .await?
            .ok_or_else(file_not_found)?;

        let mail = compose_share_mail(&record, email_from, email_to, &self.public_base_url);

        self.mail.send(&mail).await.map_err(|e| {
            tracing::error!(error = %e, file_id = %file_id, "Share email not sent");
            AppError::MailTransport(e.to_string())
        })?;

        let updated = self
            .files
            .record_notification(file_id, email_from, email_to)
            .await?
            .ok_or_else(file_not_found)?;

        tracing::info!(file_id = %file_id, "Share email sent");
        Ok(updated)
    }
}
