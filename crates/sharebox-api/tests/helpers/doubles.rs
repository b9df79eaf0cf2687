//! In-memory stand-ins for the metadata store, object store and mail transport.

use async_trait::async_trait;
use chrono::Utc;
use sharebox_api::{MailError, MailTransport, OutgoingMail};
use sharebox_core::models::{FileRecord, NewFileRecord};
use sharebox_core::{AppError, StorageBackend};
use sharebox_db::FileRecordStore;
use sharebox_storage::{Storage, StorageError, StorageResult, StoredObject, UploadRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Metadata store backed by a map.
#[derive(Default)]
pub struct InMemoryFileStore {
    records: Mutex<HashMap<Uuid, FileRecord>>,
}

impl InMemoryFileStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<FileRecord> {
        let id = Uuid::parse_str(id).ok()?;
        self.records.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl FileRecordStore for InMemoryFileStore {
    async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError> {
        let now = Utc::now();
        let record = FileRecord {
            id: Uuid::new_v4(),
            filename: record.filename,
            size_in_bytes: record.size_in_bytes,
            format: record.format,
            secure_url: record.secure_url,
            sender: None,
            receiver: None,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn record_notification(
        &self,
        id: Uuid,
        sender: &str,
        receiver: &str,
    ) -> Result<Option<FileRecord>, AppError> {
        let mut records = self.records.lock().unwrap();
        Ok(records.get_mut(&id).map(|record| {
            record.sender = Some(sender.to_string());
            record.receiver = Some(receiver.to_string());
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Which metadata store call a [`FailingFileStore`] refuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordFault {
    /// `create` fails; the object store has already accepted the bytes
    Create,
    /// `get_by_id` and `ping` fail, as if the database went away after upload
    Reads,
    /// `record_notification` fails after the mail went out
    Notification,
}

/// Detail the failing store puts in its errors; must never reach a client.
pub const DATABASE_FAULT_DETAIL: &str = "connection reset by db-primary-7";

/// Metadata store that fails one kind of call and delegates the rest.
pub struct FailingFileStore {
    inner: Arc<InMemoryFileStore>,
    fault: RecordFault,
}

impl FailingFileStore {
    pub fn new(inner: Arc<InMemoryFileStore>, fault: RecordFault) -> Self {
        Self { inner, fault }
    }

    fn fail<T>(&self) -> Result<T, AppError> {
        Err(AppError::Database(sqlx::Error::Protocol(
            DATABASE_FAULT_DETAIL.to_string(),
        )))
    }
}

#[async_trait]
impl FileRecordStore for FailingFileStore {
    async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError> {
        if self.fault == RecordFault::Create {
            return self.fail();
        }
        self.inner.create(record).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        if self.fault == RecordFault::Reads {
            return self.fail();
        }
        self.inner.get_by_id(id).await
    }

    async fn record_notification(
        &self,
        id: Uuid,
        sender: &str,
        receiver: &str,
    ) -> Result<Option<FileRecord>, AppError> {
        if self.fault == RecordFault::Notification {
            return self.fail();
        }
        self.inner.record_notification(id, sender, receiver).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fault == RecordFault::Reads {
            return self.fail();
        }
        Ok(())
    }
}

/// Object store that rejects every upload.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload(&self, _request: UploadRequest<'_>) -> StorageResult<StoredObject> {
        Err(StorageError::UploadFailed(
            "AccessDenied: bucket policy rejected PutObject".to_string(),
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Mail transport that records every send, optionally failing them all.
pub struct RecordingMailTransport {
    fail: bool,
    attempts: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailTransport {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Every message handed to the transport, delivered or not.
    pub fn attempts(&self) -> Vec<OutgoingMail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        self.attempts.lock().unwrap().push(mail.clone());
        if self.fail {
            return Err(MailError::Transport(
                "421 4.7.0 relay temporarily unavailable".to_string(),
            ));
        }
        Ok(())
    }
}
