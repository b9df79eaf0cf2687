//! File record repository: create, read-by-id and notification update on `file_records`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sharebox_core::models::{FileRecord, NewFileRecord};
use sharebox_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Metadata store seam used by the API services.
#[async_trait]
pub trait FileRecordStore: Send + Sync {
    /// Insert a record; the store assigns `id` and timestamps.
    async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError>;

    /// Overwrite `sender`/`receiver` with the latest notification. Returns `None`
    /// when the record does not exist.
    async fn record_notification(
        &self,
        id: Uuid,
        sender: &str,
        receiver: &str,
    ) -> Result<Option<FileRecord>, AppError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Row type for file_records table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct FileRecordRow {
    pub id: Uuid,
    pub filename: String,
    pub size_in_bytes: i64,
    pub format: String,
    pub secure_url: String,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecordRow {
    pub fn to_file_record(self) -> FileRecord {
        FileRecord {
            id: self.id,
            filename: self.filename,
            size_in_bytes: self.size_in_bytes,
            format: self.format,
            secure_url: self.secure_url,
            sender: self.sender,
            receiver: self.receiver,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const RETURNING_COLUMNS: &str =
    "id, filename, size_in_bytes, format, secure_url, sender, receiver, created_at, updated_at";

/// Postgres-backed [`FileRecordStore`].
#[derive(Clone)]
pub struct FileRecordRepository {
    pool: PgPool,
}

impl FileRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRecordStore for FileRecordRepository {
    #[tracing::instrument(skip(self, record), fields(db.table = "file_records", size_bytes = record.size_in_bytes))]
    async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError> {
        let row: FileRecordRow = sqlx::query_as::<Postgres, FileRecordRow>(&format!(
            r#"
            INSERT INTO file_records (filename, size_in_bytes, format, secure_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(&record.filename)
        .bind(record.size_in_bytes)
        .bind(&record.format)
        .bind(&record.secure_url)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(file_id = %row.id, "File record created");
        Ok(row.to_file_record())
    }

    #[tracing::instrument(skip(self), fields(db.table = "file_records", db.record_id = %id))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, AppError> {
        let row: Option<FileRecordRow> = sqlx::query_as::<Postgres, FileRecordRow>(&format!(
            "SELECT {} FROM file_records WHERE id = $1",
            RETURNING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(FileRecordRow::to_file_record))
    }

    #[tracing::instrument(skip(self, sender, receiver), fields(db.table = "file_records", db.record_id = %id))]
    async fn record_notification(
        &self,
        id: Uuid,
        sender: &str,
        receiver: &str,
    ) -> Result<Option<FileRecord>, AppError> {
        let row: Option<FileRecordRow> = sqlx::query_as::<Postgres, FileRecordRow>(&format!(
            r#"
            UPDATE file_records
            SET sender = $2, receiver = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(id)
        .bind(sender)
        .bind(receiver)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(FileRecordRow::to_file_record))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
