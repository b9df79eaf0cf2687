use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A shared file: metadata about bytes already accepted by the object store.
///
/// Everything except `sender`/`receiver` is immutable after creation. Those two
/// record the most recent notification and are overwritten by the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
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

/// Fields for a new record; the metadata store assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFileRecord {
    pub filename: String,
    pub size_in_bytes: i64,
    pub format: String,
    pub secure_url: String,
}

/// Describe response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// Original client-supplied filename
    pub name: String,
    pub size_in_bytes: i64,
    pub format: String,
    pub id: Uuid,
}

impl From<&FileRecord> for FileSummary {
    fn from(record: &FileRecord) -> Self {
        Self {
            name: record.filename.clone(),
            size_in_bytes: record.size_in_bytes,
            format: record.format.clone(),
            id: record.id,
        }
    }
}

/// Upload response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: Uuid,
    pub download_page_link: String,
}

/// Notify request body. Addresses are passed through to the mail transport as-is.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub id: String,
    pub email_from: String,
    pub email_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_with_wire_field_names() {
        let id = Uuid::new_v4();
        let record = FileRecord {
            id,
            filename: "a.txt".to_string(),
            size_in_bytes: 10,
            format: "txt".to_string(),
            secure_url: "https://cdn.example.com/sharebox/x.txt".to_string(),
            sender: None,
            receiver: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(FileSummary::from(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "a.txt",
                "sizeInBytes": 10,
                "format": "txt",
                "id": id.to_string(),
            })
        );
    }

    #[test]
    fn notify_request_reads_camel_case_body() {
        let body = r#"{"id":"abc","emailFrom":"a@x.com","emailTo":"b@x.com"}"#;
        let req: NotifyRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.id, "abc");
        assert_eq!(req.email_from, "a@x.com");
        assert_eq!(req.email_to, "b@x.com");
    }
}
