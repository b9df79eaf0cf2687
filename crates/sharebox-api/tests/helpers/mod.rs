//! Test helpers: build AppState and router around in-memory doubles.
//!
//! Run from workspace root: `cargo test -p sharebox-api`. The object store is a
//! real `LocalStorage` in a temp dir; the metadata store and mail transport are
//! in-memory so tests can assert on what was (not) written or sent.

#![allow(dead_code)]

pub mod doubles;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use doubles::{
    FailingFileStore, FailingStorage, InMemoryFileStore, RecordFault, RecordingMailTransport,
};
use sharebox_api::setup::routes;
use sharebox_api::state::{AppState, ShareSettings};
use sharebox_api::MailTransport;
use sharebox_core::config::SmtpConfig;
use sharebox_core::{Config, StorageBackend};
use sharebox_db::FileRecordStore;
use sharebox_storage::{LocalStorage, Storage, StorageHandles};
use std::sync::Arc;
use tempfile::TempDir;

pub const PUBLIC_BASE_URL: &str = "https://share.example.com";
pub const BLOB_BASE_URL: &str = "http://localhost:4000/blobs";

/// API path prefix for tests (e.g. `/api/files`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", sharebox_api::constants::API_PREFIX, path)
}

/// Test application: server plus handles on the doubles behind it.
pub struct TestApp {
    pub server: TestServer,
    pub files: Arc<InMemoryFileStore>,
    pub mail: Arc<RecordingMailTransport>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Knobs for the few tests that need a misbehaving upstream.
#[derive(Default)]
pub struct TestAppOptions {
    pub failing_storage: bool,
    pub failing_mail: bool,
    pub record_fault: Option<RecordFault>,
}

fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        log_format: "compact".to_string(),
        database_url: "postgresql://unused/test".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        public_base_url: PUBLIC_BASE_URL.to_string(),
        storage_backend: StorageBackend::Local,
        storage_folder: "sharebox".to_string(),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: Some(temp_dir.path().display().to_string()),
        local_storage_base_url: Some(BLOB_BASE_URL.to_string()),
        smtp: SmtpConfig::default(),
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

/// Setup test app with local storage in a temp dir and in-memory doubles.
pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&temp_dir);

    let local = Arc::new(
        LocalStorage::new(temp_dir.path(), BLOB_BASE_URL.to_string())
            .await
            .expect("Failed to create local storage"),
    );
    let storage: Arc<dyn Storage> = if options.failing_storage {
        Arc::new(FailingStorage)
    } else {
        local.clone()
    };

    let files = Arc::new(InMemoryFileStore::default());
    let record_store: Arc<dyn FileRecordStore> = match options.record_fault {
        Some(fault) => Arc::new(FailingFileStore::new(files.clone(), fault)),
        None => files.clone(),
    };
    let mail = Arc::new(RecordingMailTransport::new(options.failing_mail));
    let mail_transport: Arc<dyn MailTransport> = mail.clone();

    let state = AppState::new(
        record_store,
        StorageHandles {
            storage,
            fetcher: local,
        },
        mail_transport,
        ShareSettings {
            public_base_url: config.public_base_url.clone(),
            storage_folder: config.storage_folder.clone(),
        },
    );

    let app = routes::setup_routes(&config, Arc::new(state)).expect("Failed to build routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        files,
        mail,
        temp_dir,
    }
}

/// Multipart form with one file in the `myFile` field.
pub fn file_form(name: &str, mime: &str, data: &[u8]) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(name.to_string())
        .mime_type(mime.to_string());
    MultipartForm::new().add_part("myFile", part)
}

/// Upload `data` as `name` and return the JSON response body.
pub async fn upload(client: &TestServer, name: &str, data: &[u8]) -> serde_json::Value {
    let response = client
        .post(&api_path("/upload"))
        .multipart(file_form(name, "text/plain", data))
        .await;
    assert_eq!(response.status_code(), 200, "upload failed: {}", response.text());
    response.json()
}

/// Upload and return the assigned id.
pub async fn upload_id(client: &TestServer, name: &str, data: &[u8]) -> String {
    upload(client, name, data).await["id"]
        .as_str()
        .expect("Expected 'id' in upload response")
        .to_string()
}
