//! Domain models and API payloads.

pub mod file_record;

pub use file_record::{
    FileRecord, FileSummary, MessageResponse, NewFileRecord, NotifyRequest, UploadResponse,
};
