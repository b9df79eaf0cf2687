//! Sharebox Core Library
//!
//! This crate provides the domain model, error types, and configuration shared
//! by the storage, database, and API crates.

pub mod config;
pub mod error;
pub mod links;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use links::{download_page_link, human_readable_size};
pub use storage_types::StorageBackend;
