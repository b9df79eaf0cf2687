//! Sharebox metadata store.

pub mod db;

pub use db::{FileRecordRepository, FileRecordStore};
