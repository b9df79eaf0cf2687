//! Database repositories for the data access layer.
//!
//! One entity lives here: the file record. Every write is a single statement on a
//! single row; there are no multi-row transactions.

pub mod file_record;

pub use file_record::{FileRecordRepository, FileRecordStore};
