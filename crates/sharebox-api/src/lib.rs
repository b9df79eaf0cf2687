//! Sharebox API Library
//!
//! This crate provides the HTTP handlers, the upload/resolve/notify services, and
//! application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
pub mod services;
pub mod setup;
pub mod telemetry;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError, ValidatedJson};
pub use services::{
    IngestionService, MailError, MailTransport, NotificationService, OutgoingMail,
    ResolutionService, SmtpMailTransport, UnconfiguredMailTransport,
};
pub use state::AppState;
