//! Unified application error type.
//! Every module (db, store, mail, core, cli, server) returns AppError so the
//! CLI and the HTTP layer report failures the same way.

use crate::core::forms::FieldError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote backend returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Operation not supported by the {backend} backend: {operation}")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("Invalid event status: {0}")]
    InvalidStatus(String),

    #[error("Invalid conductor reference: {0}")]
    InvalidConductor(String),

    // ---------------------------
    // Form / workflow errors
    // ---------------------------
    #[error("Validation failed: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("{0} is already registered for this event")]
    DuplicateRegistration(String),

    #[error("Registration is closed for event {0}")]
    RegistrationClosed(String),

    #[error("Feedback is not open yet for event {0}")]
    FeedbackNotOpen(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    // ---------------------------
    // Portal access
    // ---------------------------
    #[error("Invalid or missing portal key")]
    Unauthorized,

    #[error("Portal is locked: no portal key configured")]
    PortalLocked,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Output errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error("Mail error: {0}")]
    Mail(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{} ({})", f.field, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
