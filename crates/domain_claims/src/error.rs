//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("{0}")]
    Validation(String),

    #[error("Please attach your bill (PDF/JPG/PNG)")]
    MissingDocument,

    #[error("Unsupported file type '{0}'. Attach a PDF, PNG or JPG")]
    UnsupportedDocument(String),

    #[error("Amount must be a positive number, got '{0}'")]
    InvalidAmount(String),

    #[error("Unknown decision: {0}")]
    UnknownDecision(String),

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),
}
