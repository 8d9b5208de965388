//! Error types for invigil
//!
//! Errors exist only at the ingest/encoding surface. The classification core
//! itself never errors: insufficient visibility and degenerate geometry fail
//! safe toward `Normal`/no-alert.

use thiserror::Error;

/// Errors that can occur while parsing pose payloads or encoding output
#[derive(Debug, Error)]
pub enum InvigilError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse pose payload: {0}")]
    ParseError(String),

    #[error("Detection supplies {got} landmarks, expected at least {expected}")]
    MissingLandmarks { expected: usize, got: usize },

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
