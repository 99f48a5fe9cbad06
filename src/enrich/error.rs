//! Enrichment backend errors.

use std::time::Duration;

/// Errors that can occur while invoking an enrichment backend.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("No enrichment backend configured (set `program` in the [enrich] config section)")]
    NotConfigured,

    #[error("Backend not available: {0}")]
    NotAvailable(String),

    #[error("Backend timed out after {0:?}")]
    Timeout(Duration),

    #[error("Backend exited with code {code}: {stderr}")]
    ExitCode { code: i32, stderr: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for enrichment backends.
pub type EnrichResult<T> = Result<T, EnrichError>;
