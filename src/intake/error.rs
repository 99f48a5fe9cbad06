//! Intake errors.

use std::path::PathBuf;

/// Errors that can occur while loading an export from disk.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Unsupported file '{path}': expected a .txt transcript, a .zip export or an export directory")]
    UnsupportedFile { path: PathBuf },

    #[error("No .txt transcript found in {path}")]
    NoTranscript { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}
