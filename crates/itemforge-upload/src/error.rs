//! Error types for the upload layer

use thiserror::Error;

/// Errors that abort a row's upload
///
/// Per-statement write failures deliberately do not appear here; they
/// are collected in the upload report so the remaining statements and
/// rows still run.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The session could not create a new empty record
    #[error("record creation failed: {0}")]
    CreateRecord(String),

    /// Configured sandbox item is not a valid identifier
    #[error("invalid sandbox item: {0}")]
    BadSandboxItem(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
