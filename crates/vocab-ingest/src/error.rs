//! Error types for data file loading.

use std::path::PathBuf;
use thiserror::Error;
use vocab_core::EntryError;

/// Errors that can occur while loading a vocabulary data file.
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Data file not found.
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Encoding Errors ===
    /// File starts with a byte-order mark for an encoding we do not read.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// File is not valid UTF-8.
    #[error("invalid UTF-8 in {path} at byte {offset}")]
    InvalidUtf8 { path: PathBuf, offset: usize },

    // === Content Errors ===
    /// Malformed line or empty data.
    #[error("{path}: {source}")]
    Entries {
        path: PathBuf,
        #[source]
        source: EntryError,
    },
}

impl IngestError {
    /// Whether the file itself was fine but its contents were not.
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::Entries { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
