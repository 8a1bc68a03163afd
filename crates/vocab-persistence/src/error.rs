//! Persistence error types.
//!
//! Load problems are recoverable: a bad key becomes a [`ConfigParseError`]
//! and the default is used. Save problems are real errors with
//! user-facing messages and remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// A single config value that could not be interpreted.
///
/// The loader keeps going with the default for that key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{table}] {key} = {value}: expected {expected}")]
pub struct ConfigParseError {
    pub table: &'static str,
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize configuration")]
    Serialization {
        #[source]
        source: toml::ser::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Serialization { .. } => {
                "An error occurred while writing the configuration.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the configuration to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that you have permission to read the configuration file.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or pass a different path with --config.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
