//! Error types for the flashcard engine.

use thiserror::Error;

/// Errors raised while building an entry list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// A line did not split into exactly `word|phonetic|meaning`.
    #[error("line {line}: expected 3 fields separated by '|', found {fields}")]
    MalformedEntry {
        /// One-based line number in the source.
        line: usize,
        /// Number of fields the line produced.
        fields: usize,
    },

    /// The source produced no entries.
    #[error("no vocabulary entries found")]
    EmptyData,
}

/// Errors raised by navigation commands.
///
/// These are local to the command that produced them; state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// A goto index outside `1..=len`.
    #[error("index {requested} is out of range (valid: 1..={len})")]
    OutOfRange { requested: i64, len: usize },
}

/// Errors returned by [`Session::handle`](crate::Session::handle).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// A preference value that cannot drive the timers.
    #[error("invalid value {value} for {name}: must be a finite, non-negative number")]
    InvalidPreference { name: &'static str, value: f64 },
}

/// Result type for session commands.
pub type Result<T> = std::result::Result<T, SessionError>;
