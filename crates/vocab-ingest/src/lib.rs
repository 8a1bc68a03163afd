//! Vocabulary data file loading.
//!
//! Reads the `word|phonetic|meaning` data file into a
//! [`vocab_core::EntryStore`], with the file-level checks (existence, size,
//! encoding) the core parser does not concern itself with.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use vocab_ingest::load_entries;
//!
//! let store = load_entries(Path::new("tuvungn3.txt"))?;
//! println!("{} entries", store.len());
//! ```

mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use reader::{
    MAX_DATA_FILE_SIZE, check_file_size, check_file_size_with_limit, decode_text, load_entries,
    parse_entries,
};
