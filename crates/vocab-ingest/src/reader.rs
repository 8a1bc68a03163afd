//! Vocabulary data file reading.
//!
//! The data file is UTF-8 text with one `word|phonetic|meaning` entry per
//! line. A leading UTF-8 byte-order mark is tolerated; UTF-16 files are
//! rejected up front rather than surfacing as malformed lines.

use std::path::Path;

use tracing::{debug, info};
use vocab_core::EntryStore;

use crate::error::{IngestError, Result};

/// Maximum data file size (16 MB).
pub const MAX_DATA_FILE_SIZE: u64 = 16 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_DATA_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Decode raw file bytes into text.
///
/// Strips a UTF-8 BOM and rejects UTF-16 BOMs.
pub fn decode_text(path: &Path, bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }

    let mut text = String::from_utf8(bytes).map_err(|e| IngestError::InvalidUtf8 {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })?;

    if text.as_bytes().starts_with(UTF8_BOM) {
        debug!(path = %path.display(), "stripping UTF-8 byte-order mark");
        text.drain(..UTF8_BOM.len());
    }

    Ok(text)
}

/// Parse already-decoded text into an entry store.
///
/// `path` is only used to label errors.
pub fn parse_entries(path: &Path, text: &str) -> Result<EntryStore> {
    EntryStore::load(text.lines()).map_err(|source| IngestError::Entries {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a vocabulary data file into an [`EntryStore`].
///
/// # Errors
///
/// Fails if the file is missing, unreadable, too large, not UTF-8, contains
/// a line without exactly three fields, or contains no entries at all.
pub fn load_entries(path: &Path) -> Result<EntryStore> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    let text = decode_text(path, bytes)?;
    let store = parse_entries(path, &text)?;

    info!(
        path = %path.display(),
        entries = store.len(),
        "loaded vocabulary entries"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("猫|neko|cat".as_bytes());
        let text = decode_text(Path::new("a.txt"), bytes).unwrap();
        assert_eq!(text, "猫|neko|cat");
    }

    #[test]
    fn test_decode_rejects_utf16() {
        let err = decode_text(Path::new("a.txt"), vec![0xFF, 0xFE, b'a', 0]).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));

        let err = decode_text(Path::new("a.txt"), vec![0xFE, 0xFF, 0, b'a']).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 BE",
                ..
            }
        ));
    }

    #[test]
    fn test_decode_reports_invalid_offset() {
        let err = decode_text(Path::new("a.txt"), vec![b'a', b'b', 0xC3]).unwrap_err();
        assert!(matches!(err, IngestError::InvalidUtf8 { offset: 2, .. }));
    }

    #[test]
    fn test_parse_entries_handles_crlf() {
        let store = parse_entries(Path::new("a.txt"), "a|b|c\r\n\r\nd|e|f\r\n").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).map(|e| e.meaning.as_str()), Some("f"));
    }
}
