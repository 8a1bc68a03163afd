//! Vocabulary entries and the ordered store that owns them.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::EntryError;

/// Field separator used by the data file.
pub const FIELD_SEPARATOR: char = '|';

/// One vocabulary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    pub phonetic: String,
    pub meaning: String,
}

impl VocabEntry {
    pub fn new(
        word: impl Into<String>,
        phonetic: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            phonetic: phonetic.into(),
            meaning: meaning.into(),
        }
    }

    /// Word text to display; falls back to the phonetic reading when the
    /// word field is blank.
    pub fn display_word(&self) -> &str {
        let word = self.word.trim();
        if word.is_empty() {
            self.display_phonetic()
        } else {
            word
        }
    }

    pub fn display_phonetic(&self) -> &str {
        self.phonetic.trim()
    }

    pub fn display_meaning(&self) -> &str {
        self.meaning.trim()
    }
}

/// Parse a single `word|phonetic|meaning` line.
///
/// `line_number` is only used for error reporting.
pub fn parse_entry(line: &str, line_number: usize) -> Result<VocabEntry, EntryError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    match fields.as_slice() {
        [word, phonetic, meaning] => Ok(VocabEntry::new(*word, *phonetic, *meaning)),
        _ => Err(EntryError::MalformedEntry {
            line: line_number,
            fields: fields.len(),
        }),
    }
}

/// Ordered, non-empty list of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<VocabEntry>,
}

impl EntryStore {
    /// Build a store from raw data-file lines.
    ///
    /// Blank lines are skipped; any other line must have exactly three fields.
    pub fn load<I, S>(lines: I) -> Result<Self, EntryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            entries.push(parse_entry(line, idx + 1)?);
        }

        tracing::debug!(entries = entries.len(), "parsed vocabulary entries");
        Self::from_entries(entries)
    }

    /// Wrap already-parsed entries.
    pub fn from_entries(entries: Vec<VocabEntry>) -> Result<Self, EntryError> {
        if entries.is_empty() {
            return Err(EntryError::EmptyData);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed store; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    /// Uniformly permute the entries in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
        tracing::debug!(entries = self.entries.len(), "shuffled entries");
    }
}
