//! Read-only view handed to the renderer after every change.

use serde::{Deserialize, Serialize};

use crate::entry::VocabEntry;
use crate::reveal::{RevealPhase, Visibility};

/// Everything a renderer needs to draw the current card.
///
/// Text is trimmed but not wrapped; line layout is up to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `"i/N"`, one-based.
    pub position_label: String,
    pub phonetic: String,
    /// Word text, or the phonetic reading when the entry has no word.
    pub word: String,
    pub meaning: String,
    pub meaning_visible: bool,
    pub word_visible: bool,
    pub auto_next: bool,
    pub phase: RevealPhase,
}

impl Snapshot {
    pub fn new(
        index: usize,
        total: usize,
        entry: Option<&VocabEntry>,
        visibility: Visibility,
        phase: RevealPhase,
        auto_next: bool,
    ) -> Self {
        let (word, phonetic, meaning) = entry
            .map(|e| {
                (
                    e.display_word().to_string(),
                    e.display_phonetic().to_string(),
                    e.display_meaning().to_string(),
                )
            })
            .unwrap_or_default();

        Self {
            position_label: position_label(index, total),
            phonetic,
            word,
            meaning,
            meaning_visible: visibility.meaning_visible,
            word_visible: visibility.word_visible,
            auto_next,
            phase,
        }
    }
}

/// One-based `"i/N"` label for a zero-based index.
pub fn position_label(index: usize, total: usize) -> String {
    format!("{}/{}", index + 1, total)
}
