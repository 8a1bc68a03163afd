//! Text rendering of snapshots and entry listings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use vocab_core::{EntryStore, Outcome, Snapshot, WindowStyle};

/// Placeholder for a hidden field, so the card keeps its shape.
const HIDDEN: &str = "···";

/// Render the card the way the overlay lays it out: position and reading on
/// top, the word, then the meaning.
pub fn render_card(snapshot: &Snapshot) -> String {
    let word = if snapshot.word_visible {
        snapshot.word.as_str()
    } else {
        HIDDEN
    };
    let meaning = if snapshot.meaning_visible {
        snapshot.meaning.as_str()
    } else {
        HIDDEN
    };
    let auto = if snapshot.auto_next { "auto" } else { "manual" };

    format!(
        "[{}] {}  ({auto})\n  {word}\n  {meaning}",
        snapshot.position_label, snapshot.phonetic
    )
}

/// One-line description of a window outcome.
pub fn render_window(style: &WindowStyle, always_on_top: bool) -> String {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    format!(
        "window: border {}, transparent {}, always-on-top {}, color {}",
        on_off(style.border_visible),
        on_off(style.transparent),
        on_off(always_on_top),
        style.text_color.as_deref().unwrap_or("default"),
    )
}

/// Text to print for a command outcome, if any.
pub fn render_outcome(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Render(snapshot) => Some(render_card(snapshot)),
        Outcome::Clipboard(text) => Some(format!("copied: {text}")),
        Outcome::Window {
            style,
            always_on_top,
            ..
        } => Some(render_window(style, *always_on_top)),
        Outcome::Preferences { .. } | Outcome::Exit => None,
    }
}

/// Table of entries in store order, at most `limit` rows.
pub fn entries_table(store: &EntryStore, limit: Option<usize>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Word"),
        header_cell("Phonetic"),
        header_cell("Meaning"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    let shown = limit.unwrap_or(usize::MAX);
    for (index, entry) in store.entries().iter().take(shown).enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(entry.display_word()),
            Cell::new(entry.display_phonetic()),
            Cell::new(entry.display_meaning()),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
