//! Reader for config files written in INI syntax.
//!
//! Older tools wrote the same `[DEFAULT]` / `[GEOMETRY]` keys with unquoted
//! values (`shuffle = False`, `data_file = n2.txt`), which is not TOML. This
//! reader turns such a file into a [`Table`] of string values so the regular
//! per-key coercions in the document module apply unchanged. Lines it cannot
//! interpret are reported and skipped; they never discard the rest of the file.

use toml::{Table, Value};

use crate::document::{DEFAULT_TABLE, GEOMETRY_TABLE};
use crate::error::ConfigParseError;

/// Result of reading an INI file.
#[derive(Debug, Clone, PartialEq)]
pub struct IniDocument {
    /// One sub-table per section, every value a string.
    pub table: Table,
    /// Lines that were neither a section header, a `key = value` pair, a
    /// continuation nor a comment.
    pub errors: Vec<ConfigParseError>,
}

/// Parse INI text the way Python's `configparser` writes it.
///
/// Keys are lowercased, `=` and `:` both separate key from value, `#` and
/// `;` start comment lines, and indented lines continue the previous value.
pub fn parse_ini(text: &str) -> IniDocument {
    let mut table = Table::new();
    let mut errors = Vec::new();
    let mut section: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if raw.starts_with(char::is_whitespace)
            && let (Some(name), Some(key)) = (&section, &last_key)
            && let Some(Value::String(value)) = table
                .get_mut(name)
                .and_then(Value::as_table_mut)
                .and_then(|entries| entries.get_mut(key))
        {
            value.push('\n');
            value.push_str(line);
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            table
                .entry(name.clone())
                .or_insert_with(|| Value::Table(Table::new()));
            section = Some(name);
            last_key = None;
            continue;
        }

        let Some(name) = &section else {
            errors.push(line_error(None, idx + 1, line, "a [section] header first"));
            continue;
        };

        match split_key_value(line) {
            Some((key, value)) => {
                if let Some(Value::Table(entries)) = table.get_mut(name) {
                    entries.insert(key.clone(), Value::String(value.to_string()));
                }
                last_key = Some(key);
            }
            None => {
                errors.push(line_error(
                    Some(name),
                    idx + 1,
                    line,
                    "`key = value` or a [section] header",
                ));
                last_key = None;
            }
        }
    }

    IniDocument { table, errors }
}

fn split_key_value(line: &str) -> Option<(String, &str)> {
    let at = line.find(['=', ':'])?;
    let key = line[..at].trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_lowercase(), line[at + 1..].trim()))
}

fn line_error(
    section: Option<&str>,
    line_number: usize,
    line: &str,
    expected: &'static str,
) -> ConfigParseError {
    let table = match section {
        Some(DEFAULT_TABLE) => DEFAULT_TABLE,
        Some(GEOMETRY_TABLE) => GEOMETRY_TABLE,
        _ => "*",
    };
    ConfigParseError {
        table,
        key: "*",
        value: format!("line {line_number}: {line}"),
        expected,
    }
}
