//! Mapping between [`Preferences`] and the on-disk TOML document.
//!
//! The document keeps the two tables and key names older config files use,
//! including the `alway_on_top` spelling. Reading is lenient per key and
//! accepts the string values INI-era files hold; writing always produces
//! native TOML types.

use std::path::PathBuf;

use serde::Serialize;
use toml::{Table, Value};
use tracing::warn;
use vocab_core::{Geometry, Preferences, validate_duration};

use crate::error::ConfigParseError;

pub const DEFAULT_TABLE: &str = "DEFAULT";
pub const GEOMETRY_TABLE: &str = "GEOMETRY";

/// How the config file on disk was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// No file yet.
    Missing,
    Toml,
    /// INI syntax from an older tool; every line was understood.
    Ini,
    /// Neither TOML nor clean INI. Whatever keys could be read were used,
    /// but rewriting the file would lose the rest.
    Damaged,
}

/// Preferences read from a config document, plus every key that had to
/// fall back to its default.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub preferences: Preferences,
    pub warnings: Vec<ConfigParseError>,
    pub format: ConfigFormat,
}

impl LoadedConfig {
    pub fn defaults() -> Self {
        Self {
            preferences: Preferences::default(),
            warnings: Vec::new(),
            format: ConfigFormat::Missing,
        }
    }

    /// Whether saving over the file could destroy content it holds.
    pub fn is_damaged(&self) -> bool {
        self.format == ConfigFormat::Damaged
    }
}

#[derive(Serialize)]
struct ConfigDocument {
    #[serde(rename = "DEFAULT")]
    default: DefaultSection,
    #[serde(rename = "GEOMETRY")]
    geometry: GeometrySection,
}

#[derive(Serialize)]
struct DefaultSection {
    shuffle: bool,
    alway_on_top: bool,
    data_file: String,
    change_interval: f64,
    delay_in_s: f64,
}

#[derive(Serialize)]
struct GeometrySection {
    window_width: u32,
    window_height: u32,
    window_x: i32,
    window_y: i32,
}

/// Render preferences as a TOML document.
pub fn to_toml(preferences: &Preferences) -> Result<String, toml::ser::Error> {
    let document = ConfigDocument {
        default: DefaultSection {
            shuffle: preferences.shuffle,
            alway_on_top: preferences.always_on_top,
            data_file: preferences.data_file.to_string_lossy().into_owned(),
            change_interval: preferences.change_interval_minutes,
            delay_in_s: preferences.reveal_delay_seconds,
        },
        geometry: GeometrySection {
            window_width: preferences.geometry.width,
            window_height: preferences.geometry.height,
            window_x: preferences.geometry.x,
            window_y: preferences.geometry.y,
        },
    };
    toml::to_string_pretty(&document)
}

/// Build preferences from a parsed document.
///
/// Missing keys take their defaults silently; present but unusable keys take
/// their defaults and are reported in [`LoadedConfig::warnings`]. The result
/// is tagged [`ConfigFormat::Toml`]; INI callers retag it.
pub fn from_table(document: &Table) -> LoadedConfig {
    let defaults = Preferences::default();
    let mut warnings = Vec::new();

    let mut section = Section::new(document, DEFAULT_TABLE, &mut warnings);
    let shuffle = section.bool("shuffle", defaults.shuffle);
    let always_on_top = section.bool("alway_on_top", defaults.always_on_top);
    let data_file = section
        .string("data_file")
        .map_or(defaults.data_file.clone(), PathBuf::from);
    let change_interval_minutes =
        section.duration("change_interval", defaults.change_interval_minutes);
    let reveal_delay_seconds = section.duration("delay_in_s", defaults.reveal_delay_seconds);

    let mut section = Section::new(document, GEOMETRY_TABLE, &mut warnings);
    let geometry = Geometry {
        width: section.int("window_width", defaults.geometry.width),
        height: section.int("window_height", defaults.geometry.height),
        x: section.int("window_x", defaults.geometry.x),
        y: section.int("window_y", defaults.geometry.y),
    };

    for warning in &warnings {
        warn!(%warning, "ignoring config value");
    }

    LoadedConfig {
        preferences: Preferences {
            shuffle,
            always_on_top,
            data_file,
            change_interval_minutes,
            reveal_delay_seconds,
            geometry,
            ..defaults
        },
        warnings,
        format: ConfigFormat::Toml,
    }
}

struct Section<'a> {
    name: &'static str,
    table: Option<&'a Table>,
    warnings: &'a mut Vec<ConfigParseError>,
}

impl<'a> Section<'a> {
    fn new(
        document: &'a Table,
        name: &'static str,
        warnings: &'a mut Vec<ConfigParseError>,
    ) -> Self {
        let table = match document.get(name) {
            Some(Value::Table(table)) => Some(table),
            Some(other) => {
                warnings.push(ConfigParseError {
                    table: name,
                    key: "*",
                    value: other.to_string(),
                    expected: "a table",
                });
                None
            }
            None => None,
        };
        Self {
            name,
            table,
            warnings,
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.table.and_then(|table| table.get(key))
    }

    fn reject(&mut self, key: &'static str, value: &Value, expected: &'static str) {
        self.warnings.push(ConfigParseError {
            table: self.name,
            key,
            value: value.to_string(),
            expected,
        });
    }

    fn bool(&mut self, key: &'static str, default: bool) -> bool {
        let Some(value) = self.get(key) else {
            return default;
        };
        let parsed = match value {
            Value::Boolean(b) => Some(*b),
            Value::Integer(0) => Some(false),
            Value::Integer(1) => Some(true),
            Value::String(s) => parse_bool(s),
            _ => None,
        };
        parsed.unwrap_or_else(|| {
            self.reject(key, value, "a boolean");
            default
        })
    }

    fn duration(&mut self, key: &'static str, default: f64) -> f64 {
        let Some(value) = self.get(key) else {
            return default;
        };
        let parsed = match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed.map(|v| validate_duration(key, v)) {
            Some(Ok(v)) => v,
            _ => {
                self.reject(key, value, "a non-negative number");
                default
            }
        }
    }

    fn int<T: TryFrom<i64>>(&mut self, key: &'static str, default: T) -> T {
        let Some(value) = self.get(key) else {
            return default;
        };
        let parsed = match value {
            Value::Integer(i) => Some(*i),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match parsed.and_then(|i| T::try_from(i).ok()) {
            Some(v) => v,
            None => {
                self.reject(key, value, "an integer in range");
                default
            }
        }
    }

    fn string(&mut self, key: &'static str) -> Option<String> {
        let value = self.get(key)?;
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => {
                self.reject(key, value, "a non-empty string");
                None
            }
        }
    }
}

/// The spellings INI readers accept for booleans.
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
