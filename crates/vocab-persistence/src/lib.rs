//! Configuration storage for the vocabulary overlay.
//!
//! Preferences live in a small TOML file with a `[DEFAULT]` and a
//! `[GEOMETRY]` table. Files in INI syntax written by older tools are read
//! too. Loading never fails on bad content: each key or line that cannot be
//! read falls back to its default and is reported as a [`ConfigParseError`].
//! Saving is atomic.
//!
//! # Example
//!
//! ```ignore
//! use vocab_persistence::ConfigStore;
//!
//! let store = ConfigStore::at_default_location();
//! let loaded = store.load()?;
//! store.save(&loaded.preferences)?;
//! ```

mod document;
mod error;
mod ini;
mod store;

// === Error Types ===
pub use error::{ConfigParseError, PersistenceError, Result};

// === Document ===
pub use document::{ConfigFormat, DEFAULT_TABLE, GEOMETRY_TABLE, LoadedConfig, from_table, to_toml};
pub use ini::{IniDocument, parse_ini};

// === Store ===
pub use store::{ConfigStore, platform_config_path};
