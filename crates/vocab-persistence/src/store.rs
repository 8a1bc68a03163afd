//! Config file location, loading and atomic saving.
//!
//! The default location is the platform configuration folder:
//! - macOS: ~/Library/Application Support/com.vocab-overlay.Vocab Overlay/
//! - Windows: %APPDATA%/vocab-overlay/Vocab Overlay/config/
//! - Linux: ~/.config/vocaboverlay/

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use toml::Table;
use tracing::{debug, info, warn};
use vocab_core::Preferences;

use crate::document::{ConfigFormat, LoadedConfig, from_table, to_toml};
use crate::error::{PersistenceError, Result};
use crate::ini::{IniDocument, parse_ini};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "vocab-overlay";
const APP_NAME: &str = "Vocab Overlay";
const CONFIG_FILENAME: &str = "vocabulary.toml";

/// Get the platform-specific config file path.
///
/// Returns `None` if the platform directory cannot be determined.
pub fn platform_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Reads and writes the preferences file at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config folder, or `vocabulary.toml` in the
    /// working directory when there is none.
    pub fn at_default_location() -> Self {
        match platform_config_path() {
            Some(path) => Self::new(path),
            None => {
                warn!("could not determine config directory, using working directory");
                Self::new(CONFIG_FILENAME)
            }
        }
    }

    /// Use `explicit` when given, otherwise the default location.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        explicit.map_or_else(Self::at_default_location, Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences.
    ///
    /// A missing file yields defaults. A file that is not TOML is read as
    /// INI, keeping every key that can be interpreted; see
    /// [`LoadedConfig::format`]. Only read failures other than "not found"
    /// are errors.
    pub fn load(&self) -> Result<LoadedConfig> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no config file found, using defaults");
                return Ok(LoadedConfig::defaults());
            }
            Err(e) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let loaded = match toml::from_str::<Table>(&content) {
            Ok(table) => from_table(&table),
            Err(e) => {
                debug!(
                    path = %self.path.display(),
                    error = %e,
                    "config is not TOML, reading as INI"
                );
                self.load_ini(&content)
            }
        };

        info!(
            path = %self.path.display(),
            format = ?loaded.format,
            warnings = loaded.warnings.len(),
            "loaded config"
        );
        Ok(loaded)
    }

    fn load_ini(&self, content: &str) -> LoadedConfig {
        let IniDocument { table, errors } = parse_ini(content);
        for error in &errors {
            warn!(path = %self.path.display(), %error, "unreadable config line");
        }

        let format = if errors.is_empty() {
            ConfigFormat::Ini
        } else {
            ConfigFormat::Damaged
        };
        let loaded = from_table(&table);
        let mut warnings = errors;
        warnings.extend(loaded.warnings);
        LoadedConfig {
            warnings,
            format,
            ..loaded
        }
    }

    /// Where [`ConfigStore::backup`] copies the file.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from(CONFIG_FILENAME), OsString::from);
        name.push(".bak");
        self.path.with_file_name(name)
    }

    /// Copy the current file next to itself with a `.bak` suffix.
    pub fn backup(&self) -> Result<PathBuf> {
        let backup_path = self.backup_path();
        fs::copy(&self.path, &backup_path).map_err(|e| PersistenceError::Io {
            operation: "back up",
            path: self.path.clone(),
            source: e,
        })?;
        info!(backup = %backup_path.display(), "backed up config");
        Ok(backup_path)
    }

    /// Save preferences.
    ///
    /// Uses atomic write (temp file + rename) so a crash never leaves a
    /// half-written config behind.
    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        let content =
            to_toml(preferences).map_err(|source| PersistenceError::Serialization { source })?;

        let path = self.path.as_path();
        let temp_path = path.with_extension("toml.tmp");

        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(content.as_bytes()).map_err(|e| PersistenceError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_platform_path_file_name() {
        if let Some(path) = platform_config_path() {
            assert!(path.ends_with(CONFIG_FILENAME));
        }
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let store = ConfigStore::resolve(Some(Path::new("custom.toml")));
        assert_eq!(store.path(), Path::new("custom.toml"));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("absent.toml"));
        assert_eq!(store.load().unwrap(), LoadedConfig::defaults());
    }

    #[test]
    fn test_backup_copies_file() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("vocabulary.toml"));
        fs::write(store.path(), "[DEFAULT\n").unwrap();

        let backup = store.backup().unwrap();
        assert_eq!(backup, dir.path().join("vocabulary.toml.bak"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "[DEFAULT\n");
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("vocabulary.toml");
        let store = ConfigStore::new(&path);

        store.save(&Preferences::default()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
