//! Save/load behavior of the config store on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;
use vocab_core::{Geometry, Preferences};
use vocab_persistence::{ConfigFormat, ConfigStore, GEOMETRY_TABLE};

#[test]
fn preferences_survive_save_and_load() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("vocabulary.toml"));

    let preferences = Preferences {
        shuffle: true,
        always_on_top: true,
        data_file: PathBuf::from("n2.txt"),
        change_interval_minutes: 0.75,
        reveal_delay_seconds: 1.25,
        geometry: Geometry {
            width: 512,
            height: 97,
            x: -1920,
            y: 1080,
        },
        ..Preferences::default()
    };
    store.save(&preferences).unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.preferences, preferences);
}

#[test]
fn session_only_state_is_not_persisted() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("vocabulary.toml"));

    let mut preferences = Preferences::default();
    preferences.auto_next = false;
    preferences.window.border_visible = true;
    store.save(&preferences).unwrap();

    let loaded = store.load().unwrap().preferences;
    assert!(loaded.auto_next);
    assert!(!loaded.window.border_visible);
}

#[test]
fn ini_era_file_loads_with_per_key_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocabulary.toml");
    fs::write(
        &path,
        r#"
[DEFAULT]
shuffle = "False"
alway_on_top = "True"
data_file = "tuvungn3.txt"
change_interval = "1"
delay_in_s = "soon"

[GEOMETRY]
window_width = "300"
window_height = "200"
window_x = "800"
window_y = "ten"
"#,
    )
    .unwrap();

    let loaded = ConfigStore::new(&path).load().unwrap();
    assert_eq!(loaded.warnings.len(), 2);
    assert_eq!(loaded.warnings[1].table, GEOMETRY_TABLE);

    let preferences = loaded.preferences;
    assert!(preferences.always_on_top);
    assert_eq!(preferences.change_interval_minutes, 1.0);
    assert_eq!(preferences.reveal_delay_seconds, 0.5);
    assert_eq!(preferences.geometry.y, 10);
}

#[test]
fn configparser_file_keeps_every_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocabulary.toml");
    // Exactly what Python's configparser writes.
    fs::write(
        &path,
        "[DEFAULT]\n\
         shuffle = False\n\
         alway_on_top = True\n\
         data_file = n2.txt\n\
         change_interval = 1.5\n\
         delay_in_s = 0.5\n\
         \n\
         [GEOMETRY]\n\
         window_width = 640\n\
         window_height = 220\n\
         window_x = 812\n\
         window_y = -4\n\
         \n",
    )
    .unwrap();

    let loaded = ConfigStore::new(&path).load().unwrap();
    assert_eq!(loaded.format, ConfigFormat::Ini);
    assert!(loaded.warnings.is_empty());

    let preferences = loaded.preferences;
    assert!(!preferences.shuffle);
    assert!(preferences.always_on_top);
    assert_eq!(preferences.data_file, PathBuf::from("n2.txt"));
    assert_eq!(preferences.change_interval_minutes, 1.5);
    assert_eq!(preferences.geometry.geometry_string(), "640x220+812-4");
}

#[test]
fn configparser_file_with_bad_value_falls_back_per_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocabulary.toml");
    fs::write(
        &path,
        "[DEFAULT]\nshuffle = sometimes\n\n[GEOMETRY]\nwindow_width = 640\n",
    )
    .unwrap();

    let loaded = ConfigStore::new(&path).load().unwrap();
    assert_eq!(loaded.format, ConfigFormat::Ini);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].key, "shuffle");
    assert_eq!(loaded.preferences.geometry.width, 640);
}

#[test]
fn unparsable_file_is_flagged_with_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocabulary.toml");
    fs::write(&path, "[DEFAULT\nshuffle = ").unwrap();

    let loaded = ConfigStore::new(&path).load().unwrap();
    assert!(loaded.is_damaged());
    assert_eq!(loaded.warnings.len(), 2);
    assert_eq!(loaded.preferences, Preferences::default());
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocabulary.toml");
    fs::write(&path, "garbage").unwrap();

    let store = ConfigStore::new(&path);
    store.save(&Preferences::default()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[GEOMETRY]"));
    assert_eq!(store.load().unwrap().preferences, Preferences::default());
}
