//! Integration tests for the interactive loop and card rendering.

use std::fs;

use crossbeam_channel::unbounded;
use tempfile::tempdir;
use vocab_cli::input::HELP;
use vocab_cli::interactive::{LoopIo, normalize_config, run_loop};
use vocab_cli::render::{entries_table, render_card};
use vocab_core::{EntryStore, Preferences, Session, SystemClock};
use vocab_persistence::{ConfigFormat, ConfigStore};

fn session(lines: &[&str]) -> Session {
    let store = EntryStore::load(lines).unwrap();
    Session::start_with_entropy(store, Preferences::default(), 0)
}

fn run(session: &mut Session, input: &[&str], config: Option<&ConfigStore>) -> String {
    let (sender, receiver) = unbounded();
    for line in input {
        sender.send((*line).to_string()).unwrap();
    }
    drop(sender);

    let mut out = Vec::new();
    run_loop(
        session,
        &SystemClock::new(),
        LoopIo {
            lines: receiver,
            out: &mut out,
            config,
        },
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn card_hides_meaning_until_toggled() {
    let session = session(&["猫|neko|cat"]);
    insta::assert_snapshot!(render_card(&session.snapshot()), @r"
    [1/1] neko  (auto)
      猫
      ···
    ");
}

#[test]
fn commands_are_applied_in_order() {
    let mut session = session(&["a|pa|ma", "b|pb|mb", "c|pc|mc"]);
    let output = run(&mut session, &["g 3", "m", "zz", "h", "q"], None);

    assert!(output.contains("[3/3] pc  (auto)\n  c\n  ···"));
    assert!(output.contains("[3/3] pc  (auto)\n  c\n  mc"));
    assert!(output.contains("unknown command 'zz'"));
    assert!(output.contains(HELP));
    assert_eq!(session.current_index(), Some(2));
}

#[test]
fn out_of_range_goto_is_reported_and_ignored() {
    let mut session = session(&["a|pa|ma", "b|pb|mb"]);
    let output = run(&mut session, &["g 9"], None);

    assert!(output.contains("index 9 is out of range (valid: 1..=2)"));
    assert_eq!(session.current_index(), Some(0));
}

#[test]
fn persisting_commands_write_config() {
    let dir = tempdir().unwrap();
    let config = ConfigStore::new(dir.path().join("vocabulary.toml"));
    let mut session = session(&["a|pa|ma"]);

    let output = run(&mut session, &["t", "move 640 120 5 -5", "q"], Some(&config));
    assert!(output.contains("always-on-top on"));

    let saved = config.load().unwrap().preferences;
    assert!(saved.always_on_top);
    assert_eq!(saved.geometry.geometry_string(), "640x120+5-5");
}

#[test]
fn copy_prints_text() {
    let mut session = session(&["|neko|cat"]);
    let output = run(&mut session, &["cw"], None);
    assert!(output.contains("copied: neko"));
}

#[test]
fn list_table_respects_limit() {
    let store = EntryStore::load(["a|pa|ma", "b|pb|mb", "c|pc|mc"]).unwrap();
    let rendered = entries_table(&store, Some(2)).to_string();

    assert!(rendered.contains("pb"));
    assert!(!rendered.contains("pc"));
}

#[test]
fn damaged_config_survives_startup() {
    let dir = tempdir().unwrap();
    let config = ConfigStore::new(dir.path().join("vocabulary.toml"));
    let original = "[GEOMETRY\nwindow_width = 640\n";
    fs::write(config.path(), original).unwrap();

    let loaded = config.load().unwrap();
    assert_eq!(loaded.format, ConfigFormat::Damaged);
    let store = EntryStore::load(["a|pa|ma"]).unwrap();
    let session = Session::start_with_entropy(store, loaded.preferences, 0);

    assert!(!normalize_config(&session, &config, loaded.format));
    assert_eq!(fs::read_to_string(config.path()).unwrap(), original);
    assert_eq!(fs::read_to_string(config.backup_path()).unwrap(), original);
}

#[test]
fn configparser_config_is_rewritten_as_toml_with_its_values() {
    let dir = tempdir().unwrap();
    let config = ConfigStore::new(dir.path().join("vocabulary.toml"));
    fs::write(
        config.path(),
        "[DEFAULT]\ndata_file = n2.txt\n\n[GEOMETRY]\nwindow_width = 640\n",
    )
    .unwrap();

    let loaded = config.load().unwrap();
    let format = loaded.format;
    assert_eq!(format, ConfigFormat::Ini);
    let store = EntryStore::load(["a|pa|ma"]).unwrap();
    let session = Session::start_with_entropy(store, loaded.preferences, 0);

    assert!(normalize_config(&session, &config, format));
    let reloaded = config.load().unwrap();
    assert_eq!(reloaded.format, ConfigFormat::Toml);
    assert_eq!(reloaded.preferences.geometry.width, 640);
    assert_eq!(reloaded.preferences.data_file.to_str(), Some("n2.txt"));
    assert!(!config.backup_path().exists());
}
