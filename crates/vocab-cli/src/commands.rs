use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};
use vocab_core::{Command, EntryStore, Outcome, Preferences, Session, SystemClock};
use vocab_ingest::load_entries;
use vocab_persistence::{ConfigFormat, ConfigStore};

use vocab_cli::interactive::{LoopIo, normalize_config, run_loop, spawn_stdin_reader};
use vocab_cli::render::{entries_table, render_card};

/// Config store and the preferences read from it.
pub struct Setup {
    pub config: ConfigStore,
    pub preferences: Preferences,
    pub config_format: ConfigFormat,
    pub data_file: PathBuf,
}

pub fn load_setup(config_path: Option<&Path>, data_override: Option<&Path>) -> Result<Setup> {
    let config = ConfigStore::resolve(config_path);
    let loaded = config
        .load()
        .with_context(|| format!("load config {}", config.path().display()))?;
    let config_format = loaded.format;
    let preferences = loaded.preferences;
    let data_file = data_override.map_or_else(|| preferences.data_file.clone(), Path::to_path_buf);
    Ok(Setup {
        config,
        preferences,
        config_format,
        data_file,
    })
}

fn load_store(setup: &Setup) -> Result<EntryStore> {
    load_entries(&setup.data_file)
        .with_context(|| format!("load data file {}", setup.data_file.display()))
}

pub fn run_check(setup: &Setup) -> Result<()> {
    let store = load_store(setup)?;
    println!("{}: {} entries", setup.data_file.display(), store.len());
    println!(
        "config: {} ({:?})",
        setup.config.path().display(),
        setup.config_format
    );
    Ok(())
}

pub fn run_list(setup: &Setup, limit: Option<usize>) -> Result<()> {
    let store = load_store(setup)?;
    println!("{}", entries_table(&store, limit));
    if let Some(limit) = limit.filter(|&limit| limit < store.len()) {
        println!("({} of {} entries shown)", limit, store.len());
    }
    Ok(())
}

pub fn run_show(setup: &Setup, index: i64, json: bool) -> Result<()> {
    let store = load_store(setup)?;
    let preferences = Preferences {
        shuffle: false,
        ..setup.preferences.clone()
    };
    let mut session = Session::start_with_entropy(store, preferences, 0);
    let outcome = session.handle(Command::Goto(index), 0)?;
    let Outcome::Render(snapshot) = outcome else {
        bail!("unexpected outcome for goto: {outcome:?}");
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?
        );
    } else {
        println!("{}", render_card(&snapshot));
    }
    Ok(())
}

pub fn run_interactive(setup: Setup) -> Result<()> {
    let store = load_store(&setup)?;
    let Setup {
        config,
        preferences,
        config_format,
        data_file,
    } = setup;
    let span = info_span!("session", data_file = %data_file.display());
    let _guard = span.enter();

    let clock = SystemClock::new();
    let mut session = Session::start_with_entropy(store, preferences, 0);

    normalize_config(&session, &config, config_format);
    info!(config = %config.path().display(), "starting interactive session");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_loop(
        &mut session,
        &clock,
        LoopIo {
            lines: spawn_stdin_reader(),
            out: &mut out,
            config: Some(&config),
        },
    )
}
