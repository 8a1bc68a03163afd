//! CLI argument definitions for the vocabulary overlay.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vocab-overlay",
    version,
    about = "Vocabulary flashcards with timed reveal",
    long_about = "Cycle through a 'word|phonetic|meaning' vocabulary file.\n\n\
                  Cards advance on a timer; 'next' briefly reveals the meaning\n\
                  before moving on. Preferences are kept in a TOML config file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (default: platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Data file (overrides `data_file` from the config).
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the interactive flashcard loop (default).
    Run,

    /// Load and validate the data file.
    Check,

    /// Print the entries as a table.
    List {
        /// Show at most this many entries.
        #[arg(long = "limit", value_name = "N")]
        limit: Option<usize>,
    },

    /// Print the card for one entry.
    Show {
        /// One-based entry number.
        #[arg(value_name = "INDEX", allow_negative_numbers = true)]
        index: i64,

        /// Print the snapshot as JSON.
        #[arg(long = "json")]
        json: bool,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
