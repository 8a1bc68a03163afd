//! The interactive loop: stdin commands and session timers on one thread.
//!
//! A helper thread forwards stdin lines over a channel. The loop waits on
//! that channel until the session's next timer deadline, so commands and
//! timer ticks are handled in order without polling.

use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};
use tracing::{debug, error, info, warn};
use vocab_core::{Clock, Outcome, Session, SystemClock, TickResult};
use vocab_persistence::{ConfigFormat, ConfigStore};

use crate::input::{HELP, Input, parse_line};
use crate::render::{render_card, render_outcome};

/// Spawn a thread that forwards stdin lines until EOF.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = unbounded();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "stopped reading stdin");
                    break;
                }
            }
        }
    });
    receiver
}

/// Event source and sink for [`run_loop`].
pub struct LoopIo<'a, W: Write> {
    pub lines: Receiver<String>,
    pub out: &'a mut W,
    /// Where to write preferences when a command asks for it.
    pub config: Option<&'a ConfigStore>,
}

/// Drive `session` until `q` or the input channel closes.
pub fn run_loop<W: Write>(
    session: &mut Session,
    clock: &SystemClock,
    endpoints: LoopIo<'_, W>,
) -> Result<()> {
    let LoopIo { lines, out, config } = endpoints;
    writeln!(out, "{}", render_card(&session.snapshot())).context("write card")?;

    loop {
        let received = match session.next_deadline() {
            Some(deadline) => lines.recv_deadline(clock.instant_at(deadline)),
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                if !handle_line(session, clock, &line, out, config)? {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if session.tick(clock.now_ms()) == TickResult::RenderRequested {
                    writeln!(out, "{}", render_card(&session.snapshot()))
                        .context("write card")?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                debug!("input closed");
                break;
            }
        }
    }

    info!("session ended");
    Ok(())
}

/// Returns `false` when the loop should stop.
fn handle_line<W: Write>(
    session: &mut Session,
    clock: &SystemClock,
    line: &str,
    out: &mut W,
    config: Option<&ConfigStore>,
) -> Result<bool> {
    let command = match parse_line(line) {
        Ok(Input::Command(command)) => command,
        Ok(Input::Help) => {
            writeln!(out, "{HELP}").context("write help")?;
            return Ok(true);
        }
        Err(e) => {
            writeln!(out, "{e}").context("write error")?;
            return Ok(true);
        }
    };

    let outcome = match session.handle(command, clock.now_ms()) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, "command rejected");
            writeln!(out, "{e}").context("write error")?;
            return Ok(true);
        }
    };

    if outcome.should_persist() {
        save_preferences(session, config);
    }
    if matches!(outcome, Outcome::Exit) {
        return Ok(false);
    }
    if let Some(text) = render_outcome(&outcome) {
        writeln!(out, "{text}").context("write outcome")?;
    }
    Ok(true)
}

/// Write the session's preferences. Failures are logged, not fatal.
pub fn save_preferences(session: &Session, config: Option<&ConfigStore>) {
    let Some(config) = config else {
        return;
    };
    if let Err(e) = config.save(session.preferences()) {
        let suggestion = e.suggestion().unwrap_or_default();
        error!(error = %e, %suggestion, "{}", e.user_message());
    }
}

/// Rewrite the config at startup so it holds every key in TOML form.
///
/// A [`ConfigFormat::Damaged`] file is backed up and left untouched, since
/// rewriting it would drop whatever could not be read. Returns whether the
/// file was rewritten.
pub fn normalize_config(session: &Session, config: &ConfigStore, format: ConfigFormat) -> bool {
    if format == ConfigFormat::Damaged {
        match config.backup() {
            Ok(backup) => warn!(
                config = %config.path().display(),
                backup = %backup.display(),
                "config file has unreadable lines, not rewriting it at startup"
            ),
            Err(e) => error!(error = %e, "{}", e.user_message()),
        }
        return false;
    }
    save_preferences(session, Some(config));
    true
}
