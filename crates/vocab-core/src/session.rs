//! The flashcard session: entries, position, visibility and timers in one
//! state object that front ends drive with commands and clock ticks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::command::{Command, Outcome};
use crate::entry::{EntryStore, VocabEntry};
use crate::error::Result;
use crate::navigation::NavigationEngine;
use crate::preferences::{AUTO_ADVANCE_FIRST_DELAY_MS, Preferences};
use crate::reveal::{RevealController, RevealPhase, RevealToggles};
use crate::scheduler::{Scheduler, TimerId};
use crate::snapshot::Snapshot;

/// Events carried by the session's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Recurring auto-advance loop.
    AutoAdvance,
    RestoreMeaning,
    RestoreWord,
    /// Gated advance at the end of a reveal window.
    DeferredAdvance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

pub struct Session<R = StdRng> {
    store: EntryStore,
    navigation: NavigationEngine,
    reveal: RevealController,
    preferences: Preferences,
    scheduler: Scheduler<TimerEvent>,
    auto_timer: Option<TimerId>,
    rng: R,
}

impl Session<StdRng> {
    /// Start a session shuffled from OS entropy.
    pub fn start_with_entropy(store: EntryStore, preferences: Preferences, now_ms: u64) -> Self {
        Self::start(store, preferences, StdRng::from_os_rng(), now_ms)
    }
}

impl<R: Rng> Session<R> {
    /// Display the first entry (shuffling first when the preference asks for
    /// it) and arm the auto-advance loop.
    pub fn start(store: EntryStore, preferences: Preferences, rng: R, now_ms: u64) -> Self {
        let mut session = Self {
            store,
            navigation: NavigationEngine::new(),
            reveal: RevealController::new(RevealToggles::default()),
            preferences,
            scheduler: Scheduler::new(),
            auto_timer: None,
            rng,
        };

        if session.preferences.shuffle {
            session.store.shuffle(&mut session.rng);
        }
        session.navigation.restart(&session.store, now_ms);
        session.arm_auto_advance(now_ms);

        tracing::info!(
            entries = session.store.len(),
            shuffle = session.preferences.shuffle,
            interval_ms = session.preferences.change_interval_ms(),
            "session started"
        );
        session
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn current_index(&self) -> Option<usize> {
        self.navigation.current()
    }

    pub fn current_entry(&self) -> Option<&VocabEntry> {
        self.navigation.current().and_then(|i| self.store.get(i))
    }

    pub fn reveal_phase(&self) -> RevealPhase {
        self.reveal.phase()
    }

    /// Earliest pending timer deadline; front ends sleep until then.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.navigation.current().unwrap_or(0),
            self.store.len(),
            self.current_entry(),
            self.reveal.visibility(),
            self.reveal.phase(),
            self.preferences.auto_next,
        )
    }

    /// Apply a user command.
    ///
    /// Errors leave the session unchanged.
    pub fn handle(&mut self, command: Command, now_ms: u64) -> Result<Outcome> {
        tracing::debug!(command = command.name(), now_ms, "handling command");

        match command {
            Command::Shuffle => {
                self.store.shuffle(&mut self.rng);
                self.navigation.clear_timestamp();
                self.navigation.restart(&self.store, now_ms);
            }
            Command::ToggleAutoNext => {
                self.preferences.auto_next = !self.preferences.auto_next;
                tracing::info!(auto_next = self.preferences.auto_next, "auto-next toggled");
            }
            Command::Next => {
                self.navigation.clear_timestamp();
                let delay_ms = self.preferences.reveal_delay_ms();
                self.reveal.trigger(&mut self.scheduler, now_ms, delay_ms);
            }
            Command::NextNow => {
                let interval_ms = self.preferences.change_interval_ms();
                self.navigation
                    .advance(&self.store, true, interval_ms, now_ms);
            }
            Command::Prev => {
                self.navigation.retreat(&self.store, now_ms);
            }
            Command::Goto(index) => {
                self.navigation.goto_index(&self.store, index, now_ms)?;
            }
            Command::Restart => {
                self.navigation.restart(&self.store, now_ms);
            }
            Command::ToggleMeaning => {
                self.reveal.toggle_meaning();
            }
            Command::ToggleWord => {
                self.reveal.toggle_word();
            }
            Command::ToggleAlwaysOnTop => {
                self.preferences.always_on_top = !self.preferences.always_on_top;
                return Ok(self.window_outcome(true));
            }
            Command::ToggleBorder => {
                self.preferences.window.border_visible = !self.preferences.window.border_visible;
                return Ok(self.window_outcome(false));
            }
            Command::ToggleTransparency => {
                self.preferences.window.transparent = !self.preferences.window.transparent;
                return Ok(self.window_outcome(false));
            }
            Command::ChangeColor(color) => {
                let color = color.trim();
                self.preferences.window.text_color =
                    (!color.is_empty()).then(|| color.to_string());
                return Ok(self.window_outcome(false));
            }
            Command::CopyWord => {
                let text = self.snapshot().word;
                return Ok(Outcome::Clipboard(text));
            }
            Command::CopyPhonetic => {
                let text = self.snapshot().phonetic;
                return Ok(Outcome::Clipboard(text));
            }
            Command::SetGeometry(geometry) => {
                self.preferences.geometry = geometry;
                return Ok(Outcome::Preferences { persist: true });
            }
            Command::SetChangeInterval(minutes) => {
                self.preferences.set_change_interval_minutes(minutes)?;
                self.arm_auto_advance(now_ms);
                return Ok(Outcome::Preferences { persist: true });
            }
            Command::SetRevealDelay(seconds) => {
                self.preferences.set_reveal_delay_seconds(seconds)?;
                return Ok(Outcome::Preferences { persist: true });
            }
            Command::Exit => {
                self.reveal.cancel_pending(&mut self.scheduler);
                self.scheduler.clear();
                self.auto_timer = None;
                return Ok(Outcome::Exit);
            }
        }

        Ok(Outcome::Render(self.snapshot()))
    }

    /// Fire every timer due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let mut changed = false;

        for (id, event) in self.scheduler.poll_due(now_ms) {
            match event {
                TimerEvent::AutoAdvance => {
                    // An active reveal window owns the next advance.
                    if self.preferences.auto_next && !self.reveal.is_pending() {
                        changed |= self.gated_advance(now_ms);
                    }
                }
                TimerEvent::RestoreMeaning => {
                    self.reveal.restore_meaning(id);
                    changed = true;
                }
                TimerEvent::RestoreWord => {
                    self.reveal.restore_word(id);
                    changed = true;
                }
                TimerEvent::DeferredAdvance => {
                    self.reveal.deferred_advance_fired(id);
                    changed |= self.gated_advance(now_ms);
                }
            }
        }

        if changed {
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    fn gated_advance(&mut self, now_ms: u64) -> bool {
        let interval_ms = self.preferences.change_interval_ms();
        match self
            .navigation
            .advance(&self.store, false, interval_ms, now_ms)
        {
            Some(index) => {
                tracing::debug!(index, now_ms, "advanced");
                true
            }
            None => false,
        }
    }

    /// (Re)start the auto-advance loop with the current interval.
    fn arm_auto_advance(&mut self, now_ms: u64) {
        if let Some(id) = self.auto_timer.take() {
            self.scheduler.cancel(id);
        }
        self.auto_timer = Some(self.scheduler.every(
            now_ms,
            AUTO_ADVANCE_FIRST_DELAY_MS,
            self.preferences.auto_advance_period_ms(),
            TimerEvent::AutoAdvance,
        ));
    }

    fn window_outcome(&self, persist: bool) -> Outcome {
        Outcome::Window {
            style: self.preferences.window.clone(),
            always_on_top: self.preferences.always_on_top,
            persist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(n: usize) -> Session {
        let lines: Vec<String> = (0..n).map(|i| format!("w{i}|p{i}|m{i}")).collect();
        let store = EntryStore::load(&lines).unwrap();
        Session::start(
            store,
            Preferences::default(),
            StdRng::seed_from_u64(1),
            0,
        )
    }

    #[test]
    fn test_start_shows_first_entry() {
        let session = session(3);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.position_label, "1/3");
        assert_eq!(snapshot.word, "w0");
        assert!(!snapshot.meaning_visible);
        assert!(snapshot.word_visible);
        assert_eq!(session.next_deadline(), Some(AUTO_ADVANCE_FIRST_DELAY_MS));
    }

    #[test]
    fn test_auto_advance_respects_gate() {
        let mut s = session(3);
        assert_eq!(s.tick(100), TickResult::NoRender);
        assert_eq!(s.current_index(), Some(0));

        // Loop period is one minute, re-armed from the first firing.
        assert_eq!(s.next_deadline(), Some(60_100));
        assert_eq!(s.tick(60_100), TickResult::RenderRequested);
        assert_eq!(s.current_index(), Some(1));
    }

    #[test]
    fn test_auto_advance_disabled() {
        let mut s = session(3);
        s.handle(Command::ToggleAutoNext, 0).unwrap();
        assert_eq!(s.tick(60_100), TickResult::NoRender);
        assert_eq!(s.current_index(), Some(0));
    }

    #[test]
    fn test_exit_clears_timers() {
        let mut s = session(2);
        s.handle(Command::Next, 10).unwrap();
        assert_eq!(s.handle(Command::Exit, 20).unwrap(), Outcome::Exit);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_goto_error_leaves_state() {
        let mut s = session(2);
        let before = s.snapshot();
        assert!(s.handle(Command::Goto(3), 5).is_err());
        assert_eq!(s.snapshot(), before);
    }
}
