//! Answer visibility and the timed reveal protocol.
//!
//! A "next" trigger forces both the word and the meaning visible, then after
//! the reveal delay restores each flag to its persistent toggle and finally
//! asks for a gated advance. Re-triggering cancels every outstanding reveal
//! timer first, so a stale restore can never land on top of a newer reveal.

use serde::{Deserialize, Serialize};

use crate::scheduler::{Scheduler, TimerId};
use crate::session::TimerEvent;

/// Gap between the end of the reveal window and the deferred advance.
pub const ADVANCE_OFFSET_MS: u64 = 100;

/// Where the reveal protocol currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// Both flags off between words.
    Hidden,
    /// Answer forced visible for the reveal window.
    Revealing,
    /// Flags follow the persistent toggles.
    SteadyShown,
}

/// The two independent visibility flags the renderer honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub meaning_visible: bool,
    pub word_visible: bool,
}

/// User-controlled steady-state visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealToggles {
    pub meaning_shown: bool,
    pub word_shown: bool,
}

impl Default for RevealToggles {
    fn default() -> Self {
        Self {
            meaning_shown: false,
            word_shown: true,
        }
    }
}

#[derive(Debug)]
pub struct RevealController {
    toggles: RevealToggles,
    visible: Visibility,
    phase: RevealPhase,
    pending_restores: Vec<TimerId>,
    pending_advance: Option<TimerId>,
}

impl RevealController {
    pub fn new(toggles: RevealToggles) -> Self {
        let visible = Visibility {
            meaning_visible: toggles.meaning_shown,
            word_visible: toggles.word_shown,
        };
        Self {
            toggles,
            visible,
            phase: steady_phase(visible),
            pending_restores: Vec::new(),
            pending_advance: None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visible
    }

    pub fn toggles(&self) -> RevealToggles {
        self.toggles
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Whether any reveal timer is still outstanding.
    pub fn is_pending(&self) -> bool {
        !self.pending_restores.is_empty() || self.pending_advance.is_some()
    }

    /// Start a reveal window of `delay_ms`.
    pub fn trigger(&mut self, scheduler: &mut Scheduler<TimerEvent>, now_ms: u64, delay_ms: u64) {
        let superseded = self.cancel_pending(scheduler);
        if superseded > 0 {
            tracing::debug!(superseded, "reveal retriggered, cancelled stale timers");
        }

        self.visible = Visibility {
            meaning_visible: true,
            word_visible: true,
        };
        self.phase = RevealPhase::Revealing;

        self.pending_restores = vec![
            scheduler.after(now_ms, delay_ms, TimerEvent::RestoreMeaning),
            scheduler.after(now_ms, delay_ms, TimerEvent::RestoreWord),
        ];
        self.pending_advance = Some(scheduler.after(
            now_ms,
            delay_ms.saturating_add(ADVANCE_OFFSET_MS),
            TimerEvent::DeferredAdvance,
        ));
    }

    /// Apply the persistent meaning toggle once its restore timer fires.
    pub fn restore_meaning(&mut self, id: TimerId) {
        self.visible.meaning_visible = self.toggles.meaning_shown;
        self.finish_restore(id);
    }

    /// Apply the persistent word toggle once its restore timer fires.
    pub fn restore_word(&mut self, id: TimerId) {
        self.visible.word_visible = self.toggles.word_shown;
        self.finish_restore(id);
    }

    /// Record that the deferred advance fired.
    pub fn deferred_advance_fired(&mut self, id: TimerId) {
        if self.pending_advance == Some(id) {
            self.pending_advance = None;
        }
    }

    /// Flip the persistent meaning toggle and apply it immediately.
    pub fn toggle_meaning(&mut self) -> bool {
        self.toggles.meaning_shown = !self.toggles.meaning_shown;
        self.visible.meaning_visible = self.toggles.meaning_shown;
        self.settle_if_idle();
        self.toggles.meaning_shown
    }

    /// Flip the persistent word toggle and apply it immediately.
    pub fn toggle_word(&mut self) -> bool {
        self.toggles.word_shown = !self.toggles.word_shown;
        self.visible.word_visible = self.toggles.word_shown;
        self.settle_if_idle();
        self.toggles.word_shown
    }

    /// Cancel outstanding reveal timers, returning how many were live.
    pub fn cancel_pending(&mut self, scheduler: &mut Scheduler<TimerEvent>) -> usize {
        self.pending_restores
            .drain(..)
            .chain(self.pending_advance.take())
            .filter(|id| scheduler.cancel(*id))
            .count()
    }

    fn finish_restore(&mut self, id: TimerId) {
        self.pending_restores.retain(|pending| *pending != id);
        if self.pending_restores.is_empty() {
            self.phase = steady_phase(self.visible);
        }
    }

    fn settle_if_idle(&mut self) {
        if self.phase != RevealPhase::Revealing {
            self.phase = steady_phase(self.visible);
        }
    }
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new(RevealToggles::default())
    }
}

fn steady_phase(visible: Visibility) -> RevealPhase {
    if visible.meaning_visible || visible.word_visible {
        RevealPhase::SteadyShown
    } else {
        RevealPhase::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire(
        controller: &mut RevealController,
        scheduler: &mut Scheduler<TimerEvent>,
        now: u64,
    ) -> Vec<TimerEvent> {
        let mut fired = Vec::new();
        for (id, event) in scheduler.poll_due(now) {
            match event {
                TimerEvent::RestoreMeaning => controller.restore_meaning(id),
                TimerEvent::RestoreWord => controller.restore_word(id),
                TimerEvent::DeferredAdvance => controller.deferred_advance_fired(id),
                TimerEvent::AutoAdvance => {}
            }
            fired.push(event);
        }
        fired
    }

    #[test]
    fn test_initial_state_follows_toggles() {
        let controller = RevealController::default();
        assert_eq!(
            controller.visibility(),
            Visibility {
                meaning_visible: false,
                word_visible: true
            }
        );
        assert_eq!(controller.phase(), RevealPhase::SteadyShown);

        let hidden = RevealController::new(RevealToggles {
            meaning_shown: false,
            word_shown: false,
        });
        assert_eq!(hidden.phase(), RevealPhase::Hidden);
    }

    #[test]
    fn test_trigger_sequence() {
        let mut scheduler = Scheduler::new();
        let mut controller = RevealController::default();

        controller.trigger(&mut scheduler, 0, 500);
        assert_eq!(controller.phase(), RevealPhase::Revealing);
        assert_eq!(
            controller.visibility(),
            Visibility {
                meaning_visible: true,
                word_visible: true
            }
        );

        assert!(fire(&mut controller, &mut scheduler, 499).is_empty());
        assert_eq!(
            fire(&mut controller, &mut scheduler, 500),
            vec![TimerEvent::RestoreMeaning, TimerEvent::RestoreWord]
        );
        assert_eq!(
            controller.visibility(),
            Visibility {
                meaning_visible: false,
                word_visible: true
            }
        );
        assert_eq!(controller.phase(), RevealPhase::SteadyShown);
        assert!(controller.is_pending());

        assert_eq!(
            fire(&mut controller, &mut scheduler, 600),
            vec![TimerEvent::DeferredAdvance]
        );
        assert!(!controller.is_pending());
    }

    #[test]
    fn test_retrigger_cancels_stale_timers() {
        let mut scheduler = Scheduler::new();
        let mut controller = RevealController::default();

        controller.trigger(&mut scheduler, 0, 500);
        controller.trigger(&mut scheduler, 400, 500);
        assert_eq!(scheduler.len(), 3);

        // The first window's restore would have landed at 500.
        assert!(fire(&mut controller, &mut scheduler, 500).is_empty());
        assert_eq!(controller.phase(), RevealPhase::Revealing);
        assert_eq!(fire(&mut controller, &mut scheduler, 900).len(), 2);
        assert_eq!(controller.phase(), RevealPhase::SteadyShown);
    }

    #[test]
    fn test_restore_uses_toggle_at_fire_time() {
        let mut scheduler = Scheduler::new();
        let mut controller = RevealController::default();

        controller.trigger(&mut scheduler, 0, 500);
        assert!(controller.toggle_meaning());
        // Manual toggles apply immediately, even mid-window.
        assert!(controller.visibility().meaning_visible);
        assert_eq!(controller.phase(), RevealPhase::Revealing);

        fire(&mut controller, &mut scheduler, 500);
        assert!(controller.visibility().meaning_visible);
    }

    #[test]
    fn test_toggles_reach_hidden() {
        let mut controller = RevealController::default();
        assert!(!controller.toggle_word());
        assert_eq!(controller.phase(), RevealPhase::Hidden);
        assert!(controller.toggle_meaning());
        assert_eq!(controller.phase(), RevealPhase::SteadyShown);
    }
}
