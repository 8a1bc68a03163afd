//! Current-entry tracking and the auto-advance time gate.

use crate::entry::EntryStore;
use crate::error::NavigationError;

/// Position within an [`EntryStore`] plus the time of the last change.
///
/// `current` is `None` only between construction (or [`restart`]) and the
/// first advance.
///
/// [`restart`]: NavigationEngine::restart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationEngine {
    current: Option<usize>,
    last_change_ms: Option<u64>,
}

impl NavigationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn last_change_ms(&self) -> Option<u64> {
        self.last_change_ms
    }

    /// Forget the last change so the next gated advance is honored.
    pub fn clear_timestamp(&mut self) {
        self.last_change_ms = None;
    }

    /// Whether a gated advance at `now_ms` would move.
    pub fn is_due(&self, interval_ms: u64, now_ms: u64) -> bool {
        match self.last_change_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= interval_ms,
        }
    }

    /// Move to the next entry, wrapping to the first.
    ///
    /// Unless `force` is set, this is a no-op returning `None` while fewer
    /// than `interval_ms` have passed since the last change.
    pub fn advance(
        &mut self,
        store: &EntryStore,
        force: bool,
        interval_ms: u64,
        now_ms: u64,
    ) -> Option<usize> {
        if !force && !self.is_due(interval_ms, now_ms) {
            tracing::trace!(
                now_ms,
                last_change_ms = ?self.last_change_ms,
                "advance suppressed by time gate"
            );
            return None;
        }

        let next = match self.current {
            Some(index) if index + 1 < store.len() => index + 1,
            _ => 0,
        };
        self.current = Some(next);
        self.last_change_ms = Some(now_ms);
        Some(next)
    }

    /// Move to the previous entry, wrapping to the last. Never gated.
    ///
    /// Resets the time gate like any other change so a pending auto-advance
    /// cannot immediately step forward again.
    pub fn retreat(&mut self, store: &EntryStore, now_ms: u64) -> usize {
        let prev = match self.current {
            Some(index) if index > 0 => index - 1,
            _ => store.len().saturating_sub(1),
        };
        self.current = Some(prev);
        self.last_change_ms = Some(now_ms);
        prev
    }

    /// Jump to a one-based position and reset the time gate.
    pub fn goto_index(
        &mut self,
        store: &EntryStore,
        one_based: i64,
        now_ms: u64,
    ) -> Result<usize, NavigationError> {
        let len = store.len();
        let index = usize::try_from(one_based)
            .ok()
            .filter(|n| (1..=len).contains(n))
            .map(|n| n - 1)
            .ok_or(NavigationError::OutOfRange {
                requested: one_based,
                len,
            })?;

        self.current = Some(index);
        self.last_change_ms = Some(now_ms);
        Ok(index)
    }

    /// Return to the first entry unconditionally.
    pub fn restart(&mut self, store: &EntryStore, now_ms: u64) -> usize {
        self.current = None;
        // A forced advance from the unset position always lands on 0.
        self.advance(store, true, 0, now_ms).unwrap_or(0)
    }
}
