//! Deterministic timer queue.
//!
//! Timers carry a value of type `E` instead of a callback. The owner polls
//! for due timers with [`Scheduler::poll_due`] and dispatches the returned
//! events itself, which keeps the engine single-threaded and testable with a
//! manual clock.
//!
//! Ordering: due timers are returned by deadline, then by the order in which
//! they were scheduled. A poll only returns timers that were due when it
//! was called; a recurring timer is re-armed strictly in the future, so
//! dispatching an event can never cause the same poll to loop.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Minimum period of a recurring timer.
pub const MIN_INTERVAL_MS: u64 = 1;

/// Stale heap entries tolerated before [`Scheduler::cancel`] rebuilds the heap.
const COMPACT_SLACK: usize = 16;

/// Cancellation handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<E> {
    deadline_ms: u64,
    interval_ms: Option<u64>,
    event: E,
}

/// Timer queue keyed by deadline.
#[derive(Debug)]
pub struct Scheduler<E> {
    // (deadline, sequence, id); entries whose id is gone from `pending` or
    // whose sequence no longer matches are stale and skipped.
    queue: BinaryHeap<Reverse<(u64, u64, TimerId)>>,
    pending: HashMap<TimerId, (u64, Pending<E>)>,
    next_id: u64,
    next_seq: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            pending: HashMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    /// Fire `event` once, `delay_ms` after `now_ms`.
    pub fn after(&mut self, now_ms: u64, delay_ms: u64, event: E) -> TimerId {
        let id = self.allocate_id();
        self.arm(
            id,
            Pending {
                deadline_ms: now_ms.saturating_add(delay_ms),
                interval_ms: None,
                event,
            },
        );
        id
    }

    /// Fire `event` after `first_delay_ms`, then every `interval_ms`.
    pub fn every(
        &mut self,
        now_ms: u64,
        first_delay_ms: u64,
        interval_ms: u64,
        event: E,
    ) -> TimerId {
        let id = self.allocate_id();
        self.arm(
            id,
            Pending {
                deadline_ms: now_ms.saturating_add(first_delay_ms),
                interval_ms: Some(interval_ms.max(MIN_INTERVAL_MS)),
                event,
            },
        );
        id
    }

    /// Cancel a timer. Returns `false` when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.pending.remove(&id).is_some();
        if self.queue.len() > 2 * self.pending.len() + COMPACT_SLACK {
            self.compact();
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest live deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending
            .values()
            .map(|(_, pending)| pending.deadline_ms)
            .min()
    }

    /// Drop every timer.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending.clear();
    }

    /// Drop heap entries that no longer match a live timer.
    fn compact(&mut self) {
        let pending = &self.pending;
        self.queue.retain(|Reverse((_, seq, id))| {
            matches!(pending.get(id), Some((live, _)) if live == seq)
        });
    }

    fn allocate_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn arm(&mut self, id: TimerId, pending: Pending<E>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((pending.deadline_ms, seq, id)));
        self.pending.insert(id, (seq, pending));
    }
}

impl<E: Clone> Scheduler<E> {
    /// Remove and return every timer due at `now_ms`, in firing order.
    ///
    /// Recurring timers are re-armed at `now_ms + interval` and stay
    /// cancellable through the same [`TimerId`].
    pub fn poll_due(&mut self, now_ms: u64) -> Vec<(TimerId, E)> {
        let mut fired = Vec::new();
        let mut rearm = Vec::new();

        while let Some(Reverse((deadline, seq, id))) = self.queue.peek().copied() {
            if deadline > now_ms {
                break;
            }
            self.queue.pop();

            let live = matches!(self.pending.get(&id), Some((live_seq, _)) if *live_seq == seq);
            if !live {
                continue;
            }
            let Some((_, pending)) = self.pending.remove(&id) else {
                continue;
            };

            fired.push((id, pending.event.clone()));
            if let Some(interval) = pending.interval_ms {
                rearm.push((
                    id,
                    Pending {
                        deadline_ms: now_ms.saturating_add(interval),
                        interval_ms: Some(interval),
                        event: pending.event,
                    },
                ));
            }
        }

        for (id, pending) in rearm {
            self.arm(id, pending);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_fires_once_at_deadline() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.after(0, 500, "restore");

        assert!(scheduler.poll_due(499).is_empty());
        assert_eq!(scheduler.poll_due(500), vec![(id, "restore")]);
        assert!(scheduler.poll_due(10_000).is_empty());
        assert!(!scheduler.is_pending(id));
    }

    #[test]
    fn test_same_deadline_fires_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.after(0, 100, 'b');
        scheduler.after(0, 50, 'a');
        scheduler.after(0, 100, 'c');

        let events: Vec<char> = scheduler.poll_due(100).into_iter().map(|(_, e)| e).collect();
        assert_eq!(events, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.after(0, 10, ());
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.poll_due(100).is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_every_rearms_after_firing() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.every(0, 100, 1_000, "tick");

        assert_eq!(scheduler.poll_due(100), vec![(id, "tick")]);
        assert_eq!(scheduler.next_deadline(), Some(1_100));
        assert!(scheduler.poll_due(1_099).is_empty());
        assert_eq!(scheduler.poll_due(1_100), vec![(id, "tick")]);

        assert!(scheduler.cancel(id));
        assert!(scheduler.poll_due(5_000).is_empty());
    }

    #[test]
    fn test_late_poll_fires_recurring_timer_once() {
        let mut scheduler = Scheduler::new();
        scheduler.every(0, 0, 0, "tick");

        // A zero interval is clamped, and a single poll never loops.
        assert_eq!(scheduler.poll_due(10_000).len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(10_000 + MIN_INTERVAL_MS));
    }

    #[test]
    fn test_next_deadline_ignores_cancelled() {
        let mut scheduler = Scheduler::new();
        let early = scheduler.after(0, 10, 1);
        scheduler.after(0, 20, 2);
        scheduler.cancel(early);
        assert_eq!(scheduler.next_deadline(), Some(20));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_rearming_does_not_grow_queue() {
        let mut scheduler = Scheduler::new();
        let restore = scheduler.after(0, 5_000, "restore");
        let mut auto = scheduler.every(0, 100, 100, "auto");
        for now in 0..1_000 {
            scheduler.cancel(auto);
            auto = scheduler.every(now, 100, 100, "auto");
            assert!(scheduler.queue.len() <= 2 * scheduler.len() + COMPACT_SLACK + 1);
        }

        assert_eq!(scheduler.len(), 2);
        assert!(scheduler.is_pending(restore));
        assert_eq!(scheduler.poll_due(1_099), vec![(auto, "auto")]);
        assert_eq!(scheduler.poll_due(5_000), vec![(auto, "auto"), (restore, "restore")]);
    }
}
