//! One-shot timer queue
//!
//! Deadline bookkeeping for deferred effects. The queue is driven by the
//! runtime's logical clock through `advance`; expired timers are returned
//! once and removed.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Unique identifier for a scheduled timer
    pub struct TimerId;
}

#[derive(Clone, Copy, Debug)]
struct TimerEntry {
    remaining_ms: f32,
}

/// One-shot timers keyed by [`TimerId`].
pub struct TimerQueue {
    timers: SlotMap<TimerId, TimerEntry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
        }
    }

    /// Arm a one-shot timer due after `delay_ms`.
    pub fn schedule(&mut self, delay_ms: u32) -> TimerId {
        self.timers.insert(TimerEntry {
            remaining_ms: delay_ms as f32,
        })
    }

    /// Disarm a timer that has not fired yet.
    pub fn cancel(&mut self, id: TimerId) {
        self.timers.remove(id);
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Advance the clock, removing and returning every timer that came due.
    /// Timers firing in the same advance are ordered soonest-deadline first.
    pub fn advance(&mut self, dt_ms: f32) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (id, entry) in self.timers.iter_mut() {
            entry.remaining_ms -= dt_ms;
            if entry.remaining_ms <= 0.0 {
                fired.push((id, entry.remaining_ms));
            }
        }

        fired.sort_by(|a, b| a.1.total_cmp(&b.1));
        let fired: Vec<TimerId> = fired.into_iter().map(|(id, _)| id).collect();
        for id in &fired {
            self.timers.remove(*id);
            tracing::trace!(?id, "timer fired");
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_at_deadline() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(800);

        assert!(queue.advance(799.0).is_empty());
        assert!(queue.is_pending(id));

        assert_eq!(queue.advance(1.0), vec![id]);
        assert!(!queue.is_pending(id));
        assert!(queue.advance(1000.0).is_empty());
    }

    #[test]
    fn simultaneous_expiry_orders_by_deadline() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(500);
        let early = queue.schedule(100);

        assert_eq!(queue.advance(600.0), vec![early, late]);
    }

    #[test]
    fn canceled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(100);
        queue.cancel(id);
        assert!(queue.advance(1000.0).is_empty());
        assert!(queue.is_empty());
    }
}
