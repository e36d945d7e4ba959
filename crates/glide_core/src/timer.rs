//! Deadline timer queue
//!
//! Replaces `setTimeout`-style callbacks with plain data: timers carry a
//! payload and are drained in deadline order by whoever owns the queue.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

struct Timer<T> {
    deadline: f64,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    payload: T,
}

/// A set of pending one-shot timers
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule `payload` to fire at `deadline` (milliseconds)
    pub fn schedule(&mut self, deadline: f64, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            deadline,
            seq,
            payload,
        })
    }

    /// Cancel a pending timer, returning its payload if it had not fired
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|t| t.payload)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Deadline of a pending timer
    pub fn deadline(&self, id: TimerId) -> Option<f64> {
        self.timers.get(id).map(|t| t.deadline)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers
            .values()
            .map(|t| t.deadline)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn take_due(&mut self, now: f64) -> SmallVec<[(TimerId, T); 4]> {
        let mut due: SmallVec<[(TimerId, f64, u64); 4]> = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (id, t.deadline, t.seq))
            .collect();

        due.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        due.into_iter()
            .filter_map(|(id, _, _)| self.timers.remove(id).map(|t| (id, t.payload)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_timers_fire_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(300.0, "late");
        queue.schedule(100.0, "early");
        queue.schedule(100.0, "early-second");
        queue.schedule(1000.0, "future");

        let due: Vec<_> = queue.take_due(300.0).into_iter().map(|(_, p)| p).collect();
        assert_eq!(due, vec!["early", "early-second", "late"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(1000.0));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(10.0, 1u32);
        assert!(queue.is_pending(id));
        assert_eq!(queue.deadline(id), Some(10.0));

        assert_eq!(queue.cancel(id), Some(1));
        assert_eq!(queue.cancel(id), None);
        assert!(queue.take_due(100.0).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(16.0, ());
        assert!(queue.take_due(15.9).is_empty());
        assert_eq!(queue.take_due(16.0).len(), 1);
    }
}
