use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A deferred event, tagged with the epoch it was scheduled in.
#[derive(Debug, Clone)]
pub struct Scheduled<E> {
    pub due_at: u64,
    pub epoch: u64,
    pub event: E,
    seq: u64,
}

impl<E> Scheduled<E> {
    fn key(&self) -> (u64, u64) {
        (self.due_at, self.seq)
    }
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Deferred callbacks, released in timestamp order (FIFO on equal timestamps).
pub struct Scheduler<E> {
    queue: BinaryHeap<Reverse<Scheduled<E>>>,
    next_seq: u64,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, now: u64, delay_ms: u64, epoch: u64, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled {
            due_at: now.saturating_add(delay_ms),
            epoch,
            event,
            seq,
        }));
    }

    /// Next event whose due time is at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Scheduled<E>> {
        match self.queue.peek() {
            Some(Reverse(next)) if next.due_at <= now => self.queue.pop().map(|Reverse(s)| s),
            _ => None,
        }
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_in_timestamp_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 300, 0, "c");
        s.schedule(0, 100, 0, "a");
        s.schedule(50, 100, 0, "b");

        assert!(s.pop_due(99).is_none());
        assert_eq!(s.pop_due(1000).map(|e| e.event), Some("a"));
        assert_eq!(s.pop_due(1000).map(|e| e.event), Some("b"));
        assert_eq!(s.pop_due(1000).map(|e| e.event), Some("c"));
        assert!(s.pop_due(u64::MAX).is_none());
    }

    #[test]
    fn equal_timestamps_are_fifo() {
        let mut s = Scheduler::new();
        s.schedule(0, 10, 0, 1);
        s.schedule(0, 10, 0, 2);
        s.schedule(0, 10, 0, 3);
        let order: Vec<_> = std::iter::from_fn(|| s.pop_due(10)).map(|e| e.event).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn keeps_epoch_tag() {
        let mut s = Scheduler::new();
        s.schedule(0, 0, 4, ());
        let fired = s.pop_due(0).unwrap();
        assert_eq!(fired.epoch, 4);
        assert_eq!(fired.due_at, 0);
    }
}
