// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer queue.

use alloc::vec::Vec;

/// Handle to a scheduled timer.
///
/// Handles are never reused by the queue that issued them, so a handle kept
/// after its timer fired or was cancelled is simply inert.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// A timer that became due, as returned by [`TimerQueue::pop_due`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle the timer was scheduled under.
    pub handle: TimerHandle,
    /// Time at which the timer was due.
    ///
    /// Consumers should treat this as "now" when acting on the payload so that
    /// results do not depend on how late the host polled the queue.
    pub deadline: u64,
    /// The scheduled payload.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    handle: TimerHandle,
    deadline: u64,
    payload: T,
}

/// Queue of cancellable, deadline-ordered payloads.
///
/// Entries are kept sorted by deadline; entries with equal deadlines stay in
/// scheduling order. The queue is optimized for the handful of concurrent
/// timers an interaction controller keeps alive, not for thousands of entries.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_handle: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Schedule `payload` to become due at `now + delay`.
    ///
    /// A `delay` of zero makes the payload due immediately; it is still only
    /// handed out by the next [`TimerQueue::pop_due`] call.
    pub fn schedule(&mut self, now: u64, delay: u64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let deadline = now.saturating_add(delay);
        // Insert after every entry due at or before `deadline` to keep FIFO order on ties.
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            at,
            Entry {
                handle,
                deadline,
                payload,
            },
        );
        handle
    }

    /// Cancel a pending timer.
    ///
    /// Returns `true` if the timer was pending. Cancelling a timer that already
    /// fired or was already cancelled is a no-op that returns `false`.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `handle` refers to a timer that has neither fired nor been cancelled.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest deadline among pending timers.
    ///
    /// Hosts can use this to arm a single platform timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Remove and return the earliest timer if it is due at `now`.
    ///
    /// Call repeatedly until it returns `None` to fire everything that is due.
    pub fn pop_due(&mut self, now: u64) -> Option<Fired<T>> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let e = self.entries.remove(0);
        Some(Fired {
            handle: e.handle,
            deadline: e.deadline,
            payload: e.payload,
        })
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timer is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(0, 30, 'c');
        q.schedule(0, 10, 'a');
        q.schedule(0, 20, 'b');

        let mut seen = Vec::new();
        while let Some(f) = q.pop_due(100) {
            seen.push((f.deadline, f.payload));
        }
        assert_eq!(seen, vec![(10, 'a'), (20, 'b'), (30, 'c')]);
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(5, 5, 1);
        q.schedule(0, 10, 2);
        q.schedule(10, 0, 3);

        assert_eq!(q.pop_due(10).map(|f| f.payload), Some(1));
        assert_eq!(q.pop_due(10).map(|f| f.payload), Some(2));
        assert_eq!(q.pop_due(10).map(|f| f.payload), Some(3));
        assert!(q.pop_due(10).is_none());
    }

    #[test]
    fn not_due_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(100, 50, ());
        assert!(q.pop_due(149).is_none());
        assert_eq!(q.next_deadline(), Some(150));
        assert!(q.pop_due(150).is_some());
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn cancel_is_idempotent_and_permanent() {
        let mut q = TimerQueue::new();
        let h = q.schedule(0, 10, "x");
        assert!(q.is_pending(h));
        assert!(q.cancel(h));
        assert!(!q.cancel(h));
        assert!(!q.is_pending(h));
        assert!(q.pop_due(1_000).is_none());
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let mut q = TimerQueue::new();
        let h = q.schedule(0, 0, 7);
        let fired = q.pop_due(0).unwrap();
        assert_eq!(fired.handle, h);
        assert!(!q.cancel(h));
    }

    #[test]
    fn handles_are_not_reused() {
        let mut q = TimerQueue::new();
        let a = q.schedule(0, 0, ());
        q.pop_due(0);
        let b = q.schedule(0, 0, ());
        assert_ne!(a, b);
        assert!(!q.is_pending(a));
        assert!(q.is_pending(b));
    }

    #[test]
    fn deadline_saturates() {
        let mut q = TimerQueue::new();
        q.schedule(u64::MAX - 1, 10, ());
        assert_eq!(q.next_deadline(), Some(u64::MAX));
        assert!(q.pop_due(u64::MAX).is_some());
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        let h = q.schedule(0, 1, ());
        q.schedule(0, 2, ());
        q.clear();
        assert!(q.is_empty());
        assert!(!q.is_pending(h));
    }
}
