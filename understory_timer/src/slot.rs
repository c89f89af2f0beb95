// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owner-side holder for a single pending timer.

use crate::queue::{TimerHandle, TimerQueue};

/// Holds at most one pending timer on behalf of its owner.
///
/// A component that needs "at most one show timer" keeps a `TimerSlot` for it.
/// [`TimerSlot::start`] cancels whatever the slot held before scheduling the
/// new timer, and [`TimerSlot::cancel`] is safe to call at any time. When the
/// owner is torn down it cancels its slots, so no payload outlives it.
///
/// The slot does not learn on its own that its timer fired; whoever pops the
/// timer from the queue should call [`TimerSlot::release`] with the fired handle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    handle: Option<TimerHandle>,
}

impl TimerSlot {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Cancel the held timer (if any) and schedule a new one.
    pub fn start<T>(
        &mut self,
        queue: &mut TimerQueue<T>,
        now: u64,
        delay: u64,
        payload: T,
    ) -> TimerHandle {
        self.cancel(queue);
        let handle = queue.schedule(now, delay, payload);
        self.handle = Some(handle);
        handle
    }

    /// Cancel the held timer.
    ///
    /// Returns `true` if a pending timer was cancelled.
    pub fn cancel<T>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        self.handle.take().is_some_and(|h| queue.cancel(h))
    }

    /// Returns `true` if the slot holds a timer that is still pending in `queue`.
    pub fn is_pending<T>(&self, queue: &TimerQueue<T>) -> bool {
        self.handle.is_some_and(|h| queue.is_pending(h))
    }

    /// The held handle, if any.
    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    /// Forget the held handle if it is `fired`.
    ///
    /// Returns `true` if the slot held `fired`; a stale or foreign handle leaves
    /// the slot untouched.
    pub fn release(&mut self, fired: TimerHandle) -> bool {
        if self.handle == Some(fired) {
            self.handle = None;
            true
        } else {
            false
        }
    }
}
