// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! FIFO of work deferred past the current synchronous block.

use alloc::collections::VecDeque;

/// Queue of deferred tasks.
///
/// Use this for work that must not run re-entrantly inside a state-change
/// notification, but must run before the next timer or frame. The host (or the
/// controller that owns the queue) drains it once the current operation returns:
///
/// ```rust
/// use understory_timer::Deferred;
///
/// let mut deferred = Deferred::new();
/// deferred.defer("create overlay");
/// deferred.defer("focus content");
///
/// let mut ran = Vec::new();
/// while let Some(task) = deferred.pop() {
///     ran.push(task);
/// }
/// assert_eq!(ran, ["create overlay", "focus content"]);
/// ```
///
/// Tasks deferred while draining are appended and picked up by the same loop.
#[derive(Clone, Debug)]
pub struct Deferred<T> {
    tasks: VecDeque<T>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deferred<T> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Queue a task behind every task already deferred.
    pub fn defer(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    /// Take the oldest deferred task.
    pub fn pop(&mut self) -> Option<T> {
        self.tasks.pop_front()
    }

    /// Number of deferred tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if nothing is deferred.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
