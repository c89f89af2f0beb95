// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Timer: cancellable delayed work for single-threaded UI state machines.
//!
//! This crate provides the small scheduling primitives that interaction controllers
//! (hover intent, tooltips, menus) build on, without owning a clock or an event loop:
//!
//! - [`TimerQueue`]: a queue of payloads that become due at a deadline. Payloads are
//!   handed back at most once by [`TimerQueue::pop_due`], and a [`TimerHandle`] can
//!   cancel a pending payload permanently.
//! - [`TimerSlot`]: an owner-side holder for at most one pending timer. Starting a
//!   new timer through a slot cancels the previous one, which is how components keep
//!   "one show timer and one hide timer at a time".
//! - [`Deferred`]: a FIFO of work that should run after the current synchronous block
//!   completes but before any timer fires (the microtask pattern).
//!
//! Time is always passed in explicitly as a `u64` in milliseconds on a host-defined
//! monotonic scale. The host decides when to call [`TimerQueue::pop_due`]; the queue
//! never reads a clock and never invokes callbacks itself. This keeps state machines
//! that use it deterministic and trivially testable.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timer::{TimerQueue, TimerSlot};
//!
//! #[derive(Debug, PartialEq)]
//! enum Action {
//!     Show,
//!     Hide,
//! }
//!
//! let mut queue = TimerQueue::new();
//! let mut slot = TimerSlot::new();
//!
//! // Pointer enters at t=0: show after 200ms.
//! slot.start(&mut queue, 0, 200, Action::Show);
//! // Pointer leaves at t=50: replace the pending show with a hide.
//! slot.start(&mut queue, 50, 150, Action::Hide);
//!
//! assert!(queue.pop_due(199).is_none());
//! let fired = queue.pop_due(200).unwrap();
//! assert_eq!(fired.payload, Action::Hide);
//! assert_eq!(fired.deadline, 200);
//! assert!(slot.release(fired.handle));
//! assert!(queue.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod deferred;
mod queue;
mod slot;

pub use deferred::Deferred;
pub use queue::{Fired, TimerHandle, TimerQueue};
pub use slot::TimerSlot;
