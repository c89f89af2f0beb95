// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger state: hover-intent timers, cooldown, and the keyboard protocol.
//!
//! Triggers own their show and hide timers through [`TimerSlot`]s. Starting
//! one always cancels the other, so at most one of them is pending. The
//! controller in [`crate::NavigationMenu`] drives the state; this module only
//! holds it and maps keys to intents.

use alloc::string::String;

use kurbo::Rect;
use understory_timer::{TimerQueue, TimerSlot};

use crate::types::{Key, Orientation};

/// What a key press on a trigger asks the controller to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    /// Close if this item is open, otherwise open it and move focus inside.
    Toggle,
    /// Open if closed, then move focus to the first content item.
    OpenAndFocus,
    /// Close if this item is open.
    Close,
    /// Close the trigger's menu; focus stays on the trigger.
    Dismiss,
}

/// Map a key to the trigger's intent for a menu laid out along `orientation`.
///
/// Returns `None` for keys that belong to sibling navigation; those must be
/// left unprevented for the roving-focus collaborator.
///
/// ```rust
/// use understory_navigation_menu::{Key, KeyIntent, Orientation, key_intent};
///
/// assert_eq!(key_intent(Orientation::Horizontal, Key::ArrowDown), Some(KeyIntent::OpenAndFocus));
/// assert_eq!(key_intent(Orientation::Vertical, Key::ArrowDown), None);
/// assert_eq!(key_intent(Orientation::Vertical, Key::ArrowRight), Some(KeyIntent::OpenAndFocus));
/// ```
pub fn key_intent(orientation: Orientation, key: Key) -> Option<KeyIntent> {
    match (key, orientation) {
        (Key::Enter | Key::Space, _) => Some(KeyIntent::Toggle),
        (Key::Escape, _) => Some(KeyIntent::Dismiss),
        (Key::ArrowDown, Orientation::Horizontal) | (Key::ArrowRight, Orientation::Vertical) => {
            Some(KeyIntent::OpenAndFocus)
        }
        (Key::ArrowUp, Orientation::Horizontal) | (Key::ArrowLeft, Orientation::Vertical) => {
            Some(KeyIntent::Close)
        }
        _ => None,
    }
}

/// Per-trigger state held by the controller.
#[derive(Clone, Debug)]
pub(crate) struct TriggerState {
    pub(crate) id: String,
    pub(crate) disabled: bool,
    /// Id of the content this trigger controls, once registered.
    pub(crate) content_id: Option<String>,
    pub(crate) show_timer: TimerSlot,
    pub(crate) hide_timer: TimerSlot,
    /// End of the window in which siblings skip their show delay.
    pub(crate) cooldown_deadline: Option<u64>,
    pub(crate) bounds: Rect,
}

impl TriggerState {
    pub(crate) fn new(id: String, disabled: bool, bounds: Rect) -> Self {
        Self {
            id,
            disabled,
            content_id: None,
            show_timer: TimerSlot::new(),
            hide_timer: TimerSlot::new(),
            cooldown_deadline: None,
            bounds,
        }
    }

    /// Returns `true` if a pointer open at or before `now` is still cooling down.
    pub(crate) fn in_cooldown(&self, now: u64) -> bool {
        self.cooldown_deadline.is_some_and(|deadline| now < deadline)
    }

    pub(crate) fn cancel_timers<T>(&mut self, queue: &mut TimerQueue<T>) {
        self.show_timer.cancel(queue);
        self.hide_timer.cancel(queue);
    }
}
