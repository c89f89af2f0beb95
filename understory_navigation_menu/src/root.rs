// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close state machine shared by the root menu and its sub-menus.
//!
//! A menu is either closed (no active value) or open on exactly one value.
//! Every mutation goes through [`MenuState::set_active`], which reports a
//! [`ValueChange`] only for distinct transitions. Repeating the current state
//! is a silent no-op, which is what makes late timers and duplicate input safe.
//!
//! ```rust
//! use understory_navigation_menu::{MenuState, Orientation};
//!
//! let mut menu = MenuState::new(Orientation::Horizontal, Some(200), Some(150));
//! assert!(menu.open("products").is_some());
//! assert!(menu.open("products").is_none());
//!
//! let change = menu.close().unwrap();
//! assert_eq!(change.previous.as_deref(), Some("products"));
//! assert_eq!(change.current, None);
//! assert!(menu.close().is_none());
//! ```

use alloc::string::{String, ToString};

use crate::types::Orientation;

/// A distinct transition of a menu's active value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueChange {
    /// Value active before the transition.
    pub previous: Option<String>,
    /// Value active after the transition.
    pub current: Option<String>,
}

/// State of one menu level.
///
/// Owns the active value exclusively; items, triggers and content only read
/// it. Also remembers the value that was active before the latest transition,
/// which content needs to derive its motion direction.
#[derive(Clone, Debug)]
pub struct MenuState {
    orientation: Orientation,
    show_delay: Option<u64>,
    hide_delay: Option<u64>,
    active: Option<String>,
    previous: Option<String>,
}

impl MenuState {
    /// Create a closed menu.
    ///
    /// Delays left as `None` are resolved by the owner (sub-menus inherit from
    /// their parent).
    pub const fn new(
        orientation: Orientation,
        show_delay: Option<u64>,
        hide_delay: Option<u64>,
    ) -> Self {
        Self {
            orientation,
            show_delay,
            hide_delay,
            active: None,
            previous: None,
        }
    }

    /// Open `value`. No-op if it is already the active value.
    pub fn open(&mut self, value: &str) -> Option<ValueChange> {
        self.set_active(Some(value))
    }

    /// Close the menu. No-op if it is already closed.
    pub fn close(&mut self) -> Option<ValueChange> {
        self.set_active(None)
    }

    /// Make `value` the active value, or close with `None`.
    ///
    /// Returns the transition if the active value changed.
    pub fn set_active(&mut self, value: Option<&str>) -> Option<ValueChange> {
        if self.active.as_deref() == value {
            return None;
        }
        let current = value.map(ToString::to_string);
        let previous = core::mem::replace(&mut self.active, current.clone());
        self.previous.clone_from(&previous);
        Some(ValueChange { previous, current })
    }

    /// The active value.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The value that was active before the latest transition.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Returns `true` if `value` is the active value.
    pub fn is_active(&self, value: &str) -> bool {
        self.active.as_deref() == Some(value)
    }

    /// Returns `true` if some value is active.
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Layout direction of this menu's triggers.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the layout direction.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Configured show delay, or `None` when inherited.
    pub fn show_delay(&self) -> Option<u64> {
        self.show_delay
    }

    /// Configured hide delay, or `None` when inherited.
    pub fn hide_delay(&self) -> Option<u64> {
        self.hide_delay
    }

    /// Replace the configured delays.
    pub fn set_delays(&mut self, show_delay: Option<u64>, hide_delay: Option<u64>) {
        self.show_delay = show_delay;
        self.hide_delay = hide_delay;
    }
}
