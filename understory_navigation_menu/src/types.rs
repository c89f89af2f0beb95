// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: handles, orientation, keys, motion hints, and outgoing events.

use alloc::string::String;

/// Identifier for a menu (the root or a nested sub-menu).
///
/// Handles are generational: once a sub-menu is removed, its old handle never
/// matches a newer menu that reuses the slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MenuId(pub(crate) u32, pub(crate) u32);

/// Identifier for a menu item (and the trigger and content it owns).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ItemId(pub(crate) u32, pub(crate) u32);

/// Layout direction of a menu's triggers.
///
/// Orientation decides which arrow keys open and close content and which
/// ones are left to sibling navigation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Triggers laid out in a row; content opens below.
    #[default]
    Horizontal,
    /// Triggers laid out in a column; content opens to the side.
    Vertical,
}

/// Which way a content panel should animate during a transition.
///
/// `None` in APIs returning `Option<MotionDirection>` means "no directional
/// animation" (opening from fully closed, closing to fully closed, or an
/// item that is not part of the transition).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MotionDirection {
    /// Outgoing content leaves towards the start.
    ToStart,
    /// Outgoing content leaves towards the end.
    ToEnd,
    /// Incoming content enters from the start.
    FromStart,
    /// Incoming content enters from the end.
    FromEnd,
}

/// Keys the trigger keyboard protocol distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter.
    Enter,
    /// Space bar.
    Space,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Escape.
    Escape,
    /// Any other key; never handled by the trigger.
    Other,
}

/// A key press delivered to a trigger.
///
/// Mirrors the usual "default prevented" convention: the trigger sets
/// [`KeyboardEvent::default_prevented`] for every key it acts on, and leaves
/// it untouched for keys that belong to sibling navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The pressed key.
    pub key: Key,
    /// Whether a handler claimed the key.
    pub default_prevented: bool,
}

impl KeyboardEvent {
    /// Create an event for `key` that nothing has claimed yet.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            default_prevented: false,
        }
    }

    /// Claim the key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

bitflags::bitflags! {
    /// Render-facing state of an item, for the attribute layer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// The item is the active one of its menu; its content is open.
        const OPEN        = 0b0000_0001;
        /// The item's trigger is disabled.
        const DISABLED    = 0b0000_0010;
        /// The item has registered content (the trigger controls a panel).
        const HAS_CONTENT = 0b0000_0100;
    }
}

/// Notifications produced by the controller.
///
/// Events accumulate in an outbox; drain them with
/// [`NavigationMenu::drain_events`](crate::NavigationMenu::drain_events) after
/// dispatching input or advancing time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The active value of `menu` changed. Emitted once per distinct transition.
    ValueChanged {
        /// Menu whose value changed.
        menu: MenuId,
        /// Value active before the transition.
        previous: Option<String>,
        /// Value active after the transition.
        current: Option<String>,
    },
    /// Move focus to the first focusable element inside `item`'s content.
    FocusFirstContentItem {
        /// Item whose content should receive focus.
        item: ItemId,
    },
    /// Move focus back to `item`'s trigger.
    FocusTrigger {
        /// Item whose trigger should receive focus.
        item: ItemId,
    },
    /// A link inside `menu` was selected; the whole navigation menu closes.
    LinkSelected {
        /// Menu containing the selected link.
        menu: MenuId,
    },
}
