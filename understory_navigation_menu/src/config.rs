// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for menus, sub-menus, triggers, and content.

use kurbo::Rect;

use crate::portal::Placement;
use crate::types::Orientation;

/// Default delay between pointer entering a trigger and its content opening, in milliseconds.
pub const DEFAULT_SHOW_DELAY: u64 = 200;

/// Default delay between pointer leaving a trigger and the menu closing, in milliseconds.
pub const DEFAULT_HIDE_DELAY: u64 = 150;

/// Default window after a pointer-driven open during which sibling triggers open without delay.
pub const DEFAULT_COOLDOWN: u64 = 300;

/// Default delay before a sub-menu closes once the pointer leaves it, in milliseconds.
pub const SUB_MENU_CLOSE_DELAY: u64 = 100;

/// Configuration of the top-level navigation menu.
///
/// ```rust
/// use understory_navigation_menu::{MenuConfig, Orientation};
///
/// let config = MenuConfig::new()
///     .with_orientation(Orientation::Vertical)
///     .with_delays(0, 300);
/// assert_eq!(config.show_delay, 0);
/// assert_eq!(config.cooldown, 300);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuConfig {
    /// Layout direction of the top-level triggers.
    pub orientation: Orientation,
    /// Hover delay before opening, in milliseconds.
    pub show_delay: u64,
    /// Delay before closing after the pointer leaves, in milliseconds.
    pub hide_delay: u64,
    /// Window after a pointer-driven open during which siblings skip the show delay.
    pub cooldown: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            show_delay: DEFAULT_SHOW_DELAY,
            hide_delay: DEFAULT_HIDE_DELAY,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl MenuConfig {
    /// Default configuration: horizontal, 200ms show, 150ms hide, 300ms cooldown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the show and hide delays.
    pub fn with_delays(mut self, show_delay: u64, hide_delay: u64) -> Self {
        self.show_delay = show_delay;
        self.hide_delay = hide_delay;
        self
    }

    /// Set the cooldown window.
    pub fn with_cooldown(mut self, cooldown: u64) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Configuration of a nested sub-menu.
///
/// Delays left as `None` follow the parent menu, so changing the top-level
/// delays cascades into every nesting level that does not override them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubMenuConfig {
    /// Layout direction of the sub-menu's triggers.
    pub orientation: Orientation,
    /// Show delay override.
    pub show_delay: Option<u64>,
    /// Hide delay override.
    pub hide_delay: Option<u64>,
    /// Delay before the sub-menu closes once the pointer leaves it.
    pub close_delay: u64,
}

impl Default for SubMenuConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            show_delay: None,
            hide_delay: None,
            close_delay: SUB_MENU_CLOSE_DELAY,
        }
    }
}

impl SubMenuConfig {
    /// Inherit every delay, horizontal orientation, default close delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Override the inherited show and hide delays.
    pub fn with_delays(mut self, show_delay: u64, hide_delay: u64) -> Self {
        self.show_delay = Some(show_delay);
        self.hide_delay = Some(hide_delay);
        self
    }

    /// Set the close delay.
    pub fn with_close_delay(mut self, close_delay: u64) -> Self {
        self.close_delay = close_delay;
        self
    }
}

/// Options for registering a trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TriggerOptions {
    /// A disabled trigger ignores every pointer and keyboard interaction.
    pub disabled: bool,
    /// Trigger bounds in the list's coordinate space (used by the indicator and overlays).
    pub bounds: Rect,
}

/// Options for registering content.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentOptions {
    /// Present when the content floats in an overlay instead of rendering inline.
    pub overlay: Option<OverlayOptions>,
}

/// Positioning options forwarded to the overlay engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayOptions {
    /// Preferred placement; `None` picks one from the menu orientation.
    pub placement: Option<Placement>,
    /// Gap between trigger and panel.
    pub offset: f64,
    /// Let the engine flip to the opposite side when out of room.
    pub flip: bool,
    /// Let the engine shift the panel along its side to stay on screen.
    pub shift: bool,
    /// Host-defined handle of the container the panel is portalled into.
    pub container: Option<u64>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            placement: None,
            offset: 0.0,
            flip: true,
            shift: true,
            container: None,
        }
    }
}
