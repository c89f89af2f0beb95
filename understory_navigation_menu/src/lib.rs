// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Navigation Menu: a headless interaction controller for site navigation menus.
//!
//! The controller decides which item of a navigation menu is open and when. It
//! turns pointer, click and keyboard input into open/close transitions, delays
//! hover-driven changes so incidental pointer movement does not flicker the
//! menu, and keeps nested sub-menus and floating content panels in step.
//!
//! - Open/close state machine per menu, with one [`MenuEvent::ValueChanged`] per
//!   distinct transition and silent no-ops otherwise.
//! - Hover intent: show and hide delays with cancellation, plus a cooldown window
//!   during which sweeping across sibling triggers opens them without delay.
//! - Orientation-aware keyboard protocol (see [`key_intent`]). Keys reserved for
//!   sibling navigation are left unprevented for a roving-focus manager.
//! - Motion direction for content transitions (see [`motion_direction`]).
//! - Trigger list, active-item indicator geometry, and a viewport sized after the
//!   active content.
//! - Floating content coordination through the [`Overlay`] and
//!   [`OverlayFactory`] traits, with deferred creation guarded against re-entrancy.
//! - Nested sub-menus whose delays default to their parent's.
//!
//! ## Not a renderer
//!
//! Nothing here draws, lays out, or positions anything. The host reports
//! geometry (trigger and list bounds, content sizes) and reads back derived
//! state ([`ItemFlags`], [`MotionDirection`], [`IndicatorGeometry`]) to render
//! with whatever technology it uses. Floating panels are positioned by the
//! host's own engine behind [`Overlay`].
//!
//! ## Time
//!
//! The controller never reads a clock. Operations that can start timers take
//! `now` in milliseconds, and the host calls [`NavigationMenu::advance`] from its
//! event loop. Timers are built on [`understory_timer`].
//!
//! ## Example
//!
//! ```rust
//! use understory_navigation_menu::{
//!     ContentOptions, Key, KeyboardEvent, MenuConfig, MenuEvent, NavigationMenu, TriggerOptions,
//! };
//!
//! let mut nav = NavigationMenu::new(MenuConfig::default());
//! let root = nav.root();
//! let mut add = |value: &str| {
//!     let item = nav.add_item(root, Some(value)).unwrap();
//!     nav.add_trigger(item, TriggerOptions::default()).unwrap();
//!     nav.add_content(item, ContentOptions::default()).unwrap();
//!     item
//! };
//! let products = add("products");
//! let solutions = add("solutions");
//!
//! // Hovering opens after the show delay.
//! nav.pointer_enter(products, 0);
//! nav.advance(200);
//! assert_eq!(nav.value(root), Some("products"));
//!
//! // Moving to a sibling inside the cooldown window opens it at once.
//! nav.pointer_leave(products, 250);
//! nav.pointer_enter(solutions, 260);
//! assert_eq!(nav.value(root), Some("solutions"));
//!
//! // Escape closes the menu; focus stays on the trigger.
//! let mut escape = KeyboardEvent::new(Key::Escape);
//! nav.key_down(solutions, &mut escape);
//! assert!(escape.default_prevented);
//! assert_eq!(nav.value(root), None);
//!
//! let changes = nav
//!     .drain_events()
//!     .into_iter()
//!     .filter(|e| matches!(e, MenuEvent::ValueChanged { .. }))
//!     .count();
//! assert_eq!(changes, 3);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for the
//!   floating-point math in `kurbo`.
//! - `tracing`: emit `debug`/`trace` diagnostics for transitions, timers and
//!   overlays, and `warn` on rejected registrations.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod content;
mod error;
mod id;
mod list;
mod menu;
mod motion;
mod portal;
mod root;
mod slots;
mod trigger;
mod types;
mod viewport;

pub use config::{
    ContentOptions, DEFAULT_COOLDOWN, DEFAULT_HIDE_DELAY, DEFAULT_SHOW_DELAY, MenuConfig,
    OverlayOptions, SUB_MENU_CLOSE_DELAY, SubMenuConfig, TriggerOptions,
};
pub use error::RegistrationError;
pub use id::IdKind;
pub use list::{IndicatorGeometry, ListRegistry, TriggerRecord, indicator_geometry};
pub use menu::NavigationMenu;
pub use motion::motion_direction;
pub use portal::{
    HeadlessOverlay, HeadlessOverlays, Overlay, OverlayConfig, OverlayConfigUpdate,
    OverlayFactory, Placement, PortalAction, PortalCoordinator,
};
pub use root::{MenuState, ValueChange};
pub use trigger::{KeyIntent, key_intent};
pub use types::{
    ItemFlags, ItemId, Key, KeyboardEvent, MenuEvent, MenuId, MotionDirection, Orientation,
};
pub use viewport::ViewportState;
