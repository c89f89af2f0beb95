// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating content panels: the overlay engine seam and the coordinator that drives it.
//!
//! The controller never positions anything itself. When content is configured
//! to float, it talks to a host-provided [`Overlay`] built by an
//! [`OverlayFactory`]. [`PortalCoordinator`] decides, for one content panel,
//! whether an open/close transition should create, reposition, or hide the
//! overlay:
//!
//! - open with no overlay: request creation once; further requests are dropped
//!   until creation completes.
//! - open with an overlay: refresh its anchor, show it if hidden, reposition.
//! - closed with a shown overlay: hide it immediately.
//!
//! Creation itself is deferred by the caller and completed through
//! [`PortalCoordinator::complete_create`], which re-checks that the content is
//! still open.

use kurbo::Rect;

use crate::types::{ItemId, Orientation};

/// Preferred side and alignment of a floating panel relative to its trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Above, aligned to the start edge.
    TopStart,
    /// Above, aligned to the end edge.
    TopEnd,
    /// Below, centered.
    Bottom,
    /// Below, aligned to the start edge.
    BottomStart,
    /// Below, aligned to the end edge.
    BottomEnd,
    /// Left, centered.
    Left,
    /// Left, aligned to the top edge.
    LeftStart,
    /// Left, aligned to the bottom edge.
    LeftEnd,
    /// Right, centered.
    Right,
    /// Right, aligned to the top edge.
    RightStart,
    /// Right, aligned to the bottom edge.
    RightEnd,
}

impl Placement {
    /// Placement used when content does not ask for one.
    ///
    /// Horizontal menus drop their panels below the trigger; vertical menus
    /// open them to the side.
    pub const fn default_for(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::BottomStart,
            Orientation::Vertical => Self::RightStart,
        }
    }
}

/// Everything the positioning engine needs to build a panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Item whose trigger anchors the panel.
    pub anchor: ItemId,
    /// Last known trigger bounds.
    pub anchor_bounds: Rect,
    /// Resolved placement.
    pub placement: Placement,
    /// Gap between trigger and panel.
    pub offset: f64,
    /// Flip to the opposite side when out of room.
    pub flip: bool,
    /// Shift along the side to stay on screen.
    pub shift: bool,
    /// Host-defined container handle.
    pub container: Option<u64>,
}

/// Partial update applied to a live overlay when its content reopens.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayConfigUpdate {
    /// Item whose trigger anchors the panel.
    pub anchor: ItemId,
    /// Current trigger bounds.
    pub anchor_bounds: Rect,
    /// Current resolved placement.
    pub placement: Placement,
}

/// A positioned panel owned by the host's floating-position engine.
pub trait Overlay {
    /// Make the panel visible.
    fn show(&mut self);
    /// Hide the panel without any exit transition.
    fn hide_immediate(&mut self);
    /// Replace the anchor reference and placement.
    fn update_config(&mut self, update: &OverlayConfigUpdate);
    /// Recompute the panel position from the current anchor.
    fn update_position(&mut self);
    /// Release the panel. No other method is called afterwards.
    fn destroy(&mut self);
    /// Returns `true` while the panel is shown.
    fn is_open(&self) -> bool;
}

/// Builds overlays on behalf of the controller.
pub trait OverlayFactory {
    /// The overlay type this factory produces.
    type Overlay: Overlay;

    /// Build a hidden overlay for `config`.
    fn create(&mut self, config: &OverlayConfig) -> Self::Overlay;
}

/// Outcome of [`PortalCoordinator::sync`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortalAction {
    /// Nothing to do.
    Idle,
    /// The caller must defer a call to [`PortalCoordinator::complete_create`].
    ScheduleCreate,
    /// The live overlay was re-anchored and repositioned.
    Updated,
    /// The live overlay was hidden.
    Hidden,
}

/// Creation/update/hide bookkeeping for one content panel.
#[derive(Clone, Debug)]
pub struct PortalCoordinator<O> {
    overlay: Option<O>,
    pending: bool,
}

impl<O> Default for PortalCoordinator<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> PortalCoordinator<O> {
    /// Create a coordinator with no overlay.
    pub const fn new() -> Self {
        Self {
            overlay: None,
            pending: false,
        }
    }

    /// The live overlay, if created.
    pub fn overlay(&self) -> Option<&O> {
        self.overlay.as_ref()
    }

    /// Returns `true` while a creation request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl<O: Overlay> PortalCoordinator<O> {
    /// React to the content's open state.
    pub fn sync(&mut self, open: bool, update: &OverlayConfigUpdate) -> PortalAction {
        match (&mut self.overlay, open) {
            (Some(overlay), true) => {
                overlay.update_config(update);
                if !overlay.is_open() {
                    overlay.show();
                }
                overlay.update_position();
                PortalAction::Updated
            }
            (Some(overlay), false) => {
                if overlay.is_open() {
                    overlay.hide_immediate();
                    PortalAction::Hidden
                } else {
                    PortalAction::Idle
                }
            }
            (None, true) if !self.pending => {
                self.pending = true;
                PortalAction::ScheduleCreate
            }
            (None, _) => PortalAction::Idle,
        }
    }

    /// Finish a creation requested by [`PortalCoordinator::sync`].
    ///
    /// Builds and shows the overlay only if a request is outstanding and the
    /// content is still `open`. Returns `true` if an overlay was created.
    pub fn complete_create(&mut self, open: bool, create: impl FnOnce() -> O) -> bool {
        if !core::mem::take(&mut self.pending) || !open || self.overlay.is_some() {
            return false;
        }
        let mut overlay = create();
        overlay.show();
        overlay.update_position();
        self.overlay = Some(overlay);
        true
    }

    /// Destroy the overlay and drop any outstanding creation request.
    pub fn destroy(&mut self) {
        self.pending = false;
        if let Some(mut overlay) = self.overlay.take() {
            overlay.destroy();
        }
    }
}

/// Overlay factory for hosts without a positioning engine, and for tests.
///
/// Produces [`HeadlessOverlay`]s that only record what they were asked to do.
#[derive(Copy, Clone, Debug, Default)]
pub struct HeadlessOverlays {
    created: usize,
}

impl HeadlessOverlays {
    /// Create a factory.
    pub const fn new() -> Self {
        Self { created: 0 }
    }

    /// Number of overlays built so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl OverlayFactory for HeadlessOverlays {
    type Overlay = HeadlessOverlay;

    fn create(&mut self, config: &OverlayConfig) -> HeadlessOverlay {
        self.created += 1;
        HeadlessOverlay {
            config: *config,
            open: false,
            position_updates: 0,
            destroyed: false,
        }
    }
}

/// Recording overlay produced by [`HeadlessOverlays`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeadlessOverlay {
    config: OverlayConfig,
    open: bool,
    position_updates: usize,
    destroyed: bool,
}

impl HeadlessOverlay {
    /// Current configuration, including applied updates.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Number of [`Overlay::update_position`] calls.
    pub fn position_updates(&self) -> usize {
        self.position_updates
    }

    /// Returns `true` once [`Overlay::destroy`] was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Overlay for HeadlessOverlay {
    fn show(&mut self) {
        self.open = true;
    }

    fn hide_immediate(&mut self) {
        self.open = false;
    }

    fn update_config(&mut self, update: &OverlayConfigUpdate) {
        self.config.anchor = update.anchor;
        self.config.anchor_bounds = update.anchor_bounds;
        self.config.placement = update.placement;
    }

    fn update_position(&mut self) {
        self.position_updates += 1;
    }

    fn destroy(&mut self) {
        self.open = false;
        self.destroyed = true;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OverlayConfig {
        OverlayConfig {
            anchor: ItemId(0, 1),
            anchor_bounds: Rect::new(0.0, 0.0, 80.0, 24.0),
            placement: Placement::BottomStart,
            offset: 4.0,
            flip: true,
            shift: true,
            container: None,
        }
    }

    fn update() -> OverlayConfigUpdate {
        OverlayConfigUpdate {
            anchor: ItemId(0, 1),
            anchor_bounds: Rect::new(10.0, 0.0, 90.0, 24.0),
            placement: Placement::RightStart,
        }
    }

    #[test]
    fn creation_is_requested_once_while_pending() {
        let mut p: PortalCoordinator<HeadlessOverlay> = PortalCoordinator::new();
        assert_eq!(p.sync(true, &update()), PortalAction::ScheduleCreate);
        assert_eq!(p.sync(true, &update()), PortalAction::Idle);
        assert!(p.is_pending());

        let mut factory = HeadlessOverlays::new();
        assert!(p.complete_create(true, || factory.create(&config())));
        assert!(!p.is_pending());
        assert_eq!(factory.created(), 1);
        assert!(p.overlay().unwrap().is_open());
    }

    #[test]
    fn creation_is_dropped_when_closed_before_completion() {
        let mut p: PortalCoordinator<HeadlessOverlay> = PortalCoordinator::new();
        p.sync(true, &update());
        assert_eq!(p.sync(false, &update()), PortalAction::Idle);
        let mut factory = HeadlessOverlays::new();
        assert!(!p.complete_create(false, || factory.create(&config())));
        assert_eq!(factory.created(), 0);
        assert!(p.overlay().is_none());
        assert!(!p.is_pending());
    }

    #[test]
    fn existing_overlay_is_reanchored_not_recreated() {
        let mut p: PortalCoordinator<HeadlessOverlay> = PortalCoordinator::new();
        p.sync(true, &update());
        let mut factory = HeadlessOverlays::new();
        p.complete_create(true, || factory.create(&config()));

        assert_eq!(p.sync(false, &update()), PortalAction::Hidden);
        assert!(!p.overlay().unwrap().is_open());
        assert_eq!(p.sync(false, &update()), PortalAction::Idle);

        assert_eq!(p.sync(true, &update()), PortalAction::Updated);
        let overlay = p.overlay().unwrap();
        assert!(overlay.is_open());
        assert_eq!(overlay.config().placement, Placement::RightStart);
        assert_eq!(overlay.config().anchor_bounds, update().anchor_bounds);
        assert_eq!(overlay.position_updates(), 2);
        assert_eq!(factory.created(), 1);
    }

    #[test]
    fn destroy_cancels_pending_creation() {
        let mut p: PortalCoordinator<HeadlessOverlay> = PortalCoordinator::new();
        p.sync(true, &update());
        p.destroy();
        let mut factory = HeadlessOverlays::new();
        assert!(!p.complete_create(true, || factory.create(&config())));
    }

    #[test]
    fn default_placement_follows_orientation() {
        assert_eq!(
            Placement::default_for(Orientation::Horizontal),
            Placement::BottomStart
        );
        assert_eq!(
            Placement::default_for(Orientation::Vertical),
            Placement::RightStart
        );
    }
}
