// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation menu controller.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Insets, Rect, Size};
use smallvec::SmallVec;
use understory_timer::{Deferred, Fired, TimerQueue, TimerSlot};

use crate::config::{
    ContentOptions, DEFAULT_HIDE_DELAY, DEFAULT_SHOW_DELAY, MenuConfig, SubMenuConfig,
    TriggerOptions,
};
use crate::content::ContentState;
use crate::error::RegistrationError;
use crate::id::IdKind;
use crate::list::{IndicatorGeometry, ListRegistry, TriggerRecord, indicator_geometry};
use crate::motion::motion_direction;
use crate::portal::{
    HeadlessOverlays, OverlayConfig, OverlayConfigUpdate, OverlayFactory, Placement, PortalAction,
};
use crate::root::MenuState;
use crate::slots::Slots;
use crate::trigger::{KeyIntent, TriggerState, key_intent};
use crate::types::{
    ItemFlags, ItemId, KeyboardEvent, MenuEvent, MenuId, MotionDirection, Orientation,
};
use crate::viewport::ViewportState;

/// Timer payloads. Each one is owned by exactly one [`TimerSlot`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    Show(ItemId),
    Hide(ItemId),
    CloseSubMenu(MenuId),
}

/// Work that runs once the current operation has finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Microtask {
    CreateOverlay(ItemId),
}

struct MenuNode {
    state: MenuState,
    /// Item whose content hosts this menu; `None` for the root.
    parent: Option<ItemId>,
    /// Items in registration order.
    items: SmallVec<[ItemId; 8]>,
    values: HashMap<String, ItemId>,
    list: ListRegistry,
    list_bounds: Rect,
    list_border: Insets,
    indicator: bool,
    viewport: Option<ViewportState>,
    close_timer: TimerSlot,
    close_delay: u64,
}

impl MenuNode {
    fn new(state: MenuState, parent: Option<ItemId>, close_delay: u64) -> Self {
        Self {
            state,
            parent,
            items: SmallVec::new(),
            values: HashMap::new(),
            list: ListRegistry::new(),
            list_bounds: Rect::ZERO,
            list_border: Insets::ZERO,
            indicator: false,
            viewport: None,
            close_timer: TimerSlot::new(),
            close_delay,
        }
    }
}

struct ItemNode<O> {
    menu: MenuId,
    value: String,
    trigger: Option<TriggerState>,
    content: Option<ContentState<O>>,
    sub_menus: SmallVec<[MenuId; 2]>,
}

/// Interaction controller for a navigation menu and its nested sub-menus.
///
/// The controller owns every piece of menu state: the active value of each
/// menu, the hover-intent timers of every trigger, content measurements and
/// floating overlays. The host feeds it input and time; it answers with
/// [`MenuEvent`]s (drained with [`NavigationMenu::drain_events`]) and with
/// render-facing queries such as [`NavigationMenu::item_flags`] and
/// [`NavigationMenu::motion_direction`].
///
/// Time is explicit. Every operation that may start a timer takes `now` in
/// milliseconds, and the host calls [`NavigationMenu::advance`] to fire due
/// timers. [`NavigationMenu::next_deadline`] tells the host when that is
/// next needed.
///
/// Handles are generational. Operations on removed menus or items are
/// silent no-ops, and queries on them return `None` or `false`.
///
/// ## Example
///
/// ```rust
/// use understory_navigation_menu::{
///     ContentOptions, MenuConfig, MenuEvent, NavigationMenu, TriggerOptions,
/// };
///
/// let mut nav = NavigationMenu::new(MenuConfig::default());
/// let root = nav.root();
/// let products = nav.add_item(root, Some("products")).unwrap();
/// nav.add_trigger(products, TriggerOptions::default()).unwrap();
/// nav.add_content(products, ContentOptions::default()).unwrap();
///
/// nav.pointer_enter(products, 0);
/// nav.advance(100);
/// assert!(!nav.is_active(products));
/// nav.advance(200);
/// assert!(nav.is_active(products));
///
/// nav.pointer_leave(products, 210);
/// nav.advance(360);
/// assert_eq!(nav.value(root), None);
///
/// let events = nav.drain_events();
/// assert_eq!(events.len(), 2);
/// assert!(matches!(events[0], MenuEvent::ValueChanged { .. }));
/// ```
pub struct NavigationMenu<F: OverlayFactory = HeadlessOverlays> {
    menus: Slots<MenuId, MenuNode>,
    items: Slots<ItemId, ItemNode<F::Overlay>>,
    root: MenuId,
    cooldown: u64,
    timers: TimerQueue<Task>,
    deferred: Deferred<Microtask>,
    events: Vec<MenuEvent>,
    factory: F,
}

impl<F: OverlayFactory> core::fmt::Debug for NavigationMenu<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavigationMenu")
            .field("root", &self.root)
            .field("menus_alive", &self.menus.len())
            .field("items_alive", &self.items.len())
            .field("cooldown", &self.cooldown)
            .field("pending_timers", &self.timers.len())
            .field("deferred", &self.deferred.len())
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Default for NavigationMenu<HeadlessOverlays> {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl NavigationMenu<HeadlessOverlays> {
    /// Create a controller whose floating content uses [`HeadlessOverlays`].
    pub fn new(config: MenuConfig) -> Self {
        Self::with_overlays(config, HeadlessOverlays::new())
    }
}

impl<F: OverlayFactory> NavigationMenu<F> {
    /// Create a controller that builds floating content with `factory`.
    pub fn with_overlays(config: MenuConfig, factory: F) -> Self {
        let mut menus = Slots::new();
        let root = menus.insert(MenuNode::new(
            MenuState::new(
                config.orientation,
                Some(config.show_delay),
                Some(config.hide_delay),
            ),
            None,
            0,
        ));
        Self {
            menus,
            items: Slots::new(),
            root,
            cooldown: config.cooldown,
            timers: TimerQueue::new(),
            deferred: Deferred::new(),
            events: Vec::new(),
            factory,
        }
    }

    // --- registration ---

    /// Register an item in `menu`.
    ///
    /// Without an explicit `value`, a unique one is generated.
    pub fn add_item(
        &mut self,
        menu: MenuId,
        value: Option<&str>,
    ) -> Result<ItemId, RegistrationError> {
        let Some(node) = self.menus.get(menu) else {
            return reject(RegistrationError::UnknownMenu(menu));
        };
        let value = match value {
            Some(v) if node.values.contains_key(v) => {
                return reject(RegistrationError::DuplicateValue(v.to_string()));
            }
            Some(v) => v.to_string(),
            None => loop {
                let candidate = IdKind::Item.next_id();
                if !node.values.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        let item = self.items.insert(ItemNode {
            menu,
            value: value.clone(),
            trigger: None,
            content: None,
            sub_menus: SmallVec::new(),
        });
        if let Some(node) = self.menus.get_mut(menu) {
            node.items.push(item);
            node.values.insert(value, item);
        }
        Ok(item)
    }

    /// Mount the trigger of `item` and append it to its menu's list.
    pub fn add_trigger(
        &mut self,
        item: ItemId,
        options: TriggerOptions,
    ) -> Result<(), RegistrationError> {
        let Some(node) = self.items.get_mut(item) else {
            return reject(RegistrationError::UnknownItem(item));
        };
        if node.trigger.is_some() {
            return reject(RegistrationError::TriggerExists(item));
        }
        let id = IdKind::Trigger.next_id();
        let mut trigger = TriggerState::new(id.clone(), options.disabled, options.bounds);
        trigger.content_id = node.content.as_ref().map(|c| c.id.clone());
        node.trigger = Some(trigger);
        let record = TriggerRecord {
            item,
            id,
            value: node.value.clone(),
            bounds: options.bounds,
        };
        if let Some(menu) = self.menus.get_mut(node.menu) {
            menu.list.append(record);
        }
        Ok(())
    }

    /// Mount the content panel of `item`.
    ///
    /// Content mounted while its item is already active is synchronized
    /// immediately (viewport size and overlay).
    pub fn add_content(
        &mut self,
        item: ItemId,
        options: ContentOptions,
    ) -> Result<(), RegistrationError> {
        let Some(node) = self.items.get_mut(item) else {
            return reject(RegistrationError::UnknownItem(item));
        };
        if node.content.is_some() {
            return reject(RegistrationError::ContentExists(item));
        }
        let id = IdKind::Content.next_id();
        if let Some(trigger) = node.trigger.as_mut() {
            trigger.content_id = Some(id.clone());
        }
        node.content = Some(ContentState::new(id, options.overlay));
        if self.is_active(item) {
            self.sync_content(item);
        }
        Ok(())
    }

    /// Nest a sub-menu inside the content of `parent`.
    pub fn add_sub_menu(
        &mut self,
        parent: ItemId,
        config: SubMenuConfig,
    ) -> Result<MenuId, RegistrationError> {
        if !self.items.is_alive(parent) {
            return reject(RegistrationError::UnknownItem(parent));
        }
        let menu = self.menus.insert(MenuNode::new(
            MenuState::new(config.orientation, config.show_delay, config.hide_delay),
            Some(parent),
            config.close_delay,
        ));
        if let Some(node) = self.items.get_mut(parent) {
            node.sub_menus.push(menu);
        }
        Ok(menu)
    }

    /// Mount the active-item indicator of `menu`.
    pub fn add_indicator(&mut self, menu: MenuId) -> Result<(), RegistrationError> {
        match self.menus.get_mut(menu) {
            Some(node) => {
                node.indicator = true;
                Ok(())
            }
            None => reject(RegistrationError::UnknownMenu(menu)),
        }
    }

    /// Unmount the indicator of `menu`.
    pub fn remove_indicator(&mut self, menu: MenuId) {
        if let Some(node) = self.menus.get_mut(menu) {
            node.indicator = false;
        }
    }

    /// Mount the viewport of `menu`.
    ///
    /// If an item of `menu` is active and its content was measured, the
    /// viewport starts out with that size.
    pub fn add_viewport(&mut self, menu: MenuId) -> Result<(), RegistrationError> {
        let Some(node) = self.menus.get_mut(menu) else {
            return reject(RegistrationError::UnknownMenu(menu));
        };
        let mut viewport = ViewportState::new();
        let active = node.state.active().and_then(|v| node.values.get(v));
        if let Some(size) = active
            .and_then(|&item| self.items.get(item))
            .and_then(|n| n.content.as_ref())
            .and_then(|c| c.size)
        {
            viewport.update_dimensions(size.width, size.height);
        }
        node.viewport = Some(viewport);
        Ok(())
    }

    /// Unmount the viewport of `menu`.
    pub fn remove_viewport(&mut self, menu: MenuId) {
        if let Some(node) = self.menus.get_mut(menu) {
            node.viewport = None;
        }
    }

    // --- removal ---

    /// Unmount the trigger of `item`, cancelling its timers.
    pub fn remove_trigger(&mut self, item: ItemId) {
        let Some(node) = self.items.get_mut(item) else {
            return;
        };
        let Some(mut trigger) = node.trigger.take() else {
            return;
        };
        trigger.cancel_timers(&mut self.timers);
        if let Some(menu) = self.menus.get_mut(node.menu) {
            menu.list.remove(item);
        }
    }

    /// Unmount the content of `item`, destroying its overlay.
    pub fn remove_content(&mut self, item: ItemId) {
        let Some(node) = self.items.get_mut(item) else {
            return;
        };
        let Some(mut content) = node.content.take() else {
            return;
        };
        if let Some(floating) = content.floating.as_mut() {
            floating.portal.destroy();
            #[cfg(feature = "tracing")]
            tracing::debug!(?item, "overlay destroyed");
        }
        if let Some(trigger) = node.trigger.as_mut() {
            trigger.content_id = None;
        }
    }

    /// Remove a sub-menu with all of its items.
    ///
    /// The root menu cannot be removed.
    pub fn remove_sub_menu(&mut self, menu: MenuId) {
        if menu == self.root {
            return;
        }
        let Some(node) = self.menus.get_mut(menu) else {
            return;
        };
        node.close_timer.cancel(&mut self.timers);
        let parent = node.parent;
        let items = node.items.clone();
        for item in items {
            self.remove_item(item);
        }
        if let Some(parent) = parent.and_then(|p| self.items.get_mut(p)) {
            parent.sub_menus.retain(|m| *m != menu);
        }
        self.menus.remove(menu);
    }

    /// Remove an item with its trigger, content, and nested sub-menus.
    ///
    /// The owning menu's active value is left untouched; if it named this
    /// item it now matches nothing.
    pub fn remove_item(&mut self, item: ItemId) {
        let Some(node) = self.items.get(item) else {
            return;
        };
        let sub_menus = node.sub_menus.clone();
        for sub in sub_menus {
            self.remove_sub_menu(sub);
        }
        self.remove_trigger(item);
        self.remove_content(item);
        let Some(node) = self.items.remove(item) else {
            return;
        };
        if let Some(menu) = self.menus.get_mut(node.menu) {
            menu.items.retain(|i| *i != item);
            if menu.values.get(&node.value) == Some(&item) {
                menu.values.remove(&node.value);
            }
        }
    }

    // --- configuration ---

    /// Enable or disable the trigger of `item`.
    ///
    /// Disabling cancels the trigger's pending timers.
    pub fn set_disabled(&mut self, item: ItemId, disabled: bool) {
        let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) else {
            return;
        };
        trigger.disabled = disabled;
        if disabled {
            trigger.cancel_timers(&mut self.timers);
        }
    }

    /// Change the layout direction of `menu`.
    pub fn set_orientation(&mut self, menu: MenuId, orientation: Orientation) {
        let Some(node) = self.menus.get_mut(menu) else {
            return;
        };
        node.state.set_orientation(orientation);
        if let Some(item) = self.active_item(menu) {
            self.sync_content(item);
        }
    }

    /// Replace the show and hide delays of `menu`.
    ///
    /// On a sub-menu, `None` inherits from the parent menu. On the root,
    /// `None` restores the default delay.
    pub fn set_delays(&mut self, menu: MenuId, show_delay: Option<u64>, hide_delay: Option<u64>) {
        let is_root = menu == self.root;
        let Some(node) = self.menus.get_mut(menu) else {
            return;
        };
        if is_root {
            node.state.set_delays(
                Some(show_delay.unwrap_or(DEFAULT_SHOW_DELAY)),
                Some(hide_delay.unwrap_or(DEFAULT_HIDE_DELAY)),
            );
        } else {
            node.state.set_delays(show_delay, hide_delay);
        }
    }

    /// Set how long a sub-menu waits before closing once the pointer leaves it.
    pub fn set_close_delay(&mut self, menu: MenuId, close_delay: u64) {
        if let Some(node) = self.menus.get_mut(menu) {
            node.close_delay = close_delay;
        }
    }

    /// Set the cooldown window applied after every pointer-driven open.
    pub fn set_cooldown(&mut self, cooldown: u64) {
        self.cooldown = cooldown;
    }

    // --- measurement ---

    /// Update the bounds of `item`'s trigger (indicator and overlay anchor).
    pub fn set_trigger_bounds(&mut self, item: ItemId, bounds: Rect) {
        let Some(node) = self.items.get_mut(item) else {
            return;
        };
        let Some(trigger) = node.trigger.as_mut() else {
            return;
        };
        trigger.bounds = bounds;
        if let Some(menu) = self.menus.get_mut(node.menu) {
            menu.list.update_bounds(item, bounds);
        }
        if self.is_active(item) {
            self.sync_content(item);
        }
    }

    /// Update the border-box bounds and border widths of `menu`'s list container.
    pub fn set_list_bounds(&mut self, menu: MenuId, bounds: Rect, border: Insets) {
        if let Some(node) = self.menus.get_mut(menu) {
            node.list_bounds = bounds;
            node.list_border = border;
        }
    }

    /// Record the measured size of `item`'s content.
    ///
    /// While the item is active the size is forwarded to its menu's viewport.
    pub fn update_content_dimensions(&mut self, item: ItemId, size: Size) {
        let active = self.is_active(item);
        let Some(node) = self.items.get_mut(item) else {
            return;
        };
        let Some(content) = node.content.as_mut() else {
            return;
        };
        content.size = Some(size);
        if active {
            if let Some(viewport) = self
                .menus
                .get_mut(node.menu)
                .and_then(|m| m.viewport.as_mut())
            {
                viewport.update_dimensions(size.width, size.height);
            }
        }
    }

    /// Record the measured size of `menu`'s viewport directly.
    pub fn update_viewport_dimensions(&mut self, menu: MenuId, width: f64, height: f64) {
        if let Some(viewport) = self.menus.get_mut(menu).and_then(|m| m.viewport.as_mut()) {
            viewport.update_dimensions(width, height);
        }
    }

    // --- direct state changes ---

    /// Open `value` in `menu`. Values that match no item are accepted and inert.
    pub fn open(&mut self, menu: MenuId, value: &str) {
        self.set_active(menu, Some(value));
    }

    /// Close `menu`.
    pub fn close(&mut self, menu: MenuId) {
        self.set_active(menu, None);
    }

    /// Set the active value of `menu` (controlled mode).
    pub fn set_value(&mut self, menu: MenuId, value: Option<&str>) {
        self.set_active(menu, value);
    }

    // --- pointer ---

    /// The pointer entered `item`'s trigger.
    ///
    /// Cancels pending closes of the trigger's menu and its ancestors, then
    /// opens after the show delay. The delay is skipped while a sibling
    /// trigger (or this one) is cooling down from a recent pointer open.
    pub fn pointer_enter(&mut self, item: ItemId, now: u64) {
        let Some(menu) = self.enabled_trigger_menu(item) else {
            return;
        };
        self.hold_open(menu);
        if self.is_active(item) {
            return;
        }
        let delay = if self.in_cooldown(menu, now) {
            0
        } else {
            self.show_delay(menu).unwrap_or(DEFAULT_SHOW_DELAY)
        };
        if delay == 0 {
            self.open_from_pointer(item, now);
            return;
        }
        let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) else {
            return;
        };
        trigger.hide_timer.cancel(&mut self.timers);
        trigger
            .show_timer
            .start(&mut self.timers, now, delay, Task::Show(item));
        #[cfg(feature = "tracing")]
        tracing::debug!(?item, now, delay, "show timer started");
    }

    /// The pointer left `item`'s trigger; close its menu after the hide delay.
    pub fn pointer_leave(&mut self, item: ItemId, now: u64) {
        self.start_hide(item, now);
    }

    /// The pointer entered `item`'s content; keep its menu chain open.
    pub fn content_pointer_enter(&mut self, item: ItemId) {
        if let Some(menu) = self.items.get(item).map(|n| n.menu) {
            self.hold_open(menu);
        }
    }

    /// The pointer left `item`'s content; close its menu after the hide delay.
    pub fn content_pointer_leave(&mut self, item: ItemId, now: u64) {
        self.start_hide(item, now);
    }

    /// The pointer entered sub-menu `menu`; cancel its pending close.
    pub fn sub_menu_pointer_enter(&mut self, menu: MenuId) {
        self.hold_open(menu);
    }

    /// The pointer left sub-menu `menu`; close it after its close delay.
    pub fn sub_menu_pointer_leave(&mut self, menu: MenuId, now: u64) {
        let Some(node) = self.menus.get_mut(menu) else {
            return;
        };
        if node.parent.is_none() {
            return;
        }
        let delay = node.close_delay;
        node.close_timer
            .start(&mut self.timers, now, delay, Task::CloseSubMenu(menu));
        #[cfg(feature = "tracing")]
        tracing::debug!(?menu, now, delay, "sub-menu close timer started");
    }

    /// `item`'s trigger was clicked: close it if open, open it otherwise.
    pub fn click(&mut self, item: ItemId) {
        let Some(menu) = self.enabled_trigger_menu(item) else {
            return;
        };
        self.cancel_trigger_timers(item);
        self.cancel_pending_shows(menu);
        if self.is_active(item) {
            self.set_active(menu, None);
        } else {
            self.activate(item);
        }
    }

    // --- keyboard ---

    /// A key was pressed while `item`'s trigger had focus.
    ///
    /// Keys the trigger acts on are marked with
    /// [`KeyboardEvent::prevent_default`]; the rest are left for sibling
    /// navigation. Disabled triggers leave every key alone.
    pub fn key_down(&mut self, item: ItemId, event: &mut KeyboardEvent) {
        let Some(menu) = self.enabled_trigger_menu(item) else {
            return;
        };
        let Some(orientation) = self.orientation(menu) else {
            return;
        };
        let Some(intent) = key_intent(orientation, event.key) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(?item, key = ?event.key, "key left for sibling navigation");
            return;
        };
        event.prevent_default();
        self.cancel_trigger_timers(item);
        self.cancel_pending_shows(menu);
        let active = self.is_active(item);
        match intent {
            KeyIntent::Toggle if active => self.set_active(menu, None),
            KeyIntent::Toggle => {
                self.activate(item);
                self.events.push(MenuEvent::FocusFirstContentItem { item });
            }
            KeyIntent::OpenAndFocus => {
                if !active {
                    self.activate(item);
                }
                self.events.push(MenuEvent::FocusFirstContentItem { item });
            }
            KeyIntent::Close => {
                if active {
                    self.set_active(menu, None);
                }
            }
            KeyIntent::Dismiss => self.set_active(menu, None),
        }
    }

    /// Escape was pressed inside `item`'s content: close and refocus the trigger.
    pub fn content_escape(&mut self, item: ItemId) {
        let Some(node) = self.items.get(item) else {
            return;
        };
        let menu = node.menu;
        let has_trigger = node.trigger.is_some();
        self.set_active(menu, None);
        if has_trigger {
            self.events.push(MenuEvent::FocusTrigger { item });
        }
    }

    // --- whole-menu actions ---

    /// A link inside `menu` was selected; the whole navigation menu closes.
    pub fn select_link(&mut self, menu: MenuId) {
        if !self.menus.is_alive(menu) {
            return;
        }
        self.events.push(MenuEvent::LinkSelected { menu });
        self.dismiss();
    }

    /// Close the root menu and every nested sub-menu (for example on an outside click).
    ///
    /// Every pending timer is cancelled.
    pub fn dismiss(&mut self) {
        self.timers.clear();
        self.set_active(self.root, None);
    }

    // --- time ---

    /// Run deferred work and fire every timer due at `now`.
    ///
    /// Timers fire in deadline order and observe their own deadline as the
    /// current time. Deferred work queued by a timer runs before the next
    /// timer fires.
    pub fn advance(&mut self, now: u64) {
        self.run_deferred();
        while let Some(fired) = self.timers.pop_due(now) {
            self.fire(fired);
            self.run_deferred();
        }
    }

    /// Run deferred work (overlay creation) without firing timers.
    pub fn run_deferred(&mut self) {
        while let Some(task) = self.deferred.pop() {
            match task {
                Microtask::CreateOverlay(item) => self.create_overlay(item),
            }
        }
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Returns `true` when no timer is pending and no deferred work is queued.
    ///
    /// Hosts can stop driving [`NavigationMenu::advance`] while idle.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.deferred.is_empty()
    }

    /// Take every event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<MenuEvent> {
        core::mem::take(&mut self.events)
    }

    // --- queries ---

    /// The root menu.
    pub fn root(&self) -> MenuId {
        self.root
    }

    /// The overlay factory.
    pub fn overlays(&self) -> &F {
        &self.factory
    }

    /// Active value of `menu`.
    pub fn value(&self, menu: MenuId) -> Option<&str> {
        self.menus.get(menu)?.state.active()
    }

    /// Value of `menu` before its latest transition.
    pub fn previous_value(&self, menu: MenuId) -> Option<&str> {
        self.menus.get(menu)?.state.previous()
    }

    /// Returns `true` if `item` is the active item of its menu.
    pub fn is_active(&self, item: ItemId) -> bool {
        self.items.get(item).is_some_and(|node| {
            self.menus
                .get(node.menu)
                .is_some_and(|m| m.state.is_active(&node.value))
        })
    }

    /// Render-facing state of `item`.
    pub fn item_flags(&self, item: ItemId) -> ItemFlags {
        let Some(node) = self.items.get(item) else {
            return ItemFlags::empty();
        };
        let mut flags = ItemFlags::empty();
        flags.set(ItemFlags::OPEN, self.is_active(item));
        flags.set(
            ItemFlags::DISABLED,
            node.trigger.as_ref().is_some_and(|t| t.disabled),
        );
        flags.set(ItemFlags::HAS_CONTENT, node.content.is_some());
        flags
    }

    /// Value of `item`.
    pub fn value_of(&self, item: ItemId) -> Option<&str> {
        Some(self.items.get(item)?.value.as_str())
    }

    /// Item of `menu` registered under `value`.
    pub fn item_by_value(&self, menu: MenuId, value: &str) -> Option<ItemId> {
        self.menus.get(menu)?.values.get(value).copied()
    }

    /// Items of `menu` in registration order.
    pub fn items(&self, menu: MenuId) -> &[ItemId] {
        self.menus
            .get(menu)
            .map(|m| m.items.as_slice())
            .unwrap_or_default()
    }

    /// Item hosting `menu`, or `None` for the root.
    pub fn parent(&self, menu: MenuId) -> Option<ItemId> {
        self.menus.get(menu)?.parent
    }

    /// Menu owning `item`.
    pub fn menu_of(&self, item: ItemId) -> Option<MenuId> {
        Some(self.items.get(item)?.menu)
    }

    /// Sub-menus nested in `item`'s content.
    pub fn sub_menus(&self, item: ItemId) -> &[MenuId] {
        self.items
            .get(item)
            .map(|n| n.sub_menus.as_slice())
            .unwrap_or_default()
    }

    /// Trigger list of `menu`.
    pub fn list(&self, menu: MenuId) -> Option<&ListRegistry> {
        Some(&self.menus.get(menu)?.list)
    }

    /// Layout direction of `menu`.
    pub fn orientation(&self, menu: MenuId) -> Option<Orientation> {
        Some(self.menus.get(menu)?.state.orientation())
    }

    /// Effective show delay of `menu`, following inherited delays up to the root.
    pub fn show_delay(&self, menu: MenuId) -> Option<u64> {
        self.inherited(menu, MenuState::show_delay)
    }

    /// Effective hide delay of `menu`, following inherited delays up to the root.
    pub fn hide_delay(&self, menu: MenuId) -> Option<u64> {
        self.inherited(menu, MenuState::hide_delay)
    }

    /// Close delay of sub-menu `menu`.
    pub fn close_delay(&self, menu: MenuId) -> Option<u64> {
        let node = self.menus.get(menu)?;
        node.parent.map(|_| node.close_delay)
    }

    /// Cooldown window applied after pointer-driven opens.
    pub fn cooldown(&self) -> u64 {
        self.cooldown
    }

    /// Which way `item`'s content should animate for its menu's latest transition.
    pub fn motion_direction(&self, item: ItemId) -> Option<MotionDirection> {
        let node = self.items.get(item)?;
        node.content.as_ref()?;
        let menu = self.menus.get(node.menu)?;
        let previous = menu.state.previous().and_then(|v| menu.values.get(v));
        let current = menu.state.active().and_then(|v| menu.values.get(v));
        motion_direction(&menu.items, previous, current, &item)
    }

    /// Indicator placement for `menu`'s active trigger.
    ///
    /// `None` without a mounted indicator, without an active value, or when
    /// no trigger is registered for the active value.
    pub fn indicator(&self, menu: MenuId) -> Option<IndicatorGeometry> {
        let node = self.menus.get(menu)?;
        if !node.indicator {
            return None;
        }
        let record = node.list.find_by_value(node.state.active()?)?;
        Some(indicator_geometry(
            node.list_bounds,
            node.list_border,
            record.bounds,
        ))
    }

    /// Size of `menu`'s viewport.
    pub fn viewport_size(&self, menu: MenuId) -> Option<Size> {
        self.menus.get(menu)?.viewport.as_ref()?.size()
    }

    /// Generated id of `item`'s content.
    pub fn content_id(&self, item: ItemId) -> Option<&str> {
        Some(self.items.get(item)?.content.as_ref()?.id.as_str())
    }

    /// Generated id of `item`'s trigger.
    pub fn trigger_id(&self, item: ItemId) -> Option<&str> {
        Some(self.items.get(item)?.trigger.as_ref()?.id.as_str())
    }

    /// Id of the content `item`'s trigger controls.
    pub fn trigger_content_id(&self, item: ItemId) -> Option<&str> {
        self.items.get(item)?.trigger.as_ref()?.content_id.as_deref()
    }

    /// Live overlay of `item`'s content.
    pub fn overlay(&self, item: ItemId) -> Option<&F::Overlay> {
        self.items
            .get(item)?
            .content
            .as_ref()?
            .floating
            .as_ref()?
            .portal
            .overlay()
    }

    /// Returns `true` while `item`'s trigger waits to open.
    pub fn is_show_pending(&self, item: ItemId) -> bool {
        self.trigger(item)
            .is_some_and(|t| t.show_timer.is_pending(&self.timers))
    }

    /// Returns `true` while `item`'s trigger waits to close its menu.
    pub fn is_hide_pending(&self, item: ItemId) -> bool {
        self.trigger(item)
            .is_some_and(|t| t.hide_timer.is_pending(&self.timers))
    }

    /// Returns `true` while sub-menu `menu` waits to close.
    pub fn is_close_pending(&self, menu: MenuId) -> bool {
        self.menus
            .get(menu)
            .is_some_and(|m| m.close_timer.is_pending(&self.timers))
    }

    // --- internals ---

    fn trigger(&self, item: ItemId) -> Option<&TriggerState> {
        self.items.get(item)?.trigger.as_ref()
    }

    /// Menu of `item` if it has an enabled trigger.
    fn enabled_trigger_menu(&self, item: ItemId) -> Option<MenuId> {
        let node = self.items.get(item)?;
        match node.trigger.as_ref() {
            Some(trigger) if !trigger.disabled => Some(node.menu),
            _ => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?item, "input ignored: no enabled trigger");
                None
            }
        }
    }

    fn active_item(&self, menu: MenuId) -> Option<ItemId> {
        let node = self.menus.get(menu)?;
        node.values.get(node.state.active()?).copied()
    }

    fn inherited(&self, menu: MenuId, get: fn(&MenuState) -> Option<u64>) -> Option<u64> {
        let mut current = menu;
        loop {
            let node = self.menus.get(current)?;
            if let Some(delay) = get(&node.state) {
                return Some(delay);
            }
            current = self.items.get(node.parent?)?.menu;
        }
    }

    fn in_cooldown(&self, menu: MenuId, now: u64) -> bool {
        self.items(menu)
            .iter()
            .filter_map(|&item| self.trigger(item))
            .any(|t| t.in_cooldown(now))
    }

    /// Cancel pending closes of `menu` and every menu above it.
    fn hold_open(&mut self, menu: MenuId) {
        let mut current = Some(menu);
        while let Some(id) = current {
            let Some(node) = self.menus.get_mut(id) else {
                return;
            };
            node.close_timer.cancel(&mut self.timers);
            for &item in &node.items {
                if let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) {
                    trigger.hide_timer.cancel(&mut self.timers);
                }
            }
            current = node
                .parent
                .and_then(|parent| self.items.get(parent))
                .map(|n| n.menu);
        }
    }

    fn start_hide(&mut self, item: ItemId, now: u64) {
        let Some(menu) = self.enabled_trigger_menu(item) else {
            return;
        };
        let delay = self.hide_delay(menu).unwrap_or(DEFAULT_HIDE_DELAY);
        let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) else {
            return;
        };
        trigger.show_timer.cancel(&mut self.timers);
        trigger
            .hide_timer
            .start(&mut self.timers, now, delay, Task::Hide(item));
        #[cfg(feature = "tracing")]
        tracing::debug!(?item, now, delay, "hide timer started");
    }

    fn cancel_trigger_timers(&mut self, item: ItemId) {
        if let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) {
            trigger.cancel_timers(&mut self.timers);
        }
    }

    /// Cancel the pending hover opens of every trigger in `menu`.
    fn cancel_pending_shows(&mut self, menu: MenuId) {
        let Some(node) = self.menus.get(menu) else {
            return;
        };
        for &item in &node.items {
            if let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) {
                trigger.show_timer.cancel(&mut self.timers);
            }
        }
    }

    fn cancel_menu_timers(&mut self, menu: MenuId) {
        let Some(node) = self.menus.get_mut(menu) else {
            return;
        };
        node.close_timer.cancel(&mut self.timers);
        for &item in &node.items {
            if let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) {
                trigger.cancel_timers(&mut self.timers);
            }
        }
    }

    /// Open `item` in its menu, cancelling pending closes of the chain.
    fn activate(&mut self, item: ItemId) {
        let Some(node) = self.items.get(item) else {
            return;
        };
        let menu = node.menu;
        let value = node.value.clone();
        self.hold_open(menu);
        self.set_active(menu, Some(&value));
    }

    /// Open `item` as the result of hovering, starting its cooldown window at `at`.
    fn open_from_pointer(&mut self, item: ItemId, at: u64) {
        let cooldown = self.cooldown;
        let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut()) else {
            return;
        };
        trigger.cooldown_deadline = Some(at.saturating_add(cooldown));
        self.activate(item);
    }

    fn fire(&mut self, fired: Fired<Task>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(task = ?fired.payload, deadline = fired.deadline, "timer fired");
        match fired.payload {
            Task::Show(item) => {
                let Some(trigger) = self.items.get_mut(item).and_then(|n| n.trigger.as_mut())
                else {
                    return;
                };
                trigger.show_timer.release(fired.handle);
                if !trigger.disabled {
                    self.open_from_pointer(item, fired.deadline);
                }
            }
            Task::Hide(item) => {
                let Some(node) = self.items.get_mut(item) else {
                    return;
                };
                if let Some(trigger) = node.trigger.as_mut() {
                    trigger.hide_timer.release(fired.handle);
                }
                let menu = node.menu;
                self.set_active(menu, None);
            }
            Task::CloseSubMenu(menu) => {
                let Some(node) = self.menus.get_mut(menu) else {
                    return;
                };
                node.close_timer.release(fired.handle);
                self.set_active(menu, None);
            }
        }
    }

    /// The single place where a menu's active value changes.
    fn set_active(&mut self, menu: MenuId, value: Option<&str>) {
        let Some(node) = self.menus.get_mut(menu) else {
            return;
        };
        let Some(change) = node.state.set_active(value) else {
            return;
        };
        let previous_item = change
            .previous
            .as_deref()
            .and_then(|v| node.values.get(v).copied());
        let current_item = change
            .current
            .as_deref()
            .and_then(|v| node.values.get(v).copied());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?menu,
            previous = ?change.previous,
            current = ?change.current,
            "menu value changed"
        );
        self.events.push(MenuEvent::ValueChanged {
            menu,
            previous: change.previous,
            current: change.current,
        });
        if let Some(item) = previous_item {
            self.close_nested(item);
            self.sync_content(item);
        }
        if let Some(item) = current_item {
            self.sync_content(item);
        }
    }

    /// Close every sub-menu nested under `item`, depth first.
    fn close_nested(&mut self, item: ItemId) {
        let Some(node) = self.items.get(item) else {
            return;
        };
        let sub_menus = node.sub_menus.clone();
        for sub in sub_menus {
            self.cancel_menu_timers(sub);
            self.set_active(sub, None);
        }
    }

    /// Bring `item`'s viewport size and overlay in line with its open state.
    fn sync_content(&mut self, item: ItemId) {
        let open = self.is_active(item);
        let update = self.overlay_config(item).map(|c| OverlayConfigUpdate {
            anchor: c.anchor,
            anchor_bounds: c.anchor_bounds,
            placement: c.placement,
        });
        let Some(node) = self.items.get_mut(item) else {
            return;
        };
        let Some(content) = node.content.as_mut() else {
            return;
        };
        if open {
            if let (Some(size), Some(viewport)) = (
                content.size,
                self.menus
                    .get_mut(node.menu)
                    .and_then(|m| m.viewport.as_mut()),
            ) {
                viewport.update_dimensions(size.width, size.height);
            }
        }
        let (Some(floating), Some(update)) = (content.floating.as_mut(), update) else {
            return;
        };
        let action = floating.portal.sync(open, &update);
        #[cfg(feature = "tracing")]
        tracing::debug!(?item, open, ?action, "overlay synchronized");
        if action == PortalAction::ScheduleCreate {
            self.deferred.defer(Microtask::CreateOverlay(item));
        }
    }

    fn overlay_config(&self, item: ItemId) -> Option<OverlayConfig> {
        let node = self.items.get(item)?;
        let options = node.content.as_ref()?.floating.as_ref()?.options;
        let orientation = self.orientation(node.menu)?;
        Some(OverlayConfig {
            anchor: item,
            anchor_bounds: node.trigger.as_ref().map_or(Rect::ZERO, |t| t.bounds),
            placement: options
                .placement
                .unwrap_or(Placement::default_for(orientation)),
            offset: options.offset,
            flip: options.flip,
            shift: options.shift,
            container: options.container,
        })
    }

    fn create_overlay(&mut self, item: ItemId) {
        let open = self.is_active(item);
        let Some(config) = self.overlay_config(item) else {
            return;
        };
        let Some(floating) = self
            .items
            .get_mut(item)
            .and_then(|n| n.content.as_mut())
            .and_then(|c| c.floating.as_mut())
        else {
            return;
        };
        let create = || self.factory.create(&config);
        #[cfg(feature = "tracing")]
        {
            let created = floating.portal.complete_create(open, create);
            tracing::debug!(?item, created, "deferred overlay creation");
        }
        #[cfg(not(feature = "tracing"))]
        floating.portal.complete_create(open, create);
    }
}

impl<F: OverlayFactory> Drop for NavigationMenu<F> {
    fn drop(&mut self) {
        for node in self.items.values_mut() {
            if let Some(floating) = node.content.as_mut().and_then(|c| c.floating.as_mut()) {
                floating.portal.destroy();
            }
        }
    }
}

fn reject<T>(error: RegistrationError) -> Result<T, RegistrationError> {
    #[cfg(feature = "tracing")]
    tracing::warn!(%error, "navigation menu registration rejected");
    Err(error)
}
