// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating content: deferred creation, re-anchoring, hiding, and teardown.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use understory_navigation_menu::{
    ContentOptions, ItemId, MenuConfig, NavigationMenu, Orientation, Overlay, OverlayConfig,
    OverlayConfigUpdate, OverlayFactory, OverlayOptions, Placement, SubMenuConfig,
    TriggerOptions,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Create(ItemId, Placement),
    Show(ItemId),
    Hide(ItemId),
    Update(ItemId, Rect),
    Position(ItemId),
    Destroy(ItemId),
}

type Log = Rc<RefCell<Vec<Call>>>;

#[derive(Default)]
struct Recorder {
    log: Log,
}

struct Recorded {
    anchor: ItemId,
    open: bool,
    log: Log,
}

impl OverlayFactory for Recorder {
    type Overlay = Recorded;

    fn create(&mut self, config: &OverlayConfig) -> Recorded {
        self.log
            .borrow_mut()
            .push(Call::Create(config.anchor, config.placement));
        Recorded {
            anchor: config.anchor,
            open: false,
            log: self.log.clone(),
        }
    }
}

impl Overlay for Recorded {
    fn show(&mut self) {
        self.open = true;
        self.log.borrow_mut().push(Call::Show(self.anchor));
    }

    fn hide_immediate(&mut self) {
        self.open = false;
        self.log.borrow_mut().push(Call::Hide(self.anchor));
    }

    fn update_config(&mut self, update: &OverlayConfigUpdate) {
        self.log
            .borrow_mut()
            .push(Call::Update(update.anchor, update.anchor_bounds));
    }

    fn update_position(&mut self) {
        self.log.borrow_mut().push(Call::Position(self.anchor));
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push(Call::Destroy(self.anchor));
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

fn floating(nav: &mut NavigationMenu<Recorder>, value: &str, options: OverlayOptions) -> ItemId {
    let root = nav.root();
    let item = nav.add_item(root, Some(value)).unwrap();
    nav.add_trigger(
        item,
        TriggerOptions {
            disabled: false,
            bounds: Rect::new(0.0, 0.0, 80.0, 30.0),
        },
    )
    .unwrap();
    nav.add_content(
        item,
        ContentOptions {
            overlay: Some(options),
        },
    )
    .unwrap();
    item
}

fn setup() -> (NavigationMenu<Recorder>, Log) {
    let recorder = Recorder::default();
    let log = recorder.log.clone();
    (NavigationMenu::with_overlays(MenuConfig::default(), recorder), log)
}

#[test]
fn creation_is_deferred_until_the_operation_completes() {
    let (mut nav, log) = setup();
    let a = floating(&mut nav, "a", OverlayOptions::default());

    nav.click(a);
    assert!(log.borrow().is_empty());
    assert!(nav.overlay(a).is_none());

    nav.run_deferred();
    assert_eq!(
        *log.borrow(),
        [
            Call::Create(a, Placement::BottomStart),
            Call::Show(a),
            Call::Position(a),
        ]
    );
    assert!(nav.overlay(a).is_some_and(Overlay::is_open));
}

#[test]
fn repeated_open_requests_create_once() {
    let (mut nav, log) = setup();
    let a = floating(&mut nav, "a", OverlayOptions::default());

    nav.click(a);
    nav.click(a);
    nav.click(a);
    nav.run_deferred();
    nav.run_deferred();

    let creates = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::Create(..)))
        .count();
    assert_eq!(creates, 1);
    assert!(nav.overlay(a).is_some_and(Overlay::is_open));
}

#[test]
fn creation_is_dropped_if_closed_first() {
    let (mut nav, log) = setup();
    let a = floating(&mut nav, "a", OverlayOptions::default());

    nav.click(a);
    nav.click(a);
    nav.run_deferred();
    assert!(log.borrow().is_empty());
    assert!(nav.overlay(a).is_none());

    nav.click(a);
    nav.run_deferred();
    assert!(nav.overlay(a).is_some());
}

#[test]
fn reopening_reanchors_instead_of_recreating() {
    let (mut nav, log) = setup();
    let a = floating(&mut nav, "a", OverlayOptions::default());
    let b = floating(&mut nav, "b", OverlayOptions::default());

    nav.click(a);
    nav.run_deferred();
    nav.click(b);
    nav.run_deferred();
    assert!(nav.overlay(a).is_some_and(|o| !o.is_open()));
    assert!(log.borrow().contains(&Call::Hide(a)));

    log.borrow_mut().clear();
    nav.set_trigger_bounds(a, Rect::new(100.0, 0.0, 180.0, 30.0));
    nav.click(a);
    nav.run_deferred();
    assert_eq!(
        *log.borrow(),
        [
            Call::Hide(b),
            Call::Update(a, Rect::new(100.0, 0.0, 180.0, 30.0)),
            Call::Show(a),
            Call::Position(a),
        ]
    );
}

#[test]
fn hover_open_creates_overlay_within_advance() {
    let (mut nav, log) = setup();
    let a = floating(&mut nav, "a", OverlayOptions::default());

    nav.pointer_enter(a, 0);
    nav.advance(200);
    assert!(nav.overlay(a).is_some_and(Overlay::is_open));
    assert_eq!(log.borrow().first(), Some(&Call::Create(a, Placement::BottomStart)));
}

#[test]
fn placement_follows_options_and_orientation() {
    let (mut nav, log) = setup();
    let a = floating(
        &mut nav,
        "a",
        OverlayOptions {
            placement: Some(Placement::TopEnd),
            ..OverlayOptions::default()
        },
    );
    nav.click(a);
    nav.run_deferred();
    assert_eq!(log.borrow()[0], Call::Create(a, Placement::TopEnd));

    let sub = nav
        .add_sub_menu(a, SubMenuConfig::new().with_orientation(Orientation::Vertical))
        .unwrap();
    let nested = nav.add_item(sub, Some("nested")).unwrap();
    nav.add_trigger(nested, TriggerOptions::default()).unwrap();
    nav.add_content(
        nested,
        ContentOptions {
            overlay: Some(OverlayOptions::default()),
        },
    )
    .unwrap();
    log.borrow_mut().clear();
    nav.click(nested);
    nav.run_deferred();
    assert_eq!(log.borrow()[0], Call::Create(nested, Placement::RightStart));
}

#[test]
fn removal_and_drop_destroy_overlays() {
    let (mut nav, log) = setup();
    let a = floating(&mut nav, "a", OverlayOptions::default());
    let b = floating(&mut nav, "b", OverlayOptions::default());
    nav.click(a);
    nav.run_deferred();
    nav.click(b);
    nav.run_deferred();

    nav.remove_item(a);
    assert!(log.borrow().contains(&Call::Destroy(a)));
    assert!(!log.borrow().contains(&Call::Destroy(b)));

    drop(nav);
    assert_eq!(log.borrow().last(), Some(&Call::Destroy(b)));
}
