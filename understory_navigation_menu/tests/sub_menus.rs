// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested sub-menus: delay inheritance, close timers, and cascading closes.

use understory_navigation_menu::{
    ContentOptions, ItemId, MenuConfig, MenuEvent, MenuId, NavigationMenu, Orientation,
    SUB_MENU_CLOSE_DELAY, SubMenuConfig, TriggerOptions,
};

fn item(nav: &mut NavigationMenu, menu: MenuId, value: &str) -> ItemId {
    let item = nav.add_item(menu, Some(value)).unwrap();
    nav.add_trigger(item, TriggerOptions::default()).unwrap();
    nav.add_content(item, ContentOptions::default()).unwrap();
    item
}

struct Fixture {
    nav: NavigationMenu,
    products: ItemId,
    sub: MenuId,
    widgets: ItemId,
    gadgets: ItemId,
}

fn fixture(config: SubMenuConfig) -> Fixture {
    let mut nav = NavigationMenu::new(MenuConfig::default());
    let root = nav.root();
    let products = item(&mut nav, root, "products");
    let sub = nav.add_sub_menu(products, config).unwrap();
    let widgets = item(&mut nav, sub, "widgets");
    let gadgets = item(&mut nav, sub, "gadgets");
    Fixture {
        nav,
        products,
        sub,
        widgets,
        gadgets,
    }
}

#[test]
fn delays_inherit_from_parent_until_overridden() {
    let mut f = fixture(SubMenuConfig::new());
    let root = f.nav.root();
    assert_eq!(f.nav.show_delay(f.sub), Some(200));
    assert_eq!(f.nav.hide_delay(f.sub), Some(150));
    assert_eq!(f.nav.close_delay(f.sub), Some(SUB_MENU_CLOSE_DELAY));

    f.nav.set_delays(root, Some(50), Some(40));
    assert_eq!(f.nav.show_delay(f.sub), Some(50));
    assert_eq!(f.nav.hide_delay(f.sub), Some(40));

    f.nav.set_delays(f.sub, Some(10), None);
    assert_eq!(f.nav.show_delay(f.sub), Some(10));
    assert_eq!(f.nav.hide_delay(f.sub), Some(40));

    let nested = f.nav.add_sub_menu(f.widgets, SubMenuConfig::new()).unwrap();
    assert_eq!(f.nav.show_delay(nested), Some(10));
    assert_eq!(f.nav.parent(nested), Some(f.widgets));
}

#[test]
fn explicit_sub_menu_delays_win() {
    let f = fixture(
        SubMenuConfig::new()
            .with_delays(0, 20)
            .with_orientation(Orientation::Vertical),
    );
    assert_eq!(f.nav.show_delay(f.sub), Some(0));
    assert_eq!(f.nav.hide_delay(f.sub), Some(20));
    assert_eq!(f.nav.orientation(f.sub), Some(Orientation::Vertical));
}

#[test]
fn nested_trigger_uses_inherited_show_delay() {
    let mut f = fixture(SubMenuConfig::new());
    let root = f.nav.root();
    f.nav.set_delays(root, Some(50), Some(40));
    f.nav.click(f.products);

    f.nav.pointer_enter(f.widgets, 1_000);
    f.nav.advance(1_049);
    assert_eq!(f.nav.value(f.sub), None);
    f.nav.advance(1_050);
    assert_eq!(f.nav.value(f.sub), Some("widgets"));
}

#[test]
fn entering_nested_trigger_keeps_parent_open() {
    let mut f = fixture(SubMenuConfig::new());
    f.nav.click(f.products);
    f.nav.pointer_leave(f.products, 0);
    assert!(f.nav.is_hide_pending(f.products));

    f.nav.pointer_enter(f.widgets, 10);
    assert!(!f.nav.is_hide_pending(f.products));
    f.nav.advance(1_000);
    assert!(f.nav.is_active(f.products));
    assert!(f.nav.is_active(f.widgets));
}

#[test]
fn sub_menu_close_timer() {
    let mut f = fixture(SubMenuConfig::new().with_close_delay(80));
    f.nav.click(f.products);
    f.nav.open(f.sub, "gadgets");

    f.nav.sub_menu_pointer_leave(f.sub, 0);
    assert!(f.nav.is_close_pending(f.sub));
    f.nav.sub_menu_pointer_enter(f.sub);
    assert!(!f.nav.is_close_pending(f.sub));
    f.nav.advance(500);
    assert!(f.nav.is_active(f.gadgets));

    f.nav.sub_menu_pointer_leave(f.sub, 1_000);
    f.nav.advance(1_079);
    assert!(f.nav.is_active(f.gadgets));
    f.nav.advance(1_080);
    assert_eq!(f.nav.value(f.sub), None);
    assert!(f.nav.is_active(f.products));
}

#[test]
fn root_has_no_close_timer() {
    let mut f = fixture(SubMenuConfig::new());
    let root = f.nav.root();
    f.nav.sub_menu_pointer_leave(root, 0);
    assert!(!f.nav.is_close_pending(root));
    assert_eq!(f.nav.next_deadline(), None);
}

#[test]
fn closing_parent_closes_nested_menus_and_their_timers() {
    let mut f = fixture(SubMenuConfig::new());
    let root = f.nav.root();
    f.nav.click(f.products);
    f.nav.click(f.widgets);
    f.nav.pointer_enter(f.gadgets, 0);
    assert!(f.nav.is_show_pending(f.gadgets));
    f.nav.drain_events();

    f.nav.click(f.products);
    assert_eq!(f.nav.value(root), None);
    assert_eq!(f.nav.value(f.sub), None);
    assert!(!f.nav.is_show_pending(f.gadgets));

    let events = f.nav.drain_events();
    assert_eq!(
        events,
        [
            MenuEvent::ValueChanged {
                menu: root,
                previous: Some("products".to_string()),
                current: None,
            },
            MenuEvent::ValueChanged {
                menu: f.sub,
                previous: Some("widgets".to_string()),
                current: None,
            },
        ]
    );
}

#[test]
fn select_link_in_sub_menu_closes_every_level() {
    let mut f = fixture(SubMenuConfig::new());
    let root = f.nav.root();
    f.nav.click(f.products);
    f.nav.click(f.widgets);
    f.nav.drain_events();

    f.nav.select_link(f.sub);
    assert_eq!(f.nav.value(root), None);
    assert_eq!(f.nav.value(f.sub), None);
    assert_eq!(
        f.nav.drain_events().first(),
        Some(&MenuEvent::LinkSelected { menu: f.sub })
    );
}

#[test]
fn escape_in_sub_menu_only_closes_that_level() {
    let mut f = fixture(SubMenuConfig::new());
    f.nav.click(f.products);
    f.nav.click(f.widgets);
    f.nav.drain_events();

    f.nav.content_escape(f.widgets);
    assert_eq!(f.nav.value(f.sub), None);
    assert!(f.nav.is_active(f.products));
    assert_eq!(
        f.nav.drain_events().last(),
        Some(&MenuEvent::FocusTrigger { item: f.widgets })
    );
}

#[test]
fn removing_sub_menu_drops_its_items() {
    let mut f = fixture(SubMenuConfig::new());
    f.nav.pointer_enter(f.widgets, 0);
    f.nav.sub_menu_pointer_leave(f.sub, 0);
    f.nav.remove_sub_menu(f.sub);

    assert_eq!(f.nav.next_deadline(), None);
    assert_eq!(f.nav.value_of(f.widgets), None);
    assert!(f.nav.sub_menus(f.products).is_empty());
    assert_eq!(f.nav.show_delay(f.sub), None);

    let root = f.nav.root();
    f.nav.remove_sub_menu(root);
    assert_eq!(f.nav.items(root), &[f.products]);
}

#[test]
fn removing_parent_item_removes_nested_menus() {
    let mut f = fixture(SubMenuConfig::new());
    f.nav.remove_item(f.products);
    assert_eq!(f.nav.orientation(f.sub), None);
    assert!(!f.nav.is_active(f.gadgets));
}
