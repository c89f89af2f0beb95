// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger list registry and active-item indicator geometry.

use alloc::string::String;

use kurbo::{Insets, Rect};
use smallvec::SmallVec;

use crate::types::ItemId;

/// A trigger as seen by its menu's list.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerRecord {
    /// Owning item.
    pub item: ItemId,
    /// Generated trigger id.
    pub id: String,
    /// The item's value.
    pub value: String,
    /// Trigger bounds in the same space as the list bounds.
    pub bounds: Rect,
}

/// Ordered registry of the triggers mounted in one menu list.
///
/// Order is registration order, which may differ from visual order.
#[derive(Clone, Debug, Default)]
pub struct ListRegistry {
    records: SmallVec<[TriggerRecord; 8]>,
}

impl ListRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger at the end of the list.
    pub fn append(&mut self, record: TriggerRecord) {
        self.records.push(record);
    }

    /// Unregister the trigger of `item`. Returns the removed record.
    pub fn remove(&mut self, item: ItemId) -> Option<TriggerRecord> {
        let at = self.records.iter().position(|r| r.item == item)?;
        Some(self.records.remove(at))
    }

    /// Replace the bounds of `item`'s trigger. Returns `false` if it is not registered.
    pub fn update_bounds(&mut self, item: ItemId, bounds: Rect) -> bool {
        match self.records.iter_mut().find(|r| r.item == item) {
            Some(record) => {
                record.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// First record registered for `value`.
    pub fn find_by_value(&self, value: &str) -> Option<&TriggerRecord> {
        self.records.iter().find(|r| r.value == value)
    }

    /// Records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerRecord> + '_ {
        self.records.iter()
    }

    /// Number of registered triggers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no trigger is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Position and size of the active-item indicator, relative to the list's
/// padding box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct IndicatorGeometry {
    /// Offset from the padding box's left edge.
    pub left: f64,
    /// Offset from the padding box's top edge.
    pub top: f64,
    /// Trigger width.
    pub width: f64,
    /// Trigger height.
    pub height: f64,
}

impl IndicatorGeometry {
    /// The geometry as a rectangle in padding-box coordinates.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }
}

/// Place the indicator over `trigger`.
///
/// `list` and `trigger` are border-box rectangles in the same coordinate
/// space; `border` holds the list's border widths (only the left and top
/// widths matter).
///
/// ```rust
/// use kurbo::{Insets, Rect};
/// use understory_navigation_menu::indicator_geometry;
///
/// let list = Rect::new(100.0, 50.0, 500.0, 90.0);
/// let trigger = Rect::new(180.0, 52.0, 260.0, 88.0);
/// let g = indicator_geometry(list, Insets::uniform(2.0), trigger);
/// assert_eq!((g.left, g.top, g.width, g.height), (78.0, 0.0, 80.0, 36.0));
/// ```
pub fn indicator_geometry(list: Rect, border: Insets, trigger: Rect) -> IndicatorGeometry {
    IndicatorGeometry {
        left: trigger.x0 - list.x0 - border.x0,
        top: trigger.y0 - list.y0 - border.y0,
        width: trigger.width(),
        height: trigger.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn record(idx: u32, value: &str, x: f64) -> TriggerRecord {
        TriggerRecord {
            item: ItemId(idx, 1),
            id: value.to_string(),
            value: value.to_string(),
            bounds: Rect::new(x, 0.0, x + 50.0, 20.0),
        }
    }

    #[test]
    fn registration_order_is_kept_across_removal() {
        let mut list = ListRegistry::new();
        list.append(record(0, "a", 0.0));
        list.append(record(1, "b", 50.0));
        list.append(record(2, "c", 100.0));
        assert!(list.remove(ItemId(1, 1)).is_some());
        assert!(list.remove(ItemId(1, 1)).is_none());
        let values: alloc::vec::Vec<_> = list.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["a", "c"]);
    }

    #[test]
    fn update_bounds_moves_lookup_result() {
        let mut list = ListRegistry::new();
        list.append(record(0, "a", 0.0));
        assert!(list.update_bounds(ItemId(0, 1), Rect::new(5.0, 0.0, 25.0, 10.0)));
        assert!(!list.update_bounds(ItemId(9, 1), Rect::ZERO));
        assert_eq!(
            list.find_by_value("a").unwrap().bounds,
            Rect::new(5.0, 0.0, 25.0, 10.0)
        );
        assert!(list.find_by_value("b").is_none());
    }

    #[test]
    fn geometry_without_border() {
        let g = indicator_geometry(
            Rect::new(0.0, 0.0, 300.0, 40.0),
            Insets::ZERO,
            Rect::new(120.0, 4.0, 200.0, 36.0),
        );
        assert_eq!(g.to_rect(), Rect::new(120.0, 4.0, 200.0, 36.0));
    }
}
