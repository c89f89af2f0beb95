// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion direction derivation for content transitions.

use crate::types::MotionDirection;

/// Derive the animation direction of `owner`'s content when the active entry
/// of `ordered` moves from `previous` to `current`.
///
/// Returns `None` when opening from closed, closing to closed, when either
/// entry is not in `ordered`, or when `owner` takes no part in the transition.
/// The result depends only on the arguments.
///
/// ```rust
/// use understory_navigation_menu::{MotionDirection, motion_direction};
///
/// let items = ["a", "b", "c"];
/// assert_eq!(motion_direction(&items, Some(&"a"), Some(&"c"), &"c"), Some(MotionDirection::FromEnd));
/// assert_eq!(motion_direction(&items, Some(&"a"), Some(&"c"), &"a"), Some(MotionDirection::ToStart));
/// assert_eq!(motion_direction(&items, None, Some(&"c"), &"c"), None);
/// ```
pub fn motion_direction<T: PartialEq>(
    ordered: &[T],
    previous: Option<&T>,
    current: Option<&T>,
    owner: &T,
) -> Option<MotionDirection> {
    let (previous, current) = (previous?, current?);
    let previous_index = ordered.iter().position(|v| v == previous)?;
    let current_index = ordered.iter().position(|v| v == current)?;
    let forward = current_index > previous_index;
    if owner == current {
        Some(if forward {
            MotionDirection::FromEnd
        } else {
            MotionDirection::FromStart
        })
    } else if owner == previous {
        Some(if forward {
            MotionDirection::ToStart
        } else {
            MotionDirection::ToEnd
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [&str; 3] = ["a", "b", "c"];

    #[test]
    fn backward_transition() {
        assert_eq!(
            motion_direction(&ITEMS, Some(&"c"), Some(&"a"), &"a"),
            Some(MotionDirection::FromStart)
        );
        assert_eq!(
            motion_direction(&ITEMS, Some(&"c"), Some(&"a"), &"c"),
            Some(MotionDirection::ToEnd)
        );
    }

    #[test]
    fn bystanders_and_stale_entries_get_nothing() {
        assert_eq!(motion_direction(&ITEMS, Some(&"a"), Some(&"c"), &"b"), None);
        assert_eq!(motion_direction(&ITEMS, Some(&"a"), Some(&"z"), &"z"), None);
        assert_eq!(motion_direction(&ITEMS, Some(&"a"), None, &"a"), None);
    }
}
