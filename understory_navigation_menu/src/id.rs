// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide unique id generation.

use alloc::format;
use alloc::string::String;
use core::sync::atomic::{AtomicUsize, Ordering};

static ITEM_COUNTER: AtomicUsize = AtomicUsize::new(0);
static TRIGGER_COUNTER: AtomicUsize = AtomicUsize::new(0);
static CONTENT_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Kind of a generated id.
///
/// Each kind has one counter shared by every controller in the process, so
/// ids read as `"{prefix}-{n}"` and never repeat across menus.
///
/// ```rust
/// use understory_navigation_menu::IdKind;
///
/// let a = IdKind::Content.next_id();
/// let b = IdKind::Content.next_id();
/// assert!(a.starts_with("nav-menu-content-"));
/// assert_ne!(a, b);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// Generated item values.
    Item,
    /// Trigger ids.
    Trigger,
    /// Content ids, referenced by their trigger.
    Content,
}

impl IdKind {
    /// Prefix of ids of this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Item => "nav-menu-item",
            Self::Trigger => "nav-menu-trigger",
            Self::Content => "nav-menu-content",
        }
    }

    fn counter(self) -> &'static AtomicUsize {
        match self {
            Self::Item => &ITEM_COUNTER,
            Self::Trigger => &TRIGGER_COUNTER,
            Self::Content => &CONTENT_COUNTER,
        }
    }

    /// Produce the next id of this kind.
    pub fn next_id(self) -> String {
        let n = self.counter().fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix())
    }
}
