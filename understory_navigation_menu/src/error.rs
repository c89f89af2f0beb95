// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration errors.

use alloc::string::String;

use crate::types::{ItemId, MenuId};

/// Wiring mistakes reported while registering parts of a navigation menu.
///
/// These indicate a bug in the host (for example, mounting content for an
/// item that was never registered). Input handling never produces them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The menu handle is stale or was never issued.
    #[error("menu {0:?} is not registered")]
    UnknownMenu(MenuId),
    /// The item handle is stale or was never issued.
    #[error("item {0:?} is not registered")]
    UnknownItem(ItemId),
    /// Another item of the same menu already uses this value.
    #[error("value `{0}` is already used by another item of this menu")]
    DuplicateValue(String),
    /// The item already owns a trigger.
    #[error("item {0:?} already has a trigger")]
    TriggerExists(ItemId),
    /// The item already owns a content panel.
    #[error("item {0:?} already has content")]
    ContentExists(ItemId),
}
