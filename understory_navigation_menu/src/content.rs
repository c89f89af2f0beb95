// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-content state: id, last measured size, and the optional overlay.

use alloc::string::String;

use kurbo::Size;

use crate::config::OverlayOptions;
use crate::portal::PortalCoordinator;

/// Floating panel bookkeeping for content configured with overlay options.
#[derive(Debug)]
pub(crate) struct FloatingContent<O> {
    pub(crate) options: OverlayOptions,
    pub(crate) portal: PortalCoordinator<O>,
}

#[derive(Debug)]
pub(crate) struct ContentState<O> {
    pub(crate) id: String,
    /// Last size reported by the measurement collaborator.
    pub(crate) size: Option<Size>,
    pub(crate) floating: Option<FloatingContent<O>>,
}

impl<O> ContentState<O> {
    pub(crate) fn new(id: String, overlay: Option<OverlayOptions>) -> Self {
        Self {
            id,
            size: None,
            floating: overlay.map(|options| FloatingContent {
                options,
                portal: PortalCoordinator::new(),
            }),
        }
    }
}
