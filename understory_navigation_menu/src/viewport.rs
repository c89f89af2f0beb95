// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared viewport sized after the active content panel.

use kurbo::Size;

/// Measured size of the active content, as plain numbers for the render layer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportState {
    size: Option<Size>,
}

impl ViewportState {
    /// Create a viewport that has not been measured yet.
    pub const fn new() -> Self {
        Self { size: None }
    }

    /// Record the latest measurement.
    pub fn update_dimensions(&mut self, width: f64, height: f64) {
        self.size = Some(Size::new(width, height));
    }

    /// Latest measured size, if any.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Latest measured width, if any.
    pub fn width(&self) -> Option<f64> {
        self.size.map(|s| s.width)
    }

    /// Latest measured height, if any.
    pub fn height(&self) -> Option<f64> {
        self.size.map(|s| s.height)
    }
}
