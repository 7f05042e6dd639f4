// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout-completion payload.

use kurbo::Rect;

/// Delivered when a surface finishes a layout pass.
///
/// Carries the frame after the pass and the frame before it, in surface
/// coordinates. The opacity rule ignores both; they are here for platform
/// glue and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEvent {
    /// Frame after the layout pass.
    pub frame: Rect,
    /// Frame before the layout pass.
    pub old_frame: Rect,
}

impl LayoutEvent {
    /// Creates an event for a pass that moved the surface from `old_frame` to
    /// `frame`.
    #[inline]
    #[must_use]
    pub const fn new(frame: Rect, old_frame: Rect) -> Self {
        Self { frame, old_frame }
    }

    /// Creates an event for a pass that left the frame where it was.
    #[inline]
    #[must_use]
    pub const fn unchanged(frame: Rect) -> Self {
        Self {
            frame,
            old_frame: frame,
        }
    }

    /// Returns whether the pass changed the surface's frame.
    #[must_use]
    pub fn frame_changed(&self) -> bool {
        self.frame != self.old_frame
    }
}
