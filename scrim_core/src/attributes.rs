// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window attribute snapshots.
//!
//! [`WindowAttributes`] is a plain value. Reading it from a
//! [`WindowSurface`](crate::surface::WindowSurface) yields an independent
//! copy, and changing that copy has no effect until it is written back with
//! [`set_attributes`](crate::surface::WindowSurface::set_attributes).

use kurbo::Rect;

/// Alpha value of a fully transparent window.
pub const TRANSPARENT: f32 = 0.0;

/// Alpha value of a fully opaque window.
pub const OPAQUE: f32 = 1.0;

/// Visual configuration of an overlay window.
///
/// Only [`alpha`](Self::alpha) is interpreted by this crate; the remaining
/// fields are carried through unchanged so a commit never clobbers them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowAttributes {
    /// Window opacity, nominally in `0.0..=1.0` (0.0 is fully transparent).
    pub alpha: f32,
    /// Window frame in surface coordinates.
    pub frame: Rect,
    /// How strongly content behind the window is dimmed, `0.0..=1.0`.
    pub dim_amount: f32,
    /// Platform-specific window flag bits.
    pub flags: u32,
}

impl Default for WindowAttributes {
    fn default() -> Self {
        Self {
            alpha: OPAQUE,
            frame: Rect::ZERO,
            dim_amount: 0.0,
            flags: 0,
        }
    }
}

impl WindowAttributes {
    /// Returns a copy with `alpha` replaced and every other field preserved.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Returns whether the window is fully transparent.
    #[inline]
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.alpha == TRANSPARENT
    }
}
