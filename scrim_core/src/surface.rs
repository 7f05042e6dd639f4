// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window surface contract for platform integrations.
//!
//! Platform glue provides two pieces:
//!
//! - **Surface** — Implements [`WindowSurface`] over the native window
//!   (e.g. an `ANativeWindow` plus its layout parameters, a Wayland layer
//!   surface, an `HWND`) so attributes can be read and committed.
//!
//! - **Layout notifications** — Forwards the native "layout finished"
//!   callback to
//!   [`OverlayController::dispatch_layout`](crate::controller::OverlayController::dispatch_layout).
//!   This is not abstracted by a trait because how a platform reports layout
//!   differs too much between toolkits.
//!
//! # Crate boundaries
//!
//! `scrim_core` owns the data model, the subscription set, and the
//! synchronization rule. Platform crates depend on `scrim_core` and provide
//! the glue. Creating and destroying the native window is entirely theirs.

use crate::attributes::WindowAttributes;

/// Reads and commits the visual attributes of a native window.
///
/// Both operations are total: a surface that is being torn down should keep
/// answering with its last known attributes and ignore commits.
///
/// # Usage
///
/// ```rust,ignore
/// let mut attrs = surface.attributes();
/// attrs.alpha = 0.5;
/// // Nothing changes on screen until the snapshot is committed.
/// surface.set_attributes(attrs);
/// ```
pub trait WindowSurface {
    /// Returns a snapshot of the window's current attributes.
    fn attributes(&self) -> WindowAttributes;

    /// Commits `attributes` to the window, scheduling a re-render.
    fn set_attributes(&mut self, attributes: WindowAttributes);
}

/// A [`WindowSurface`] test double that records every commit.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) current: WindowAttributes,
    pub(crate) reads: core::cell::Cell<usize>,
    pub(crate) commits: alloc::vec::Vec<WindowAttributes>,
}

#[cfg(test)]
impl RecordingSurface {
    pub(crate) fn with_alpha(alpha: f32) -> Self {
        Self {
            current: WindowAttributes::default().with_alpha(alpha),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl WindowSurface for RecordingSurface {
    fn attributes(&self) -> WindowAttributes {
        self.reads.set(self.reads.get() + 1);
        self.current
    }

    fn set_attributes(&mut self, attributes: WindowAttributes) {
        self.current = attributes;
        self.commits.push(attributes);
    }
}
