// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subscription identity.

use core::fmt;

/// A handle to one registration in a [`LayoutListeners`](super::LayoutListeners) set.
///
/// Contains both a slot index and a generation counter so that a token kept
/// after unsubscribing can be told apart from a later registration that
/// reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken {
    /// Slot index into the set's storage.
    pub(crate) idx: u32,
    /// Generation counter; must match the set's generation for this slot.
    pub(crate) generation: u32,
}

impl ListenerToken {
    /// Builds a token from its raw parts.
    ///
    /// Intended for decoders that replay recorded diagnostics; a token built
    /// this way only matches a live registration if both parts agree.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ListenerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerToken({}@gen{})", self.idx, self.generation)
    }
}
