// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel state as seen by the overlay.
//!
//! The panel's state machine (drag tracking, open/close animation, and the
//! transitions between them) lives outside this crate. The overlay only ever
//! reads the current value and compares it against [`PanelState::Closed`].

use core::fmt;

/// The current position of the panel that the overlay belongs to.
///
/// There is intentionally no `Default` implementation: the starting state is
/// chosen by whoever drives the panel, and
/// [`OverlayController::new`](crate::controller::OverlayController::new)
/// takes it as an argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PanelState {
    /// The panel is showing.
    Open,
    /// The panel is fully dismissed.
    Closed,
}

impl PanelState {
    /// Returns `true` for [`PanelState::Closed`].
    #[inline]
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns a short lowercase label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn only_closed_is_closed() {
        assert!(PanelState::Closed.is_closed());
        assert!(!PanelState::Open.is_closed());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(PanelState::Open.to_string(), "open");
        assert_eq!(PanelState::Closed.to_string(), "closed");
    }
}
