// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot layout-to-opacity synchronization.
//!
//! A [`LayoutCompletionListener`] is registered by an
//! [`OverlayController`] and fires on the next completed layout pass. Firing
//! runs these steps, in order, on the dispatching thread:
//!
//! 1. Unsubscribe its own token. This happens before anything is inspected,
//!    so the listener can never run twice for one registration.
//! 2. Read the controller's [`PanelState`].
//! 3. If the panel is not closed, stop without touching the window.
//! 4. Otherwise read the window attributes and build a copy with
//!    `alpha = 0.0`.
//! 5. Commit that copy only if its alpha differs from the one read, so an
//!    already transparent window is not re-rendered.

use crate::attributes::TRANSPARENT;
use crate::controller::{ControllerId, OverlayController};
use crate::layout::{LayoutEvent, ListenerToken};
use crate::panel::PanelState;
use crate::surface::WindowSurface;
use crate::trace::{AlphaSyncEvent, DeregisterEvent, Tracer};

/// What a listener did when it fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FireOutcome {
    /// The registration was already gone (it fired before, or its owner
    /// cancelled it), so nothing past deregistration ran.
    Stale,
    /// The panel was not closed; the window was left alone.
    PanelNotClosed(PanelState),
    /// The panel was closed and the window was already fully transparent.
    AlreadyTransparent,
    /// The panel was closed and the window was made fully transparent.
    Committed {
        /// Alpha the window had before the commit.
        previous_alpha: f32,
    },
}

impl FireOutcome {
    /// Returns whether this firing committed new attributes to the surface.
    #[must_use]
    pub const fn committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Hides a closed panel's overlay after the first layout pass.
///
/// Holds only the [`ControllerId`] it was registered by, never a reference to
/// the controller itself; the controller is handed in when the listener fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutCompletionListener {
    controller: ControllerId,
    token: ListenerToken,
}

impl LayoutCompletionListener {
    pub(crate) const fn new(controller: ControllerId, token: ListenerToken) -> Self {
        Self { controller, token }
    }

    /// Returns the id of the controller this listener is bound to.
    #[inline]
    #[must_use]
    pub const fn controller(&self) -> ControllerId {
        self.controller
    }

    /// Returns this listener's registration token.
    #[inline]
    #[must_use]
    pub const fn token(&self) -> ListenerToken {
        self.token
    }

    /// Handles a completed layout pass.
    ///
    /// The event's geometry does not influence the outcome.
    ///
    /// # Panics
    ///
    /// Panics if `controller` is not the controller this listener was
    /// registered with.
    pub fn on_layout_complete<S: WindowSurface>(
        &self,
        controller: &mut OverlayController<S>,
        _event: &LayoutEvent,
        tracer: &mut Tracer<'_>,
    ) -> FireOutcome {
        assert_eq!(
            controller.id(),
            self.controller,
            "listener fired against a controller it is not registered with"
        );
        let pass_index = controller.layout_passes();

        let was_subscribed = controller.deregister_layout_listener(self.token);
        tracer.deregister(&DeregisterEvent {
            pass_index,
            token: self.token,
            was_subscribed,
        });

        let outcome = if was_subscribed {
            Self::sync_alpha(controller)
        } else {
            FireOutcome::Stale
        };

        tracer.alpha_sync(&AlphaSyncEvent {
            pass_index,
            token: self.token,
            outcome,
        });
        outcome
    }

    fn sync_alpha<S: WindowSurface>(controller: &mut OverlayController<S>) -> FireOutcome {
        let state = controller.current_panel_state();
        if !state.is_closed() {
            return FireOutcome::PanelNotClosed(state);
        }

        let current = controller.read_attributes();
        let target = current.with_alpha(TRANSPARENT);
        if target.alpha == current.alpha {
            return FireOutcome::AlreadyTransparent;
        }
        controller.write_attributes(target);
        FireOutcome::Committed {
            previous_alpha: current.alpha,
        }
    }
}
