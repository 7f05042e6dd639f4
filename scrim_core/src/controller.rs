// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay controller.
//!
//! [`OverlayController`] ties together the three things the opacity rule
//! needs: the native window (through [`WindowSurface`]), the panel state that
//! an external state machine keeps current, and the set of listeners waiting
//! for the window's next completed layout pass.
//!
//! # Dispatch
//!
//! Platform glue calls [`dispatch_layout`](OverlayController::dispatch_layout)
//! from its native layout callback:
//!
//! ```rust,ignore
//! // When the overlay is shown:
//! controller.register_layout_listener();
//!
//! // From the toolkit's "layout finished" callback:
//! let event = LayoutEvent::new(new_frame, old_frame);
//! controller.dispatch_layout(&event, &mut Tracer::none());
//!
//! // From the panel's state machine:
//! controller.set_panel_state(PanelState::Closed);
//! ```

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::attributes::WindowAttributes;
use crate::layout::{LayoutEvent, LayoutListeners, ListenerToken};
use crate::listener::LayoutCompletionListener;
use crate::panel::PanelState;
use crate::surface::WindowSurface;
use crate::trace::{LayoutPassEvent, Tracer};

static NEXT_CONTROLLER_ID: AtomicU32 = AtomicU32::new(0);

/// Identifies an [`OverlayController`] for the lifetime of the process.
///
/// Listeners store this instead of a reference to their controller.
///
/// Ids come from a process-wide 32-bit counter that wraps after 2^32
/// controllers have been created. Two live controllers only collide if one
/// outlives that many later constructions.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerId(u32);

impl ControllerId {
    fn next() -> Self {
        Self(NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControllerId({})", self.0)
    }
}

/// Owns an overlay window, the panel state it mirrors, and its layout
/// listeners.
#[derive(Debug)]
pub struct OverlayController<S> {
    id: ControllerId,
    surface: S,
    panel_state: PanelState,
    layout: LayoutListeners<LayoutCompletionListener>,
    layout_passes: u64,
}

impl<S: WindowSurface> OverlayController<S> {
    /// Creates a controller for `surface`.
    ///
    /// `panel_state` is whatever the panel's state machine currently reports;
    /// the controller makes no assumption about where a panel starts.
    #[must_use]
    pub fn new(surface: S, panel_state: PanelState) -> Self {
        Self {
            id: ControllerId::next(),
            surface,
            panel_state,
            layout: LayoutListeners::new(),
            layout_passes: 0,
        }
    }

    /// Returns this controller's id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ControllerId {
        self.id
    }

    // -- Panel state --

    /// Returns the panel state as of this call.
    #[inline]
    #[must_use]
    pub fn current_panel_state(&self) -> PanelState {
        self.panel_state
    }

    /// Records a new panel state. Called by the panel's state machine.
    pub fn set_panel_state(&mut self, state: PanelState) {
        self.panel_state = state;
    }

    // -- Window attributes --

    /// Returns a snapshot of the window's attributes.
    #[must_use]
    pub fn read_attributes(&self) -> WindowAttributes {
        self.surface.attributes()
    }

    /// Commits `attributes` to the window.
    pub fn write_attributes(&mut self, attributes: WindowAttributes) {
        self.surface.set_attributes(attributes);
    }

    // -- Layout listeners --

    /// Registers a one-shot listener for the window's next completed layout
    /// pass and returns its token.
    pub fn register_layout_listener(&mut self) -> ListenerToken {
        let id = self.id;
        self.layout
            .subscribe_with(|token| LayoutCompletionListener::new(id, token))
    }

    /// Cancels a registration.
    ///
    /// Returns `true` if the listener was still registered. Cancelling a
    /// listener that already fired, or cancelling twice, is a no-op.
    pub fn deregister_layout_listener(&mut self, token: ListenerToken) -> bool {
        self.layout.unsubscribe(token)
    }

    /// Returns whether `token` is still waiting for a layout pass.
    #[must_use]
    pub fn is_listener_registered(&self, token: ListenerToken) -> bool {
        self.layout.is_subscribed(token)
    }

    /// Returns the listener registered under `token`, if it has not fired.
    #[must_use]
    pub fn layout_listener(&self, token: ListenerToken) -> Option<LayoutCompletionListener> {
        self.layout.get(token).copied()
    }

    /// Returns how many listeners are waiting for a layout pass.
    #[must_use]
    pub fn registered_listeners(&self) -> usize {
        self.layout.len()
    }

    /// Returns how many layout passes have been dispatched.
    #[must_use]
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Delivers a completed layout pass to every registered listener.
    ///
    /// The set of listeners is captured before the first one runs. A listener
    /// removed during the pass (by itself or by an earlier listener) is
    /// skipped. Returns the number of listeners that fired.
    pub fn dispatch_layout(&mut self, event: &LayoutEvent, tracer: &mut Tracer<'_>) -> usize {
        self.layout_passes += 1;
        let pending = self.layout.tokens();
        tracer.layout_pass(&LayoutPassEvent::new(
            self.layout_passes,
            event,
            pending.len(),
        ));

        let mut fired = 0;
        for token in pending {
            let Some(listener) = self.layout_listener(token) else {
                continue;
            };
            listener.on_layout_complete(self, event, tracer);
            fired += 1;
        }
        fired
    }

    // -- Surface access --

    /// Returns the underlying surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the underlying surface mutably.
    ///
    /// Changes made through this reference bypass the controller entirely.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the controller and returns the surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::surface::RecordingSurface;

    fn first_layout() -> LayoutEvent {
        LayoutEvent::new(Rect::new(0.0, 0.0, 1080.0, 2400.0), Rect::ZERO)
    }

    fn controller(alpha: f32, state: PanelState) -> OverlayController<RecordingSurface> {
        OverlayController::new(RecordingSurface::with_alpha(alpha), state)
    }

    #[test]
    fn controllers_get_distinct_ids() {
        let a = controller(1.0, PanelState::Open);
        let b = controller(1.0, PanelState::Open);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn registered_listener_is_bound_to_controller() {
        let mut c = controller(1.0, PanelState::Open);
        let token = c.register_layout_listener();
        let listener = c.layout_listener(token).expect("listener is registered");
        assert_eq!(listener.controller(), c.id());
        assert_eq!(listener.token(), token);
        assert!(c.is_listener_registered(token));
    }

    #[test]
    fn closed_opaque_commits_once() {
        let mut c = controller(1.0, PanelState::Closed);
        let token = c.register_layout_listener();

        assert_eq!(c.dispatch_layout(&first_layout(), &mut Tracer::none()), 1);
        assert_eq!(c.read_attributes().alpha, 0.0);
        assert_eq!(c.surface().commits.len(), 1);
        assert!(!c.is_listener_registered(token));
    }

    #[test]
    fn closed_transparent_never_commits() {
        let mut c = controller(0.0, PanelState::Closed);
        let token = c.register_layout_listener();

        assert_eq!(c.dispatch_layout(&first_layout(), &mut Tracer::none()), 1);
        assert_eq!(c.read_attributes().alpha, 0.0);
        assert!(c.surface().commits.is_empty());
        assert!(!c.is_listener_registered(token));
    }

    #[test]
    fn open_never_commits() {
        let mut c = controller(1.0, PanelState::Open);
        let token = c.register_layout_listener();

        assert_eq!(c.dispatch_layout(&first_layout(), &mut Tracer::none()), 1);
        assert_eq!(c.read_attributes().alpha, 1.0);
        assert!(c.surface().commits.is_empty());
        assert!(!c.is_listener_registered(token));
    }

    #[test]
    fn redispatch_has_no_effect() {
        let mut c = controller(1.0, PanelState::Closed);
        c.register_layout_listener();
        assert_eq!(c.dispatch_layout(&first_layout(), &mut Tracer::none()), 1);

        // Restore opacity so a second firing would show up as a commit.
        c.write_attributes(c.read_attributes().with_alpha(1.0));
        let commits = c.surface().commits.len();

        let relayout = LayoutEvent::unchanged(Rect::new(0.0, 0.0, 1080.0, 2400.0));
        assert_eq!(c.dispatch_layout(&relayout, &mut Tracer::none()), 0);
        assert_eq!(c.surface().commits.len(), commits);
        assert_eq!(c.read_attributes().alpha, 1.0);
        assert_eq!(c.layout_passes(), 2);
    }

    #[test]
    fn deregister_before_layout_cancels() {
        let mut c = controller(1.0, PanelState::Closed);
        let token = c.register_layout_listener();
        assert!(c.deregister_layout_listener(token));
        assert!(!c.deregister_layout_listener(token));

        assert_eq!(c.dispatch_layout(&first_layout(), &mut Tracer::none()), 0);
        assert!(c.surface().commits.is_empty());
    }

    #[test]
    fn set_panel_state_is_visible_immediately() {
        let mut c = controller(1.0, PanelState::Open);
        c.set_panel_state(PanelState::Closed);
        assert_eq!(c.current_panel_state(), PanelState::Closed);
        c.set_panel_state(PanelState::Open);
        assert_eq!(c.current_panel_state(), PanelState::Open);
    }

    #[test]
    fn into_surface_returns_committed_state() {
        let mut c = controller(1.0, PanelState::Closed);
        c.register_layout_listener();
        c.dispatch_layout(&first_layout(), &mut Tracer::none());
        let surface = c.into_surface();
        assert!(surface.current.is_transparent());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn dispatch_emits_trace_events_in_order() {
        use alloc::vec::Vec;

        use crate::listener::FireOutcome;
        use crate::trace::{AlphaSyncEvent, DeregisterEvent, TraceSink};

        #[derive(Debug, PartialEq)]
        enum Seen {
            Pass(u64, u32),
            Deregister(bool),
            Sync(FireOutcome),
        }

        #[derive(Default)]
        struct RecordingSink {
            seen: Vec<Seen>,
        }
        impl TraceSink for RecordingSink {
            fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
                self.seen.push(Seen::Pass(e.pass_index, e.listeners));
            }
            fn on_deregister(&mut self, e: &DeregisterEvent) {
                self.seen.push(Seen::Deregister(e.was_subscribed));
            }
            fn on_alpha_sync(&mut self, e: &AlphaSyncEvent) {
                self.seen.push(Seen::Sync(e.outcome));
            }
        }

        let mut c = controller(0.8, PanelState::Closed);
        c.register_layout_listener();

        let mut sink = RecordingSink::default();
        let mut tracer = Tracer::new(&mut sink);
        c.dispatch_layout(&first_layout(), &mut tracer);
        c.dispatch_layout(&first_layout(), &mut tracer);
        drop(tracer);

        assert_eq!(
            sink.seen,
            [
                Seen::Pass(1, 1),
                Seen::Deregister(true),
                Seen::Sync(FireOutcome::Committed {
                    previous_alpha: 0.8
                }),
                Seen::Pass(2, 0),
            ]
        );
    }
}
