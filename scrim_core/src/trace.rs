// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout dispatch.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`OverlayController::dispatch_layout`](crate::controller::OverlayController::dispatch_layout)
//! and the [`LayoutCompletionListener`](crate::listener::LayoutCompletionListener)
//! call at each step. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use kurbo::Rect;

use crate::layout::{LayoutEvent, ListenerToken};
use crate::listener::FireOutcome;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a completed layout pass is dispatched to listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPassEvent {
    /// Monotonic layout pass counter, starting at 1.
    pub pass_index: u64,
    /// Frame after the pass.
    pub frame: Rect,
    /// Frame before the pass.
    pub old_frame: Rect,
    /// Number of listeners registered when the pass started.
    pub listeners: u32,
}

impl LayoutPassEvent {
    /// Creates a `LayoutPassEvent` from a [`LayoutEvent`] plus the dispatch
    /// bookkeeping the event itself does not carry.
    #[must_use]
    pub fn new(pass_index: u64, event: &LayoutEvent, listeners: usize) -> Self {
        Self {
            pass_index,
            frame: event.frame,
            old_frame: event.old_frame,
            listeners: u32::try_from(listeners).unwrap_or(u32::MAX),
        }
    }
}

/// Emitted when a firing listener removes its own registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeregisterEvent {
    /// Layout pass during which the listener fired.
    pub pass_index: u64,
    /// The listener's registration.
    pub token: ListenerToken,
    /// Whether the registration was still live before removal.
    pub was_subscribed: bool,
}

/// Emitted once per firing with the result of the opacity rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaSyncEvent {
    /// Layout pass during which the listener fired.
    pub pass_index: u64,
    /// The listener's registration.
    pub token: ListenerToken,
    /// What the listener did.
    pub outcome: FireOutcome,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from layout dispatch.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a layout pass is dispatched.
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        _ = e;
    }

    /// Called when a listener deregisters itself.
    fn on_deregister(&mut self, e: &DeregisterEvent) {
        _ = e;
    }

    /// Called when a listener finishes applying the opacity rule.
    fn on_alpha_sync(&mut self, e: &AlphaSyncEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LayoutPassEvent`].
    #[inline]
    pub fn layout_pass(&mut self, e: &LayoutPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DeregisterEvent`].
    #[inline]
    pub fn deregister(&mut self, e: &DeregisterEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_deregister(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AlphaSyncEvent`].
    #[inline]
    pub fn alpha_sync(&mut self, e: &AlphaSyncEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_alpha_sync(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
