// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeps a floating overlay window's opacity in step with its panel state.
//!
//! `scrim_core` covers the narrow piece of overlay plumbing that runs right
//! after an overlay surface is shown: a one-shot listener waits for the first
//! completed layout pass and, if the panel is closed at that moment, makes the
//! window fully transparent. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   Platform layout pass
//!       │
//!       ▼
//!   LayoutEvent ──► OverlayController::dispatch_layout()
//!                        │
//!                        ▼
//!   LayoutCompletionListener::on_layout_complete()
//!       1. unsubscribe(own token)
//!       2. read PanelState
//!       3. Closed? read WindowAttributes, alpha = 0.0
//!       4. changed? WindowSurface::set_attributes()
//! ```
//!
//! **[`panel`]** — The externally owned [`PanelState`](panel::PanelState).
//!
//! **[`attributes`]** — [`WindowAttributes`](attributes::WindowAttributes),
//! a copy-on-read snapshot of a window's visual configuration.
//!
//! **[`surface`]** — The [`WindowSurface`](surface::WindowSurface) trait that
//! platform glue implements to read and commit attributes.
//!
//! **[`layout`]** — Generational [`ListenerToken`](layout::ListenerToken)
//! handles and the [`LayoutListeners`](layout::LayoutListeners) subscription
//! set.
//!
//! **[`controller`]** — [`OverlayController`](controller::OverlayController),
//! which owns the surface, the panel state, and the subscription set.
//!
//! **[`listener`]** — The one-shot
//! [`LayoutCompletionListener`](listener::LayoutCompletionListener).
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

// `ControllerId` allocation needs `AtomicU32::fetch_add`.
#[cfg(not(target_has_atomic = "32"))]
compile_error!("scrim_core requires a target with 32-bit atomic read-modify-write operations");

pub mod attributes;
pub mod controller;
pub mod layout;
pub mod listener;
pub mod panel;
pub mod surface;
pub mod trace;
