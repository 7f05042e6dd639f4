// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout-completion subscriptions.
//!
//! A surface reports each finished layout pass as a [`LayoutEvent`]. Interested
//! parties subscribe to those notifications through a [`LayoutListeners`] set
//! and get back a [`ListenerToken`]:
//!
//! - The token is a generational handle. Once it is unsubscribed the slot may
//!   be reused, but the old token never matches the new registration.
//! - Unsubscribing is the only way to cancel, and it is idempotent.
//! - Dispatch works from a snapshot of [`tokens`](LayoutListeners::tokens) and
//!   rechecks each one, so a listener may remove itself (or another listener)
//!   while a pass is being delivered.

mod event;
mod listeners;
mod token;

pub use event::LayoutEvent;
pub use listeners::LayoutListeners;
pub use token::ListenerToken;
