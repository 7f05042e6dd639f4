// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use kurbo::Rect;
use scrim_core::listener::FireOutcome;
use scrim_core::trace::{AlphaSyncEvent, DeregisterEvent, LayoutPassEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

struct RectDisplay(Rect);

impl std::fmt::Display for RectDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.0;
        write!(f, "({},{})-({},{})", r.x0, r.y0, r.x1, r.y1)
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] pass={} frame={} old={} listeners={}",
            e.pass_index,
            RectDisplay(e.frame),
            RectDisplay(e.old_frame),
            e.listeners,
        );
    }

    fn on_deregister(&mut self, e: &DeregisterEvent) {
        let state = if e.was_subscribed { "live" } else { "stale" };
        let _ = writeln!(
            self.writer,
            "[deregister] pass={} token={}@gen{} {state}",
            e.pass_index,
            e.token.index(),
            e.token.generation(),
        );
    }

    fn on_alpha_sync(&mut self, e: &AlphaSyncEvent) {
        let _ = write!(
            self.writer,
            "[alpha] pass={} token={}@gen{} ",
            e.pass_index,
            e.token.index(),
            e.token.generation(),
        );
        let _ = match e.outcome {
            FireOutcome::Stale => writeln!(self.writer, "stale"),
            FireOutcome::PanelNotClosed(state) => writeln!(self.writer, "skipped panel={state}"),
            FireOutcome::AlreadyTransparent => writeln!(self.writer, "unchanged alpha=0.00"),
            FireOutcome::Committed { previous_alpha } => {
                writeln!(self.writer, "committed alpha={previous_alpha:.2}->0.00")
            }
        };
    }
}
