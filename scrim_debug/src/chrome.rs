// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use scrim_core::listener::FireOutcome;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Recordings carry no wall-clock time, so each event's `ts` is its layout
/// pass index. Events from one pass therefore stack at the same instant, in
/// recording order.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::LayoutPass(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayoutPass",
                    "cat": "Layout",
                    "ts": e.pass_index,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame": [e.frame.x0, e.frame.y0, e.frame.x1, e.frame.y1],
                        "old_frame": [e.old_frame.x0, e.old_frame.y0, e.old_frame.x1, e.old_frame.y1],
                        "listeners": e.listeners,
                    }
                }));
            }
            RecordedEvent::Deregister(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Deregister",
                    "cat": "Listener",
                    "ts": e.pass_index,
                    "pid": 0,
                    "tid": e.token.index(),
                    "s": "t",
                    "args": {
                        "generation": e.token.generation(),
                        "was_subscribed": e.was_subscribed,
                    }
                }));
            }
            RecordedEvent::AlphaSync(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "AlphaSync",
                    "cat": "Listener",
                    "ts": e.pass_index,
                    "pid": 0,
                    "tid": e.token.index(),
                    "s": "t",
                    "args": outcome_args(e.outcome),
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn outcome_args(outcome: FireOutcome) -> Value {
    match outcome {
        FireOutcome::Stale => json!({ "outcome": "stale" }),
        FireOutcome::PanelNotClosed(state) => json!({
            "outcome": "panel_not_closed",
            "panel": state.to_string(),
        }),
        FireOutcome::AlreadyTransparent => json!({ "outcome": "already_transparent" }),
        FireOutcome::Committed { previous_alpha } => json!({
            "outcome": "committed",
            "previous_alpha": previous_alpha,
        }),
    }
}
