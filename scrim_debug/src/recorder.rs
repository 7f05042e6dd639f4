// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! `PanelState` is non-exhaustive, so a recording can carry a panel state
//! this decoder has no variant for. Such alpha-sync records are skipped and
//! decoding continues with the next record. Truncated records, unknown tags
//! and unknown outcome kinds end iteration.

use kurbo::Rect;
use scrim_core::layout::ListenerToken;
use scrim_core::listener::FireOutcome;
use scrim_core::panel::PanelState;
use scrim_core::trace::{AlphaSyncEvent, DeregisterEvent, LayoutPassEvent, TraceSink};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LAYOUT_PASS: u8 = 1;
const TAG_DEREGISTER: u8 = 2;
const TAG_ALPHA_SYNC: u8 = 3;

const OUTCOME_STALE: u8 = 0;
const OUTCOME_PANEL_NOT_CLOSED: u8 = 1;
const OUTCOME_ALREADY_TRANSPARENT: u8 = 2;
const OUTCOME_COMMITTED: u8 = 3;

const PANEL_OPEN: u8 = 0;
const PANEL_CLOSED: u8 = 1;
const PANEL_UNKNOWN: u8 = 0xFF;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_rect(&mut self, r: Rect) {
        self.write_f64(r.x0);
        self.write_f64(r.y0);
        self.write_f64(r.x1);
        self.write_f64(r.y1);
    }

    fn write_token(&mut self, t: ListenerToken) {
        self.write_u32(t.index());
        self.write_u32(t.generation());
    }

    fn write_panel(&mut self, p: PanelState) {
        self.write_u8(match p {
            PanelState::Open => PANEL_OPEN,
            PanelState::Closed => PANEL_CLOSED,
            _ => PANEL_UNKNOWN,
        });
    }

    /// Every outcome occupies the same number of bytes: kind, panel, alpha.
    fn write_outcome(&mut self, o: FireOutcome) {
        match o {
            FireOutcome::Stale => {
                self.write_u8(OUTCOME_STALE);
                self.write_u8(PANEL_UNKNOWN);
                self.write_u32(0);
            }
            FireOutcome::PanelNotClosed(state) => {
                self.write_u8(OUTCOME_PANEL_NOT_CLOSED);
                self.write_panel(state);
                self.write_u32(0);
            }
            FireOutcome::AlreadyTransparent => {
                self.write_u8(OUTCOME_ALREADY_TRANSPARENT);
                self.write_panel(PanelState::Closed);
                self.write_u32(0);
            }
            FireOutcome::Committed { previous_alpha } => {
                self.write_u8(OUTCOME_COMMITTED);
                self.write_panel(PanelState::Closed);
                self.write_u32(previous_alpha.to_bits());
            }
        }
    }
}

impl TraceSink for RecorderSink {
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        self.write_u8(TAG_LAYOUT_PASS);
        self.write_u64(e.pass_index);
        self.write_rect(e.frame);
        self.write_rect(e.old_frame);
        self.write_u32(e.listeners);
    }

    fn on_deregister(&mut self, e: &DeregisterEvent) {
        self.write_u8(TAG_DEREGISTER);
        self.write_u64(e.pass_index);
        self.write_token(e.token);
        self.write_u8(u8::from(e.was_subscribed));
    }

    fn on_alpha_sync(&mut self, e: &AlphaSyncEvent) {
        self.write_u8(TAG_ALPHA_SYNC);
        self.write_u64(e.pass_index);
        self.write_token(e.token);
        self.write_outcome(e.outcome);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`LayoutPassEvent`].
    LayoutPass(LayoutPassEvent),
    /// A [`DeregisterEvent`].
    Deregister(DeregisterEvent),
    /// An [`AlphaSyncEvent`].
    AlphaSync(AlphaSyncEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.take::<1>()?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_le_bytes(self.take()?))
    }

    fn read_rect(&mut self) -> Option<Rect> {
        Some(Rect::new(
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        ))
    }

    fn read_token(&mut self) -> Option<ListenerToken> {
        let idx = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(ListenerToken::from_raw(idx, generation))
    }

    /// Outer `None`: truncated or corrupt. Inner `None`: the record is
    /// complete but names a panel state with no decoded variant.
    fn read_outcome(&mut self) -> Option<Option<FireOutcome>> {
        let kind = self.read_u8()?;
        let panel = self.read_u8()?;
        let alpha = f32::from_bits(self.read_u32()?);
        Some(match kind {
            OUTCOME_STALE => Some(FireOutcome::Stale),
            OUTCOME_PANEL_NOT_CLOSED => panel_from_u8(panel).map(FireOutcome::PanelNotClosed),
            OUTCOME_ALREADY_TRANSPARENT => Some(FireOutcome::AlreadyTransparent),
            OUTCOME_COMMITTED => Some(FireOutcome::Committed {
                previous_alpha: alpha,
            }),
            _ => return None,
        })
    }

    fn decode_layout_pass(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayoutPass(LayoutPassEvent {
            pass_index: self.read_u64()?,
            frame: self.read_rect()?,
            old_frame: self.read_rect()?,
            listeners: self.read_u32()?,
        }))
    }

    fn decode_deregister(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Deregister(DeregisterEvent {
            pass_index: self.read_u64()?,
            token: self.read_token()?,
            was_subscribed: self.read_u8()? != 0,
        }))
    }

    fn decode_alpha_sync(&mut self) -> Option<Option<RecordedEvent>> {
        let pass_index = self.read_u64()?;
        let token = self.read_token()?;
        let outcome = self.read_outcome()?;
        Some(outcome.map(|outcome| {
            RecordedEvent::AlphaSync(AlphaSyncEvent {
                pass_index,
                token,
                outcome,
            })
        }))
    }
}

fn panel_from_u8(v: u8) -> Option<PanelState> {
    match v {
        PANEL_OPEN => Some(PanelState::Open),
        PANEL_CLOSED => Some(PanelState::Closed),
        _ => None,
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let tag = self.read_u8()?;
            let event = match tag {
                TAG_LAYOUT_PASS => Some(self.decode_layout_pass()?),
                TAG_DEREGISTER => Some(self.decode_deregister()?),
                TAG_ALPHA_SYNC => self.decode_alpha_sync()?,
                _ => return None, // unknown tag → stop iteration
            };
            if event.is_some() {
                return event;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pass() -> LayoutPassEvent {
        LayoutPassEvent {
            pass_index: 1,
            frame: Rect::new(0.0, 0.0, 1080.0, 2400.0),
            old_frame: Rect::ZERO,
            listeners: 1,
        }
    }

    #[test]
    fn records_a_full_firing() {
        let token = ListenerToken::from_raw(0, 3);
        let mut rec = RecorderSink::new();
        rec.on_layout_pass(&sample_pass());
        rec.on_deregister(&DeregisterEvent {
            pass_index: 1,
            token,
            was_subscribed: true,
        });
        rec.on_alpha_sync(&AlphaSyncEvent {
            pass_index: 1,
            token,
            outcome: FireOutcome::Committed {
                previous_alpha: 0.85,
            },
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        match &events[0] {
            RecordedEvent::LayoutPass(e) => assert_eq!(*e, sample_pass()),
            other => panic!("expected LayoutPass, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::Deregister(e) => {
                assert_eq!(e.token, token);
                assert!(e.was_subscribed);
            }
            other => panic!("expected Deregister, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::AlphaSync(e) => {
                assert_eq!(e.token, token);
                assert_eq!(
                    e.outcome,
                    FireOutcome::Committed {
                        previous_alpha: 0.85
                    }
                );
            }
            other => panic!("expected AlphaSync, got {other:?}"),
        }
    }

    #[test]
    fn panel_not_closed_keeps_state() {
        let mut rec = RecorderSink::new();
        rec.on_alpha_sync(&AlphaSyncEvent {
            pass_index: 4,
            token: ListenerToken::from_raw(2, 0),
            outcome: FireOutcome::PanelNotClosed(PanelState::Open),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            [RecordedEvent::AlphaSync(AlphaSyncEvent {
                pass_index: 4,
                token: ListenerToken::from_raw(2, 0),
                outcome: FireOutcome::PanelNotClosed(PanelState::Open),
            })]
        );
    }

    #[test]
    fn unnamed_panel_state_is_skipped() {
        let mut rec = RecorderSink::new();
        rec.on_alpha_sync(&AlphaSyncEvent {
            pass_index: 3,
            token: ListenerToken::from_raw(0, 0),
            outcome: FireOutcome::PanelNotClosed(PanelState::Open),
        });
        rec.on_deregister(&DeregisterEvent {
            pass_index: 4,
            token: ListenerToken::from_raw(1, 2),
            was_subscribed: true,
        });
        let mut bytes = rec.into_bytes();
        // tag + pass index + token + outcome kind, then the panel byte.
        bytes[1 + 8 + 8 + 1] = PANEL_UNKNOWN;

        let events: Vec<_> = decode(&bytes).collect();
        assert_eq!(
            events,
            [RecordedEvent::Deregister(DeregisterEvent {
                pass_index: 4,
                token: ListenerToken::from_raw(1, 2),
                was_subscribed: true,
            })]
        );
    }

    #[test]
    fn unknown_outcome_kind_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_alpha_sync(&AlphaSyncEvent {
            pass_index: 1,
            token: ListenerToken::from_raw(0, 0),
            outcome: FireOutcome::Stale,
        });
        rec.on_layout_pass(&sample_pass());
        let mut bytes = rec.into_bytes();
        bytes[1 + 8 + 8] = 0xEE;

        assert_eq!(decode(&bytes).count(), 0);
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_layout_pass(&sample_pass());
        rec.on_layout_pass(&sample_pass());
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 1]).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let events: Vec<_> = decode(&[0xEE, 1, 2, 3]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn empty_recording() {
        assert_eq!(decode(&[]).count(), 0);
    }
}
