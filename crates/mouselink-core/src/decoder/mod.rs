//! Packet decoder: synchronisation, field decoding and the decode loop.
//!
//! The decoder owns nothing but its sequence counter. Every step either
//! consumes one full packet and emits one event, or fails without keeping
//! any bytes around for the next step.

mod event;
mod events;
mod sync;

pub use event::MotionEvent;
pub use events::Events;
pub use sync::find_sync;

use thiserror::Error;

use crate::protocol::{MotionFields, PacketError, RawPacket, layout, parse_body};
use crate::source::{ByteSource, SourceError};

/// Error for a single decode step.
///
/// `Packet` errors are recoverable: the next step scans for a fresh marker.
/// `Source` errors mean the byte source is unusable and the caller decides
/// whether to reconnect.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Packet(#[from] PacketError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl DecodeError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DecodeError::Packet(_))
    }
}

/// Stateful packet decoder.
///
/// # Examples
/// ```
/// use mouselink_core::{Decoder, ScriptedSource};
///
/// let mut source = ScriptedSource::from_bytes(vec![0xAAu8, 0xFF, 0x01, 0x00, 0x00, 0x05]);
/// let mut decoder = Decoder::new();
/// let event = decoder.read_packet(&mut source).unwrap();
/// assert_eq!(event.sequence_number, 1);
/// assert_eq!(event.dx, -1);
/// assert!(event.button_left && event.button_middle);
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    next_sequence: u64,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self { next_sequence: 1 }
    }

    /// Sequence number the next decoded event will carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Number of events emitted so far.
    pub fn decoded(&self) -> u64 {
        self.next_sequence - 1
    }

    /// Decode the five body bytes that followed a sync marker.
    ///
    /// The sequence counter only advances on success.
    pub fn decode_body(&mut self, body: &[u8]) -> Result<MotionEvent, DecodeError> {
        let fields = parse_body(body)?;
        let mut raw = [0u8; layout::PACKET_LEN];
        raw[0] = layout::SYNC_MARKER;
        raw[1..].copy_from_slice(body);
        Ok(self.emit(fields, raw))
    }

    /// Decode an already framed packet. Framing guarantees the body length.
    pub fn decode_packet(&mut self, packet: &RawPacket) -> MotionEvent {
        self.emit(packet.fields(), *packet.as_bytes())
    }

    /// Run one decode step against `source`.
    ///
    /// Scans for the marker, then reads the body. Idle reads before the
    /// first body byte are retried; a short body read fails with
    /// `PacketError::IncompletePacket` and the drained bytes are dropped.
    pub fn read_packet<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<MotionEvent, DecodeError> {
        find_sync(source)?;

        let mut body = [0u8; layout::BODY_LEN];
        let read = loop {
            let read = source.read(&mut body)?;
            if read > 0 {
                break read;
            }
        };
        self.decode_body(&body[..read])
    }

    /// Lazily decode events from `source` until it closes or faults.
    pub fn events<'a, S: ByteSource + ?Sized>(&'a mut self, source: &'a mut S) -> Events<'a, S> {
        Events::new(self, source)
    }

    fn emit(&mut self, fields: MotionFields, raw: [u8; layout::PACKET_LEN]) -> MotionEvent {
        let event = MotionEvent::new(self.next_sequence, fields, raw);
        self.next_sequence += 1;
        event
    }
}
