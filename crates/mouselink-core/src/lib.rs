//! Mouselink core library: decoding PS/2 mouse packets bridged over UART.
//!
//! A bridge forwards each mouse sample as a fixed 6-byte packet: the `0xAA`
//! sync marker, two 9-bit signed deltas split into low byte and high bit,
//! and a button byte. This crate locates packet boundaries in an
//! unstructured byte stream, reconstructs the deltas and buttons, and hands
//! out [`MotionEvent`]s with a per-decoder sequence number.
//!
//! Layers:
//! - `protocol`: wire layout, safe body reads, pure decode/encode
//! - `source`: the [`ByteSource`] contract and adapters (I/O lives here)
//! - `decoder`: sync scanning, field decoding, the lazy event loop
//! - `replay`: decoding a finite capture into a [`ReplayReport`]
//!
//! Invariants:
//! - An event is only built from a marker plus exactly five body bytes.
//! - Sequence numbers are 1, 2, 3, ... per decoder; failures never consume one.
//! - Idle reads are not errors and never change decoder state.
//!
//! # Examples
//! ```
//! use mouselink_core::{Decoder, ScriptedSource};
//!
//! let mut source = ScriptedSource::from_bytes(vec![
//!     0x00u8, 0xAA, 0x00, 0x00, 0x00, 0x00, 0x00, // noise, then a packet
//!     0xAA, 0xFF, 0x01, 0x10, 0x00, 0x01,
//! ]);
//! let mut decoder = Decoder::new();
//! let events: Vec<_> = decoder.events(&mut source).collect::<Result<_, _>>()?;
//! assert_eq!(events.len(), 2);
//! assert_eq!((events[1].dx, events[1].dy), (-1, 16));
//! # Ok::<(), mouselink_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

mod decoder;
pub mod protocol;
mod replay;
mod source;

pub use decoder::{DecodeError, Decoder, Events, MotionEvent, find_sync};
pub use protocol::{Buttons, MotionFields, PacketError, RawPacket};
pub use replay::{ReplayError, replay_file, replay_source};
pub use source::{ByteSource, ReaderSource, ScriptedSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Result of replaying a capture through a fresh decoder.
///
/// # Examples
/// ```
/// use mouselink_core::make_stub_report;
///
/// let report = make_stub_report("capture.bin", 12);
/// assert_eq!(report.report_version, mouselink_core::REPORT_VERSION);
/// assert!(report.events.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input capture metadata.
    pub input: InputInfo,
    /// Decode counters.
    pub summary: ReplaySummary,
    /// Decoded events in emission order.
    pub events: Vec<MotionEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub packets_decoded: u64,
    /// Markers followed by fewer than five body bytes.
    pub incomplete_packets: u64,
}

/// Build a report with base fields filled and no events.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> ReplayReport {
    ReplayReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "mouselink".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: ReplaySummary::default(),
        events: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_events_with_raw_bytes() {
        let mut report = make_stub_report("capture.bin", 6);
        let mut decoder = Decoder::new();
        report
            .events
            .push(decoder.decode_body(&[0x05, 0x00, 0xFB, 0x01, 0x03]).unwrap());
        report.summary.packets_decoded = decoder.decoded();

        let value = serde_json::to_value(&report).expect("report json");
        assert_eq!(value["tool"]["name"], "mouselink");
        assert_eq!(value["summary"]["packets_decoded"], 1);
        let event = &value["events"][0];
        assert_eq!(event["dx"], 5);
        assert_eq!(event["dy"], -5);
        assert_eq!(event["button_right"], true);
        assert_eq!(
            event["raw"],
            serde_json::json!([0xAA, 0x05, 0x00, 0xFB, 0x01, 0x03])
        );
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = make_stub_report("capture.bin", 0);
        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: ReplayReport = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.summary, ReplaySummary::default());
        assert_eq!(parsed.input.path, "capture.bin");
    }
}
