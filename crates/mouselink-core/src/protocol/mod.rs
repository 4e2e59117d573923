//! Wire protocol of the UART mouse bridge.
//!
//! A packet is six bytes: the `0xAA` sync marker followed by a five byte
//! body carrying two 9-bit signed deltas (low byte plus a separate high bit)
//! and three button bits.
//!
//! - `layout`: byte offsets and masks (source of truth)
//! - `reader`: safe, offset-based access to a body
//! - `parser`: body decoding and encoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Everything here is pure; framing against a live byte stream lives in the
//! decoder.
//!
//! The protocol has no checksum, no length field and no escaping. A body
//! byte equal to the sync marker is ordinary data once the decoder is
//! aligned, and can mislead the scanner when it is not.

pub mod common;
pub mod error;
pub mod layout;
pub mod packet;
pub mod parser;
pub mod reader;

pub use error::PacketError;
pub use packet::RawPacket;
pub use parser::{Buttons, MotionFields, encode_body, parse_body, parse_fixed_body};
