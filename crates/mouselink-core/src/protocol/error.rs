use thiserror::Error;

/// Errors returned by packet framing, decoding and encoding.
///
/// Body decoding only ever reports `IncompletePacket`; the other variants
/// come from building a [`RawPacket`](super::RawPacket) from arbitrary bytes
/// or from encoding out-of-range deltas.
///
/// # Examples
/// ```
/// use mouselink_core::protocol::PacketError;
///
/// let err = PacketError::IncompletePacket { needed: 5, actual: 3 };
/// assert!(err.to_string().contains("incomplete packet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("incomplete packet: need {needed} bytes, got {actual}")]
    IncompletePacket { needed: usize, actual: usize },
    #[error("missing sync marker: expected 0xaa, found {found:#04x}")]
    MissingSyncMarker { found: u8 },
    #[error("delta out of range: {value} (expected -256..=255)")]
    DeltaOutOfRange { value: i16 },
}
