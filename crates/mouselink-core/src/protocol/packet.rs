use super::error::PacketError;
use super::layout;
use super::parser::{MotionFields, encode_body, parse_fixed_body};

/// One framed packet: the sync marker plus its five body bytes.
///
/// The first byte is always `SYNC_MARKER`; constructors enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPacket([u8; layout::PACKET_LEN]);

impl RawPacket {
    pub fn from_body(body: [u8; layout::BODY_LEN]) -> Self {
        let mut bytes = [0u8; layout::PACKET_LEN];
        bytes[0] = layout::SYNC_MARKER;
        bytes[1..].copy_from_slice(&body);
        Self(bytes)
    }

    /// Frame a packet from exactly `PACKET_LEN` bytes starting with the marker.
    ///
    /// # Examples
    /// ```
    /// use mouselink_core::protocol::RawPacket;
    ///
    /// let packet = RawPacket::from_bytes(&[0xAA, 0x01, 0x00, 0x02, 0x00, 0x00]).unwrap();
    /// assert_eq!(packet.body(), &[0x01, 0x00, 0x02, 0x00, 0x00]);
    /// assert!(RawPacket::from_bytes(&[0x55, 0, 0, 0, 0, 0]).is_err());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PacketError> {
        let bytes: [u8; layout::PACKET_LEN] =
            bytes.try_into().map_err(|_| PacketError::IncompletePacket {
                needed: layout::PACKET_LEN,
                actual: bytes.len(),
            })?;
        if bytes[0] != layout::SYNC_MARKER {
            return Err(PacketError::MissingSyncMarker { found: bytes[0] });
        }
        Ok(Self(bytes))
    }

    pub fn encode(fields: &MotionFields) -> Result<Self, PacketError> {
        Ok(Self::from_body(encode_body(fields)?))
    }

    pub fn body(&self) -> &[u8] {
        &self.0[1..]
    }

    /// Decode the body; a framed packet always has a full one.
    pub fn fields(&self) -> MotionFields {
        let [_, body @ ..] = &self.0;
        parse_fixed_body(body)
    }

    pub fn as_bytes(&self) -> &[u8; layout::PACKET_LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::RawPacket;
    use crate::protocol::error::PacketError;
    use crate::protocol::parser::{Buttons, MotionFields};

    #[test]
    fn from_bytes_rejects_wrong_length() {
        let err = RawPacket::from_bytes(&[0xAA, 0x00, 0x00]).unwrap_err();
        assert_eq!(err, PacketError::IncompletePacket { needed: 6, actual: 3 });
    }

    #[test]
    fn from_bytes_rejects_missing_marker() {
        let err = RawPacket::from_bytes(&[0x00; 6]).unwrap_err();
        assert_eq!(err, PacketError::MissingSyncMarker { found: 0x00 });
    }

    #[test]
    fn encode_prefixes_marker() {
        let packet = RawPacket::encode(&MotionFields {
            dx: 3,
            dy: -3,
            buttons: Buttons {
                left: true,
                right: false,
                middle: false,
            },
        })
        .unwrap();
        assert_eq!(packet.as_bytes(), &[0xAA, 0x03, 0x00, 0xFD, 0x01, 0x01]);
        assert_eq!((packet.fields().dx, packet.fields().dy), (3, -3));
        assert!(packet.fields().buttons.left);
    }

    #[test]
    fn fields_ignore_reserved_bits() {
        let packet = RawPacket::from_bytes(&[0xAA, 0x00, 0xFF, 0x80, 0xFE, 0xFC]).unwrap();
        let fields = packet.fields();
        assert_eq!((fields.dx, fields.dy), (-256, 128));
        assert_eq!(fields.buttons, Buttons::from_bits(0x04));
    }
}
