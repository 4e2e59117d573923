use super::common::{split_nine_bit, widen_nine_bit};
use super::error::PacketError;
use super::layout;
use super::reader::BodyReader;

/// Button state carried in the last body byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl Buttons {
    /// Decode button bits; reserved bits 7:3 are ignored.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            left: bits & layout::BUTTON_LEFT != 0,
            right: bits & layout::BUTTON_RIGHT != 0,
            middle: bits & layout::BUTTON_MIDDLE != 0,
        }
    }

    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.left {
            bits |= layout::BUTTON_LEFT;
        }
        if self.right {
            bits |= layout::BUTTON_RIGHT;
        }
        if self.middle {
            bits |= layout::BUTTON_MIDDLE;
        }
        bits
    }
}

/// Decoded body fields, before a sequence number is assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionFields {
    pub dx: i16,
    pub dy: i16,
    pub buttons: Buttons,
}

/// Decode a packet body (the five bytes after the sync marker).
///
/// # Errors
/// Returns `PacketError::IncompletePacket` unless `body` is exactly
/// `BODY_LEN` bytes long.
///
/// # Examples
/// ```
/// use mouselink_core::protocol::parse_body;
///
/// let fields = parse_body(&[0xFF, 0x01, 0x00, 0x00, 0x05]).unwrap();
/// assert_eq!(fields.dx, -1);
/// assert!(fields.buttons.left && fields.buttons.middle);
/// ```
pub fn parse_body(body: &[u8]) -> Result<MotionFields, PacketError> {
    let reader = BodyReader::new(body);
    reader.require_exact_len(layout::BODY_LEN)?;

    let dx = reader.read_nine_bit(layout::DX_LOW_OFFSET, layout::DX_HIGH_OFFSET)?;
    let dy = reader.read_nine_bit(layout::DY_LOW_OFFSET, layout::DY_HIGH_OFFSET)?;
    let buttons = reader.read_masked(layout::BUTTONS_OFFSET, layout::BUTTONS_MASK)?;

    Ok(MotionFields {
        dx,
        dy,
        buttons: Buttons::from_bits(buttons),
    })
}

/// Decode a body whose length is already guaranteed by its type.
pub fn parse_fixed_body(body: &[u8; layout::BODY_LEN]) -> MotionFields {
    let nine_bit = |low: usize, high: usize| {
        let high = body[high] & layout::HIGH_BIT_MASK;
        widen_nine_bit((u16::from(high) << 8) | u16::from(body[low]))
    };

    MotionFields {
        dx: nine_bit(layout::DX_LOW_OFFSET, layout::DX_HIGH_OFFSET),
        dy: nine_bit(layout::DY_LOW_OFFSET, layout::DY_HIGH_OFFSET),
        buttons: Buttons::from_bits(body[layout::BUTTONS_OFFSET] & layout::BUTTONS_MASK),
    }
}

/// Encode fields into a packet body with all reserved bits cleared.
///
/// # Errors
/// Returns `PacketError::DeltaOutOfRange` when a delta does not fit in
/// nine bits.
pub fn encode_body(fields: &MotionFields) -> Result<[u8; layout::BODY_LEN], PacketError> {
    let (dx_low, dx_high) =
        split_nine_bit(fields.dx).ok_or(PacketError::DeltaOutOfRange { value: fields.dx })?;
    let (dy_low, dy_high) =
        split_nine_bit(fields.dy).ok_or(PacketError::DeltaOutOfRange { value: fields.dy })?;

    let mut body = [0u8; layout::BODY_LEN];
    body[layout::DX_LOW_OFFSET] = dx_low;
    body[layout::DX_HIGH_OFFSET] = dx_high;
    body[layout::DY_LOW_OFFSET] = dy_low;
    body[layout::DY_HIGH_OFFSET] = dy_high;
    body[layout::BUTTONS_OFFSET] = fields.buttons.bits();
    Ok(body)
}
