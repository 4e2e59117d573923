use super::layout;

/// Widen a 9-bit two's-complement value to `i16`.
///
/// Bits above bit 8 are ignored. The result is always within
/// `DELTA_MIN..=DELTA_MAX`.
///
/// # Examples
/// ```
/// use mouselink_core::protocol::common::widen_nine_bit;
///
/// assert_eq!(widen_nine_bit(0x0FF), 255);
/// assert_eq!(widen_nine_bit(0x1FF), -1);
/// assert_eq!(widen_nine_bit(0x100), -256);
/// ```
pub fn widen_nine_bit(raw: u16) -> i16 {
    let value = (raw & layout::NINE_BIT_MASK) as i16;
    if raw & layout::NINE_BIT_SIGN != 0 {
        value - layout::NINE_BIT_MODULUS
    } else {
        value
    }
}

/// Split a signed delta into its `(low byte, high bit)` wire fields.
///
/// Returns `None` when the value does not fit in nine bits.
///
/// # Examples
/// ```
/// use mouselink_core::protocol::common::split_nine_bit;
///
/// assert_eq!(split_nine_bit(-1), Some((0xFF, 0x01)));
/// assert_eq!(split_nine_bit(256), None);
/// ```
pub fn split_nine_bit(value: i16) -> Option<(u8, u8)> {
    if !(layout::DELTA_MIN..=layout::DELTA_MAX).contains(&value) {
        return None;
    }
    let raw = (value as u16) & layout::NINE_BIT_MASK;
    Some(((raw & 0x00FF) as u8, (raw >> 8) as u8))
}

#[cfg(test)]
mod tests {
    use super::{split_nine_bit, widen_nine_bit};
    use crate::protocol::layout;

    #[test]
    fn widen_covers_every_nine_bit_value() {
        for raw in 0u16..512 {
            let value = widen_nine_bit(raw);
            assert!((layout::DELTA_MIN..=layout::DELTA_MAX).contains(&value));
            let expected = if raw < 256 { raw as i16 } else { raw as i16 - 512 };
            assert_eq!(value, expected, "raw {raw:#05x}");
        }
    }

    #[test]
    fn widen_ignores_bits_above_nine() {
        assert_eq!(widen_nine_bit(0xFF00 | 0x0005), -251);
        assert_eq!(widen_nine_bit(0x0200), 0);
    }

    #[test]
    fn split_then_widen_restores_value() {
        for value in layout::DELTA_MIN..=layout::DELTA_MAX {
            let (low, high) = split_nine_bit(value).unwrap();
            assert!(high <= 1);
            let raw = (u16::from(high) << 8) | u16::from(low);
            assert_eq!(widen_nine_bit(raw), value);
        }
    }

    #[test]
    fn split_rejects_out_of_range() {
        assert_eq!(split_nine_bit(256), None);
        assert_eq!(split_nine_bit(-257), None);
        assert_eq!(split_nine_bit(i16::MIN), None);
    }
}
