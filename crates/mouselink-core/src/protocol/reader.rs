use super::common::widen_nine_bit;
use super::error::PacketError;
use super::layout;

pub struct BodyReader<'a> {
    body: &'a [u8],
}

impl<'a> BodyReader<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body }
    }

    /// Bodies have a fixed size; anything longer is rejected as well.
    pub fn require_exact_len(&self, needed: usize) -> Result<(), PacketError> {
        if self.body.len() != needed {
            return Err(PacketError::IncompletePacket {
                needed,
                actual: self.body.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, PacketError> {
        self.body
            .get(offset)
            .copied()
            .ok_or(PacketError::IncompletePacket {
                needed: offset + 1,
                actual: self.body.len(),
            })
    }

    /// Read a byte with reserved bits cleared. Reserved bits are never validated.
    pub fn read_masked(&self, offset: usize, mask: u8) -> Result<u8, PacketError> {
        Ok(self.read_u8(offset)? & mask)
    }

    pub fn read_nine_bit(&self, low_offset: usize, high_offset: usize) -> Result<i16, PacketError> {
        let low = self.read_u8(low_offset)?;
        let high = self.read_masked(high_offset, layout::HIGH_BIT_MASK)?;
        Ok(widen_nine_bit((u16::from(high) << 8) | u16::from(low)))
    }
}

#[cfg(test)]
mod tests {
    use super::BodyReader;
    use crate::protocol::error::PacketError;

    #[test]
    fn require_exact_len_rejects_short_and_long() {
        let short = [0u8; 4];
        let err = BodyReader::new(&short).require_exact_len(5).unwrap_err();
        assert_eq!(err, PacketError::IncompletePacket { needed: 5, actual: 4 });

        let long = [0u8; 6];
        assert!(BodyReader::new(&long).require_exact_len(5).is_err());
    }

    #[test]
    fn read_u8_out_of_bounds() {
        let body = [1u8, 2];
        let err = BodyReader::new(&body).read_u8(2).unwrap_err();
        assert_eq!(err, PacketError::IncompletePacket { needed: 3, actual: 2 });
    }

    #[test]
    fn read_nine_bit_masks_reserved_high_bits() {
        let body = [0x10, 0xFE, 0x10, 0xFF];
        let reader = BodyReader::new(&body);
        assert_eq!(reader.read_nine_bit(0, 1).unwrap(), 0x10);
        assert_eq!(reader.read_nine_bit(2, 3).unwrap(), 0x110 - 512);
    }
}
