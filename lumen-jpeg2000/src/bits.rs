//! Bit stuffing in packet headers, described in Section B.10.1.

use lumen_common::bit::BitReader;

/// Reading packet header bits with 0xFF stuffing.
///
/// Whenever a header byte is 0xFF, the following byte carries an extra
/// zero bit in its most significant position so that no marker codes
/// appear inside the header.
pub(crate) trait StuffedBits {
    /// Read `bit_size` header bits, consuming stuffed bits along the way.
    ///
    /// A stuffed bit with value one marks a corrupt header.
    fn read_stuffed(&mut self, bit_size: u8) -> Option<u32>;

    /// Look at the next `bit_size` header bits without consuming anything.
    fn peek_stuffed(&self, bit_size: u8) -> Option<u32>;
}

impl StuffedBits for BitReader<'_> {
    fn read_stuffed(&mut self, bit_size: u8) -> Option<u32> {
        let mut bits = 0;

        for _ in 0..bit_size {
            if self.bit_pos() == 0 && self.prev_byte() == Some(0xFF) && self.read(1)? != 0 {
                return None;
            }

            bits = (bits << 1) | self.read(1)?;
        }

        Some(bits)
    }

    fn peek_stuffed(&self, bit_size: u8) -> Option<u32> {
        self.clone().read_stuffed(bit_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bits_pass_through() {
        let mut reader = BitReader::new(&[0b1011_0001, 0x12]);
        assert_eq!(reader.read_stuffed(4), Some(0b1011));
        assert_eq!(reader.read_stuffed(8), Some(0b0001_0001));
    }

    #[test]
    fn stuffed_zero_after_ff_is_skipped() {
        // 0xFF, then a stuffed zero, then seven ones.
        let mut reader = BitReader::new(&[0xFF, 0x7F]);
        assert_eq!(reader.read_stuffed(15), Some(0x7FFF));
    }

    #[test]
    fn stuffed_one_is_an_error() {
        let mut reader = BitReader::new(&[0xFF, 0x80]);
        assert_eq!(reader.read_stuffed(9), None);
    }

    #[test]
    fn peek_does_not_advance() {
        let reader = BitReader::new(&[0b1010_0000]);
        assert_eq!(reader.peek_stuffed(3), Some(0b101));
        assert_eq!(reader.peek_stuffed(3), Some(0b101));
    }
}
