//! MSB-first bit reader and writer.

/// A bit reader.
///
/// Bits are consumed from the most significant bit of each byte first, the
/// order used by CFF, PNG and JPEG 2000 alike.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    cur_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cur_pos: 0 }
    }

    /// Read the given number of bits as a big-endian integer.
    ///
    /// Returns `None` if fewer than `bit_size` bits remain or if
    /// `bit_size` > 32.
    #[inline(always)]
    pub fn read(&mut self, bit_size: u8) -> Option<u32> {
        if bit_size > 32 {
            return None;
        }

        if bit_size == 0 {
            return Some(0);
        }

        let byte_pos = self.byte_pos();

        if byte_pos >= self.data.len() {
            return None;
        }

        // Fast path for byte-aligned single-byte reads.
        if bit_size == 8 && self.bit_pos() == 0 {
            let item = self.data[byte_pos] as u32;
            self.cur_pos += 8;

            return Some(item);
        }

        let bit_pos = self.bit_pos();
        let end_byte_pos = (bit_pos + bit_size as usize).div_ceil(8);
        let mut read = [0u8; 8];

        for (i, r) in read.iter_mut().enumerate().take(end_byte_pos) {
            *r = *self.data.get(byte_pos + i)?;
        }

        let item =
            (u64::from_be_bytes(read) >> (64 - bit_pos - bit_size as usize)) as u32 & mask(bit_size);
        self.cur_pos += bit_size as usize;

        Some(item)
    }

    /// Read the given number of bits without advancing the cursor.
    #[inline]
    pub fn peek(&self, bit_size: u8) -> Option<u32> {
        self.clone().read(bit_size)
    }

    /// Align the reader to the next byte boundary.
    #[inline]
    pub fn align(&mut self) {
        let bit_pos = self.bit_pos();

        if bit_pos != 0 {
            self.cur_pos += 8 - bit_pos;
        }
    }

    /// Whether all bytes have been consumed.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.byte_pos() >= self.data.len()
    }

    /// The current byte position.
    #[inline]
    pub fn byte_pos(&self) -> usize {
        self.cur_pos / 8
    }

    /// The bit position within the current byte.
    #[inline]
    pub fn bit_pos(&self) -> usize {
        self.cur_pos % 8
    }

    /// The byte the cursor currently points into.
    #[inline]
    pub fn cur_byte(&self) -> Option<u8> {
        self.data.get(self.byte_pos()).copied()
    }

    /// The byte immediately before the cursor's byte, if any.
    #[inline]
    pub fn prev_byte(&self) -> Option<u8> {
        self.data.get(self.byte_pos().checked_sub(1)?).copied()
    }

    /// The tail of the data, starting at the current (rounded-up) byte.
    #[inline]
    pub fn tail(&self) -> &'a [u8] {
        let mut pos = self.byte_pos();
        if self.bit_pos() != 0 {
            pos += 1;
        }

        self.data.get(pos..).unwrap_or(&[])
    }
}

/// The mask covering the lowest `bit_size` bits.
#[inline]
fn mask(bit_size: u8) -> u32 {
    ((1u64 << bit_size as u64) - 1) as u32
}

/// A bit writer with a fixed per-write bit size.
///
/// Only used to construct test inputs for the bit-oriented decoders, but kept
/// public so every crate's tests can share it.
#[derive(Debug)]
pub struct BitWriter<'a> {
    data: &'a mut [u8],
    cur_pos: usize,
    bit_size: u8,
}

impl<'a> BitWriter<'a> {
    /// Create a new bit writer for a bit size between 1 and 32 (inclusive).
    #[inline]
    pub fn new(data: &'a mut [u8], bit_size: u8) -> Option<Self> {
        if !(1..=32).contains(&bit_size) {
            return None;
        }

        Some(Self {
            data,
            bit_size,
            cur_pos: 0,
        })
    }

    /// Write the given value into the buffer.
    #[inline]
    pub fn write(&mut self, val: u32) -> Option<()> {
        let bit_size = self.bit_size as usize;
        let mut bits_left = bit_size;
        let value = val & mask(self.bit_size);

        while bits_left > 0 {
            let absolute_pos = self.cur_pos + (bit_size - bits_left);
            let byte_pos = absolute_pos / 8;
            let bit_pos = absolute_pos % 8;
            let bits_in_byte = (8 - bit_pos).min(bits_left);
            let chunk_mask = mask(bits_in_byte as u8);
            let chunk = ((value >> (bits_left - bits_in_byte)) & chunk_mask) as u8;

            let shift_in_byte = 8 - bits_in_byte - bit_pos;
            let byte = self.data.get_mut(byte_pos)?;
            let byte_mask = (chunk_mask as u8) << shift_in_byte;

            *byte = (*byte & !byte_mask) | ((chunk << shift_in_byte) & byte_mask);

            bits_left -= bits_in_byte;
        }

        self.cur_pos += bit_size;

        Some(())
    }

    /// Write multiple values at once.
    #[inline]
    pub fn write_bits(&mut self, bits: impl IntoIterator<Item = u32>) -> Option<()> {
        for bit in bits {
            self.write(bit)?;
        }

        Some(())
    }

    /// Align the writer to the next byte boundary.
    #[inline]
    pub fn align(&mut self) {
        let bit_pos = self.cur_pos % 8;

        if bit_pos != 0 {
            self.cur_pos += 8 - bit_pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(16), Some(0x0102));
        assert_eq!(reader.read(16), Some(0x0304));
        assert_eq!(reader.read(16), None);
    }

    #[test]
    fn read_varying_bit_sizes() {
        let data = [0b10011000, 0b00011111, 0b10101001];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(4), Some(0b1001));
        assert_eq!(reader.read(1), Some(0b1));
        assert_eq!(reader.read(4), Some(0b0000));
        assert_eq!(reader.read(5), Some(0b00111));
        assert_eq!(reader.read(1), Some(0b1));
        assert_eq!(reader.read(2), Some(0b11));
        assert_eq!(reader.read(7), Some(0b0101001));
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [0b10100000];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.peek(3), Some(0b101));
        assert_eq!(reader.read(3), Some(0b101));
    }

    #[test]
    fn align_skips_to_byte_boundary() {
        let data = [0b10011000, 0b00010000];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(3), Some(0b100));
        reader.align();
        assert_eq!(reader.read(8), Some(0b00010000));
    }

    #[test]
    fn writer_rejects_invalid_sizes() {
        let mut buf = [0u8; 4];
        assert!(BitWriter::new(&mut buf, 0).is_none());
        assert!(BitWriter::new(&mut buf, 33).is_none());
    }

    #[test]
    fn round_trip_all_bit_sizes() {
        for bit_size in 1u8..=32 {
            let m = mask(bit_size);
            let values: Vec<u32> = (0..6)
                .map(|i| (0x9E3779B9u32.wrapping_mul(i + 1) ^ u32::from(bit_size)) & m)
                .collect();

            let total_bits = bit_size as usize * values.len();
            let mut buf = vec![0u8; total_bits.div_ceil(8)];
            let mut writer = BitWriter::new(&mut buf, bit_size).unwrap();

            for value in &values {
                writer.write(*value).unwrap();
            }

            let mut reader = BitReader::new(&buf);
            for expected in &values {
                assert_eq!(
                    reader.read(bit_size),
                    Some(*expected),
                    "round-trip failed for bit size {bit_size}"
                );
            }
        }
    }
}
