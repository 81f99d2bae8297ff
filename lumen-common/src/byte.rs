//! A simple bounds-checked byte reader.

/// A cursor over a byte slice producing big-endian integers.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a new reader starting at the beginning of `data`.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Create a new reader starting at the given byte offset.
    ///
    /// Returns `None` if the offset lies past the end of the data.
    #[inline]
    pub fn new_at(data: &'a [u8], offset: usize) -> Option<Self> {
        if offset > data.len() {
            return None;
        }

        Some(Self { data, offset })
    }

    /// The current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether all bytes have been consumed.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Read a single byte.
    #[inline]
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.offset)?;
        self.offset += 1;

        Some(byte)
    }

    /// Read a big-endian `u16`.
    #[inline]
    pub fn read_u16(&mut self) -> Option<u16> {
        let bytes = self.read_bytes(2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian 24-bit integer.
    #[inline]
    pub fn read_u24(&mut self) -> Option<u32> {
        let bytes = self.read_bytes(3)?;
        Some(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Read a big-endian `u32`.
    #[inline]
    pub fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.read_bytes(4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a big-endian `i16`.
    #[inline]
    pub fn read_i16(&mut self) -> Option<i16> {
        self.read_u16().map(|n| n as i16)
    }

    /// Read a big-endian `i32`.
    #[inline]
    pub fn read_i32(&mut self) -> Option<i32> {
        self.read_u32().map(|n| n as i32)
    }

    /// Read the next `len` bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let bytes = self.data.get(self.offset..self.offset.checked_add(len)?)?;
        self.offset += len;

        Some(bytes)
    }

    /// Advance the cursor by `len` bytes.
    #[inline]
    pub fn skip(&mut self, len: usize) -> Option<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// The remaining, unread bytes.
    #[inline]
    pub fn tail(&self) -> Option<&'a [u8]> {
        self.data.get(self.offset..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_integers() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut r = Reader::new(&data);

        assert_eq!(r.read_byte(), Some(0x01));
        assert_eq!(r.read_u16(), Some(0x0203));
        assert_eq!(r.read_u32(), Some(0x04050607));
        assert!(r.at_end());
        assert_eq!(r.read_byte(), None);
    }

    #[test]
    fn read_u24() {
        let data = [0x01, 0x02, 0x03];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_u24(), Some(0x010203));
    }

    #[test]
    fn out_of_bounds_read_leaves_cursor_intact() {
        let data = [0x01, 0x02];
        let mut r = Reader::new(&data);

        assert_eq!(r.read_u32(), None);
        assert_eq!(r.offset(), 0);
        assert_eq!(r.read_u16(), Some(0x0102));
    }

    #[test]
    fn new_at_bounds() {
        let data = [0x01, 0x02];
        assert!(Reader::new_at(&data, 2).is_some());
        assert!(Reader::new_at(&data, 3).is_none());
    }

    #[test]
    fn tail_and_skip() {
        let data = [0x01, 0x02, 0x03];
        let mut r = Reader::new(&data);
        r.skip(1).unwrap();
        assert_eq!(r.tail(), Some(&data[1..]));
        assert_eq!(r.skip(5), None);
    }
}
