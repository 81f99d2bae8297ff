//! CFF INDEX structures.

use lumen_common::byte::Reader;

/// A CFF INDEX: a counted sequence of variable-sized byte objects.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Index<'a> {
    data: &'a [u8],
    offsets: &'a [u8],
    offset_size: u8,
    count: u16,
}

/// Parse an INDEX, advancing the reader past its data.
pub(crate) fn parse_index<'a>(r: &mut Reader<'a>) -> Option<Index<'a>> {
    let count = r.read_u16()?;

    if count == 0 {
        return Some(Index::default());
    }

    let offset_size = r.read_byte()?;
    if !(1..=4).contains(&offset_size) {
        return None;
    }

    let offsets = r.read_bytes((usize::from(count) + 1) * usize::from(offset_size))?;
    let mut index = Index {
        data: &[],
        offsets,
        offset_size,
        count,
    };

    // The last offset marks the end of the object data.
    let data_len = index.offset(u32::from(count))?;
    index.data = r.read_bytes(data_len)?;

    Some(index)
}

/// Parse an INDEX header and skip over its data.
pub(crate) fn skip_index(r: &mut Reader<'_>) -> Option<()> {
    parse_index(r).map(|_| ())
}

impl<'a> Index<'a> {
    /// The number of objects in the INDEX.
    pub(crate) fn len(&self) -> u16 {
        self.count
    }

    /// The object at the given position.
    pub(crate) fn get(&self, index: u16) -> Option<&'a [u8]> {
        if index >= self.count {
            return None;
        }

        let start = self.offset(u32::from(index))?;
        let end = self.offset(u32::from(index) + 1)?;
        self.data.get(start..end)
    }

    /// Iterate over all objects.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &'a [u8]> + use<'a> {
        let this = *self;
        (0..this.count).filter_map(move |i| this.get(i))
    }

    fn offset(&self, index: u32) -> Option<usize> {
        let size = usize::from(self.offset_size);
        let bytes = self
            .offsets
            .get(index as usize * size..(index as usize + 1) * size)?;

        let mut value = 0u32;
        for byte in bytes {
            value = value.checked_mul(256)?.checked_add(u32::from(*byte))?;
        }

        // CFF offsets are one-based.
        usize::try_from(value.checked_sub(1)?).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index() {
        let data = [0x00, 0x00];
        let mut r = Reader::new(&data);
        let index = parse_index(&mut r).unwrap();
        assert_eq!(index.len(), 0);
        assert_eq!(index.get(0), None);
    }

    #[test]
    fn two_entry_index() {
        // count = 2, offset size = 1, offsets 1/3/6, data "abcde".
        let data = [0x00, 0x02, 0x01, 0x01, 0x03, 0x06, b'a', b'b', b'c', b'd', b'e'];
        let mut r = Reader::new(&data);
        let index = parse_index(&mut r).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0), Some(b"ab".as_slice()));
        assert_eq!(index.get(1), Some(b"cde".as_slice()));
        assert_eq!(index.get(2), None);
        assert!(r.at_end());
    }

    #[test]
    fn invalid_offset_size_is_rejected() {
        let data = [0x00, 0x01, 0x05, 0x01, 0x02, b'a'];
        let mut r = Reader::new(&data);
        assert!(parse_index(&mut r).is_none());
    }
}
