//! CFF charsets, mapping glyph IDs to string IDs.

use lumen_common::byte::Reader;

/// Parse an explicit charset into one string ID per glyph.
///
/// Glyph 0 is always `.notdef` and not stored in the font.
pub(crate) fn parse(data: &[u8], offset: usize, glyph_count: u16) -> Option<Vec<u16>> {
    let mut r = Reader::new_at(data, offset)?;
    let format = r.read_byte()?;

    let mut sids = Vec::with_capacity(usize::from(glyph_count));
    sids.push(0);

    match format {
        0 => {
            for _ in 1..glyph_count {
                sids.push(r.read_u16()?);
            }
        }
        1 | 2 => {
            while sids.len() < usize::from(glyph_count) {
                let first = r.read_u16()?;
                let n_left = if format == 1 {
                    u16::from(r.read_byte()?)
                } else {
                    r.read_u16()?
                };

                for i in 0..=u32::from(n_left) {
                    if sids.len() >= usize::from(glyph_count) {
                        break;
                    }

                    sids.push(u16::try_from(u32::from(first) + i).ok()?);
                }
            }
        }
        _ => return None,
    }

    Some(sids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_0() {
        let data = [0x00, 0x00, 0x05, 0x00, 0x22];
        let sids = parse(&data, 0, 3).unwrap();
        assert_eq!(sids, vec![0, 5, 34]);
    }

    #[test]
    fn format_1_ranges() {
        // One range: sids 10..=13 for glyphs 1..=4.
        let data = [0x01, 0x00, 0x0A, 0x03];
        let sids = parse(&data, 0, 5).unwrap();
        assert_eq!(sids, vec![0, 10, 11, 12, 13]);
    }

    #[test]
    fn format_2_ranges() {
        let data = [0x02, 0x01, 0x00, 0x00, 0x02];
        let sids = parse(&data, 0, 4).unwrap();
        assert_eq!(sids, vec![0, 256, 257, 258]);
    }

    #[test]
    fn truncated_charset_is_rejected() {
        let data = [0x00, 0x00, 0x05];
        assert!(parse(&data, 0, 3).is_none());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(parse(&[0x03], 0, 2).is_none());
    }
}
