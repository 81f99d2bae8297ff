//! CFF encodings, mapping character codes to glyph IDs.

use lumen_common::byte::Reader;

/// A code-to-glyph table.
pub(crate) type CodeToGid = Box<[Option<u16>; 256]>;

/// Parse an explicit encoding.
///
/// `sid_to_gid` resolves the supplemental mappings, which address glyphs
/// by string ID rather than by position.
pub(crate) fn parse(
    data: &[u8],
    offset: usize,
    glyph_count: u16,
    sid_to_gid: impl Fn(u16) -> Option<u16>,
) -> Option<CodeToGid> {
    let mut r = Reader::new_at(data, offset)?;
    let format = r.read_byte()?;
    let has_supplements = format & 0x80 != 0;

    let mut table: CodeToGid = Box::new([None; 256]);
    let mut assign = |code: u8, gid: u16| {
        if gid < glyph_count {
            table[usize::from(code)] = Some(gid);
        }
    };

    match format & 0x7F {
        0 => {
            let n_codes = r.read_byte()?;

            // Codes are listed in glyph order, starting at glyph 1.
            for gid in 1..=u16::from(n_codes) {
                let code = r.read_byte()?;
                assign(code, gid);
            }
        }
        1 => {
            let n_ranges = r.read_byte()?;
            let mut gid = 1u16;

            for _ in 0..n_ranges {
                let first = r.read_byte()?;
                let n_left = r.read_byte()?;

                for i in 0..=u16::from(n_left) {
                    let code = u8::try_from(u16::from(first) + i).ok()?;
                    assign(code, gid);
                    gid = gid.checked_add(1)?;
                }
            }
        }
        _ => return None,
    }

    if has_supplements {
        let n_sups = r.read_byte()?;

        for _ in 0..n_sups {
            let code = r.read_byte()?;
            let sid = r.read_u16()?;

            if let Some(gid) = sid_to_gid(sid) {
                assign(code, gid);
            }
        }
    }

    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_0() {
        // Two codes: 0x41 -> glyph 1, 0x42 -> glyph 2.
        let data = [0x00, 0x02, 0x41, 0x42];
        let table = parse(&data, 0, 3, |_| None).unwrap();

        assert_eq!(table[0x41], Some(1));
        assert_eq!(table[0x42], Some(2));
        assert_eq!(table[0x43], None);
    }

    #[test]
    fn format_1_ranges() {
        // Codes 0x20..=0x22 -> glyphs 1..=3.
        let data = [0x01, 0x01, 0x20, 0x02];
        let table = parse(&data, 0, 4, |_| None).unwrap();

        assert_eq!(table[0x20], Some(1));
        assert_eq!(table[0x22], Some(3));
        assert_eq!(table[0x23], None);
    }

    #[test]
    fn supplements_resolve_through_sids() {
        // Format 0 with one code plus a supplement for sid 42.
        let data = [0x80, 0x01, 0x41, 0x01, 0x61, 0x00, 0x2A];
        let table = parse(&data, 0, 5, |sid| (sid == 42).then_some(4)).unwrap();

        assert_eq!(table[0x41], Some(1));
        assert_eq!(table[0x61], Some(4));
    }

    #[test]
    fn out_of_range_glyphs_are_dropped() {
        let data = [0x00, 0x02, 0x41, 0x42];
        let table = parse(&data, 0, 2, |_| None).unwrap();

        assert_eq!(table[0x41], Some(1));
        // Glyph 2 does not exist in a two-glyph font.
        assert_eq!(table[0x42], None);
    }
}
