//! Wrapping a bare CFF table into an OpenType font.
//!
//! PDF files may embed a CFF table without the surrounding OpenType
//! structure. Text engines usually want a full font, so this module
//! synthesizes the missing tables (`cmap`, `head`, `hhea`, `hmtx`, `maxp`,
//! `name`, `OS/2` and `post`) around the CFF data.

use crate::GlyphId;

/// The metrics to write into the synthesized tables.
///
/// A zero value means the metric is unknown and a fallback is used
/// instead: 1000 units per em, an ascent of 800 and a descent of -200.
#[derive(Debug, Clone, Default)]
pub struct FontMetrics {
    /// Font units per em square.
    pub units_per_em: u16,
    /// Typographic ascent, in font units.
    pub ascent: i16,
    /// Typographic descent, in font units. Usually negative.
    pub descent: i16,
    /// The number of glyphs in the CFF table.
    pub glyph_count: u16,
    /// Advance widths, indexed by glyph ID. Missing entries are zero.
    pub widths: Vec<u16>,
}

impl FontMetrics {
    fn units_per_em(&self) -> u16 {
        if self.units_per_em == 0 {
            1000
        } else {
            self.units_per_em
        }
    }

    fn ascent(&self) -> i16 {
        if self.ascent == 0 { 800 } else { self.ascent }
    }

    fn descent(&self) -> i16 {
        if self.descent == 0 { -200 } else { self.descent }
    }
}

/// Wrap a CFF table into an OpenType font.
///
/// `mappings` assigns Unicode code points to glyphs and becomes the
/// font's character map. Code points outside the basic multilingual
/// plane are dropped.
pub fn wrap(cff: &[u8], metrics: &FontMetrics, mappings: &[(u32, GlyphId)]) -> Option<Vec<u8>> {
    if metrics.glyph_count == 0 {
        return None;
    }

    let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
        (*b"CFF ", cff.to_vec()),
        (*b"OS/2", build_os2(metrics, mappings)),
        (*b"cmap", build_cmap(mappings)),
        (*b"head", build_head(metrics)),
        (*b"hhea", build_hhea(metrics)),
        (*b"hmtx", build_hmtx(metrics)),
        (*b"maxp", build_maxp(metrics)),
        (*b"name", build_name()),
        (*b"post", build_post()),
    ];

    // Table records shall be sorted by tag.
    tables.sort_by_key(|&(tag, _)| tag);

    let mut w = Writer::new();
    // CFF outlines use the 'OTTO' version tag.
    w.extend(b"OTTO");

    let count = tables.len() as u16;
    let entry_selector = (count as f32).log2().floor() as u16;
    let search_range = 2u16.pow(u32::from(entry_selector)) * 16;
    let range_shift = count * 16 - search_range;
    w.write_u16(count);
    w.write_u16(search_range);
    w.write_u16(entry_selector);
    w.write_u16(range_shift);

    // The checksum adjustment in the head table is computed over the
    // whole font, so it is patched in at the very end.
    let mut checksum_adjustment_offset = None;

    let mut offset = 12 + tables.len() * 16;
    for (tag, data) in &tables {
        if tag == b"head" {
            checksum_adjustment_offset = Some(offset + 8);
        }

        w.extend(tag);
        w.write_u32(checksum(data));
        w.write_u32(offset as u32);
        w.write_u32(data.len() as u32);

        // Tables are aligned to 4 bytes.
        offset += data.len();
        offset = offset.next_multiple_of(4);
    }

    for (_, data) in &tables {
        w.extend(data);
        w.align(4);
    }

    let mut font = w.finish();
    let i = checksum_adjustment_offset?;
    let adjustment = 0xB1B0AFBA_u32.wrapping_sub(checksum(&font));
    font[i..i + 4].copy_from_slice(&adjustment.to_be_bytes());

    Some(font)
}

/// Calculate an OpenType table checksum: the wrapping sum of the data
/// read as big-endian u32s, zero-padded to a multiple of four bytes.
fn checksum(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for chunk in data.chunks(4) {
        let mut bytes = [0; 4];
        bytes[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(bytes));
    }
    sum
}

fn build_head(metrics: &FontMetrics) -> Vec<u8> {
    let mut w = Writer::new();
    w.write_u32(0x00010000);
    // Font revision.
    w.write_u32(0);
    // Checksum adjustment, patched after assembly.
    w.write_u32(0);
    w.write_u32(0x5F0F3CF5);
    // Flags.
    w.write_u16(0);
    w.write_u16(metrics.units_per_em());
    // Created and modified dates.
    w.write_u32(0);
    w.write_u32(0);
    w.write_u32(0);
    w.write_u32(0);
    // Bounding box.
    for _ in 0..4 {
        w.write_i16(0);
    }
    // Mac style and lowest readable size.
    w.write_u16(0);
    w.write_u16(8);
    // Font direction hint.
    w.write_i16(2);
    // Index-to-location format and glyph data format.
    w.write_i16(0);
    w.write_i16(0);
    w.finish()
}

fn build_hhea(metrics: &FontMetrics) -> Vec<u8> {
    let advance_max = metrics.widths.iter().copied().max().unwrap_or(0);

    let mut w = Writer::new();
    w.write_u32(0x00010000);
    w.write_i16(metrics.ascent());
    w.write_i16(metrics.descent());
    // Line gap.
    w.write_i16(0);
    w.write_u16(advance_max);
    // Min left/right side bearings and max extent.
    w.write_i16(0);
    w.write_i16(0);
    w.write_i16(0);
    // Caret slope and offset.
    w.write_i16(1);
    w.write_i16(0);
    w.write_i16(0);
    // Reserved.
    for _ in 0..4 {
        w.write_i16(0);
    }
    // Metric data format.
    w.write_i16(0);
    w.write_u16(metrics.glyph_count);
    w.finish()
}

fn build_maxp(metrics: &FontMetrics) -> Vec<u8> {
    let mut w = Writer::new();
    // Version 0.5, for fonts with CFF outlines.
    w.write_u32(0x00005000);
    w.write_u16(metrics.glyph_count);
    w.finish()
}

fn build_hmtx(metrics: &FontMetrics) -> Vec<u8> {
    let mut w = Writer::new();
    for gid in 0..metrics.glyph_count {
        let width = metrics.widths.get(usize::from(gid)).copied().unwrap_or(0);
        w.write_u16(width);
        // Left side bearing.
        w.write_i16(0);
    }
    w.finish()
}

fn build_post() -> Vec<u8> {
    let mut w = Writer::new();
    // Version 3: no glyph name data.
    w.write_u32(0x00030000);
    // Italic angle.
    w.write_u32(0);
    // Underline position and thickness.
    w.write_i16(0);
    w.write_i16(0);
    // Fixed pitch flag and memory hints.
    for _ in 0..5 {
        w.write_u32(0);
    }
    w.finish()
}

fn build_name() -> Vec<u8> {
    let mut w = Writer::new();
    // Format 0 with no records.
    w.write_u16(0);
    w.write_u16(0);
    w.write_u16(6);
    w.finish()
}

fn build_os2(metrics: &FontMetrics, mappings: &[(u32, GlyphId)]) -> Vec<u8> {
    let codes = mappings.iter().map(|&(c, _)| c).filter(|&c| c <= 0xFFFF);
    let first_char = codes.clone().min().unwrap_or(0) as u16;
    let last_char = codes.max().unwrap_or(0) as u16;

    let mut w = Writer::new();
    // Version 4.
    w.write_u16(4);
    // Average char width.
    w.write_i16(0);
    // Weight and width class.
    w.write_u16(400);
    w.write_u16(5);
    // Embedding permissions.
    w.write_u16(0);
    // Subscript, superscript and strikeout metrics.
    for _ in 0..12 {
        w.write_i16(0);
    }
    // Family class and PANOSE.
    w.write_i16(0);
    w.extend(&[0; 10]);
    // Unicode ranges.
    for _ in 0..4 {
        w.write_u32(0);
    }
    // Vendor ID.
    w.extend(b"    ");
    // Selection flags: regular.
    w.write_u16(0x0040);
    w.write_u16(first_char);
    w.write_u16(last_char);
    w.write_i16(metrics.ascent());
    w.write_i16(metrics.descent());
    // Typo line gap.
    w.write_i16(0);
    w.write_u16(metrics.ascent().unsigned_abs());
    w.write_u16(metrics.descent().unsigned_abs());
    // Code page ranges.
    w.write_u32(0);
    w.write_u32(0);
    // x-height and cap height.
    w.write_i16(0);
    w.write_i16(0);
    // Default and break characters, max context.
    w.write_u16(0);
    w.write_u16(32);
    w.write_u16(0);
    w.finish()
}

fn build_cmap(mappings: &[(u32, GlyphId)]) -> Vec<u8> {
    // Format 4 covers the basic multilingual plane only. Code 0xFFFF is
    // reserved for the final sentinel segment.
    let mut pairs: Vec<(u16, u16)> = mappings
        .iter()
        .filter(|&&(code, _)| code <= 0xFFFE)
        .map(|&(code, gid)| (code as u16, gid.0))
        .collect();
    pairs.sort_unstable();
    pairs.dedup_by_key(|&mut (code, _)| code);

    // Split into segments of consecutive codes with a constant
    // code-to-glyph delta.
    let mut segments: Vec<(u16, u16, u16)> = Vec::new();
    for &(code, gid) in &pairs {
        let delta = gid.wrapping_sub(code);

        match segments.last_mut() {
            Some((_, end, seg_delta)) if *end + 1 == code && *seg_delta == delta => {
                *end = code;
            }
            _ => segments.push((code, code, delta)),
        }
    }

    // The sentinel segment maps 0xFFFF to glyph 0.
    segments.push((0xFFFF, 0xFFFF, 1));

    let seg_count = segments.len() as u16;
    let entry_selector = (seg_count as f32).log2().floor() as u16;
    let search_range = 2u16.pow(u32::from(entry_selector)) * 2;

    let mut sub = Writer::new();
    sub.write_u16(4);
    // Length, filled in below.
    sub.write_u16(0);
    // Language.
    sub.write_u16(0);
    sub.write_u16(seg_count * 2);
    sub.write_u16(search_range);
    sub.write_u16(entry_selector);
    sub.write_u16(seg_count * 2 - search_range);

    for &(_, end, _) in &segments {
        sub.write_u16(end);
    }
    // Reserved padding.
    sub.write_u16(0);
    for &(start, _, _) in &segments {
        sub.write_u16(start);
    }
    for &(_, _, delta) in &segments {
        sub.write_u16(delta);
    }
    // Only delta segments are produced, so all range offsets are zero.
    for _ in &segments {
        sub.write_u16(0);
    }

    let mut sub = sub.finish();
    let len = sub.len() as u16;
    sub[2..4].copy_from_slice(&len.to_be_bytes());

    let mut w = Writer::new();
    // Version and subtable count.
    w.write_u16(0);
    w.write_u16(1);
    // Windows platform, Unicode BMP encoding.
    w.write_u16(3);
    w.write_u16(1);
    w.write_u32(12);
    let mut out = w.finish();
    out.extend(sub);
    out
}

/// A big-endian byte sink.
struct Writer(Vec<u8>);

impl Writer {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn write_u16(&mut self, n: u16) {
        self.0.extend(n.to_be_bytes());
    }

    fn write_i16(&mut self, n: i16) {
        self.0.extend(n.to_be_bytes());
    }

    fn write_u32(&mut self, n: u32) {
        self.0.extend(n.to_be_bytes());
    }

    fn extend(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// Pad with zeros up to the given alignment.
    fn align(&mut self, to: usize) {
        while self.0.len() % to != 0 {
            self.0.push(0);
        }
    }

    fn finish(self) -> Vec<u8> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_common::byte::Reader;

    fn metrics() -> FontMetrics {
        FontMetrics {
            units_per_em: 2048,
            ascent: 1638,
            descent: -410,
            glyph_count: 4,
            widths: vec![500, 600, 700],
        }
    }

    fn find_table<'a>(font: &'a [u8], tag: &[u8; 4]) -> Option<&'a [u8]> {
        let mut r = Reader::new_at(font, 4)?;
        let count = r.read_u16()?;
        r.skip(6)?;

        for _ in 0..count {
            let record_tag = r.read_bytes(4)?;
            let _checksum = r.read_u32()?;
            let offset = r.read_u32()? as usize;
            let length = r.read_u32()? as usize;

            if record_tag == tag.as_slice() {
                return font.get(offset..offset + length);
            }
        }

        None
    }

    /// Resolve a code through a format 4 cmap subtable.
    fn lookup(cmap: &[u8], code: u16) -> Option<u16> {
        let mut r = Reader::new_at(cmap, 8)?;
        let subtable_offset = r.read_u32()? as usize;

        let mut r = Reader::new_at(cmap, subtable_offset)?;
        assert_eq!(r.read_u16()?, 4);
        r.skip(4)?;
        let seg_count = usize::from(r.read_u16()?) / 2;
        r.skip(6)?;

        let base = subtable_offset + 14;
        for i in 0..seg_count {
            let end = Reader::new_at(cmap, base + i * 2)?.read_u16()?;
            if code > end {
                continue;
            }

            let start = Reader::new_at(cmap, base + (seg_count + 1 + i) * 2)?.read_u16()?;
            if code < start {
                return None;
            }

            let delta = Reader::new_at(cmap, base + (2 * seg_count + 1 + i) * 2)?.read_u16()?;
            return Some(code.wrapping_add(delta));
        }

        None
    }

    #[test]
    fn checksum_adjustment_fixed_point() {
        let font = wrap(&[1, 0, 4, 1], &metrics(), &[(b'A'.into(), GlyphId(1))]).unwrap();
        // With the adjustment in place, the whole font sums to the magic
        // constant.
        assert_eq!(checksum(&font), 0xB1B0AFBA);
    }

    #[test]
    fn directory_is_sorted_and_aligned() {
        let font = wrap(&[1, 0, 4, 1], &metrics(), &[]).unwrap();
        assert_eq!(&font[0..4], b"OTTO");

        let count = usize::from(u16::from_be_bytes([font[4], font[5]]));
        assert_eq!(count, 9);

        let mut tags = Vec::new();
        for i in 0..count {
            let record = &font[12 + i * 16..12 + i * 16 + 16];
            tags.push(record[0..4].to_vec());
            let offset = u32::from_be_bytes([record[8], record[9], record[10], record[11]]);
            assert_eq!(offset % 4, 0);
        }

        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn cmap_resolves_mappings() {
        let mappings = [
            (b'A'.into(), GlyphId(1)),
            (b'B'.into(), GlyphId(2)),
            (b'z'.into(), GlyphId(3)),
            // Outside the BMP, dropped.
            (0x1F600, GlyphId(3)),
        ];
        let font = wrap(&[1, 0, 4, 1], &metrics(), &mappings).unwrap();
        let cmap = find_table(&font, b"cmap").unwrap();

        assert_eq!(lookup(cmap, b'A'.into()), Some(1));
        assert_eq!(lookup(cmap, b'B'.into()), Some(2));
        assert_eq!(lookup(cmap, b'z'.into()), Some(3));
        assert_eq!(lookup(cmap, b'C'.into()), None);
    }

    #[test]
    fn fallback_metrics() {
        let metrics = FontMetrics {
            glyph_count: 1,
            ..FontMetrics::default()
        };
        let font = wrap(&[1, 0, 4, 1], &metrics, &[]).unwrap();

        let head = find_table(&font, b"head").unwrap();
        assert_eq!(u16::from_be_bytes([head[18], head[19]]), 1000);

        let hhea = find_table(&font, b"hhea").unwrap();
        assert_eq!(i16::from_be_bytes([hhea[4], hhea[5]]), 800);
        assert_eq!(i16::from_be_bytes([hhea[6], hhea[7]]), -200);
    }

    #[test]
    fn empty_fonts_are_rejected() {
        assert!(wrap(&[], &FontMetrics::default(), &[]).is_none());
    }

    #[test]
    fn hmtx_covers_every_glyph() {
        let font = wrap(&[1, 0, 4, 1], &metrics(), &[]).unwrap();
        let hmtx = find_table(&font, b"hmtx").unwrap();

        // Four glyphs, four metric entries; the missing width is zero.
        assert_eq!(hmtx.len(), 16);
        assert_eq!(u16::from_be_bytes([hmtx[0], hmtx[1]]), 500);
        assert_eq!(u16::from_be_bytes([hmtx[12], hmtx[13]]), 0);
    }
}
