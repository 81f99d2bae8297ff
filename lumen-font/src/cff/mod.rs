//! Reading the structural parts of a bare CFF table.
//!
//! Only the tables needed for glyph mapping are touched: the Top DICT, the
//! CharStrings INDEX (for the glyph count), the charset, the encoding and
//! the String INDEX. Outlines are never parsed.

mod charset;
mod dict;
mod encoding;
mod index;
mod std_names;

use crate::GlyphId;
use dict::DictParser;
use encoding::CodeToGid;
use index::{parse_index, skip_index};
use log::warn;
use lumen_common::byte::Reader;
use rustc_hash::FxHashMap;
use std_names::{
    EXPERT_CHARSET, EXPERT_ENCODING, EXPERT_SUBSET_CHARSET, STANDARD_ENCODING,
    STANDARD_SID_BY_NAME, STANDARD_STRINGS,
};

/// Predefined charset and encoding identifiers.
const ISO_ADOBE: usize = 0;
const EXPERT: usize = 1;
const EXPERT_SUBSET: usize = 2;

/// Maps between character codes, glyph names and glyph IDs of a CFF font.
///
/// Parsing is all-or-nothing: a font whose mapping tables cannot be fully
/// read yields no mapper at all.
#[derive(Debug, Clone)]
pub struct GlyphMapper {
    /// One string ID per glyph.
    sids: Vec<u16>,
    sid_to_gid: FxHashMap<u16, u16>,
    /// Custom strings; string ID 391 and up.
    strings: Vec<String>,
    code_to_gid: CodeToGid,
}

impl GlyphMapper {
    /// Parse the given CFF data.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut r = Reader::new(data);

        let major = r.read_byte()?;
        if major != 1 {
            warn!("unsupported CFF version {major}");
            return None;
        }
        let _minor = r.read_byte()?;
        let header_size = r.read_byte()?;
        let _offset_size = r.read_byte()?;

        let mut r = Reader::new_at(data, usize::from(header_size))?;
        skip_index(&mut r)?;

        let top_dicts = parse_index(&mut r)?;
        let top_dict = parse_top_dict(top_dicts.get(0)?)?;

        if top_dict.is_cid_keyed {
            warn!("CID-keyed CFF fonts have no glyph names");
            return None;
        }

        let string_index = parse_index(&mut r)?;

        let mut charstrings = Reader::new_at(data, top_dict.charstrings_offset?)?;
        let glyph_count = u16::try_from(parse_index(&mut charstrings)?.len()).ok()?;
        if glyph_count == 0 {
            return None;
        }

        let sids = match top_dict.charset_offset {
            ISO_ADOBE => (0..glyph_count).collect(),
            EXPERT => predefined_charset(&EXPERT_CHARSET, glyph_count),
            EXPERT_SUBSET => predefined_charset(&EXPERT_SUBSET_CHARSET, glyph_count),
            offset => charset::parse(data, offset, glyph_count)?,
        };

        let mut sid_to_gid = FxHashMap::default();
        for (gid, sid) in sids.iter().enumerate() {
            sid_to_gid.entry(*sid).or_insert(gid as u16);
        }

        let code_to_gid = match top_dict.encoding_offset {
            ISO_ADOBE => predefined_encoding(&STANDARD_ENCODING, &sid_to_gid),
            EXPERT => predefined_encoding(&EXPERT_ENCODING, &sid_to_gid),
            offset => encoding::parse(data, offset, glyph_count, |sid| {
                sid_to_gid.get(&sid).copied()
            })?,
        };

        let strings = string_index
            .iter()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect();

        Some(Self {
            sids,
            sid_to_gid,
            strings,
            code_to_gid,
        })
    }

    /// The number of glyphs in the font.
    pub fn glyph_count(&self) -> u16 {
        self.sids.len() as u16
    }

    /// The name of the given glyph.
    pub fn glyph_name(&self, glyph: GlyphId) -> Option<&str> {
        let sid = usize::from(*self.sids.get(usize::from(glyph.0))?);

        match STANDARD_STRINGS.get(sid) {
            Some(name) => Some(name),
            None => self
                .strings
                .get(sid - STANDARD_STRINGS.len())
                .map(String::as_str),
        }
    }

    /// The glyph with the given name.
    pub fn glyph_by_name(&self, name: &str) -> Option<GlyphId> {
        let sid = match STANDARD_SID_BY_NAME.get(name) {
            Some(sid) => *sid,
            None => {
                let position = self.strings.iter().position(|s| s == name)?;
                u16::try_from(STANDARD_STRINGS.len() + position).ok()?
            }
        };

        self.sid_to_gid.get(&sid).copied().map(GlyphId)
    }

    /// The glyph selected by the given character code through the font's
    /// encoding.
    pub fn code_to_gid(&self, code: u8) -> Option<GlyphId> {
        self.code_to_gid[usize::from(code)].map(GlyphId)
    }
}

struct TopDict {
    charset_offset: usize,
    encoding_offset: usize,
    charstrings_offset: Option<usize>,
    is_cid_keyed: bool,
}

fn parse_top_dict(data: &[u8]) -> Option<TopDict> {
    let mut top = TopDict {
        charset_offset: ISO_ADOBE,
        encoding_offset: ISO_ADOBE,
        charstrings_offset: None,
        is_cid_keyed: false,
    };

    let mut parser = DictParser::new(data);
    while let Some(operator) = parser.next() {
        match operator {
            dict::CHARSET => top.charset_offset = parser.operand_offset()?,
            dict::ENCODING => top.encoding_offset = parser.operand_offset()?,
            dict::CHAR_STRINGS => top.charstrings_offset = Some(parser.operand_offset()?),
            dict::ROS => top.is_cid_keyed = true,
            _ => {}
        }
    }

    Some(top)
}

/// Assign string IDs by glyph ID from a predefined charset. Glyphs past
/// the end of the table stay at `.notdef`.
fn predefined_charset(table: &[u16], glyph_count: u16) -> Vec<u16> {
    (0..usize::from(glyph_count))
        .map(|gid| table.get(gid).copied().unwrap_or(0))
        .collect()
}

/// Build the code table for a predefined encoding.
fn predefined_encoding(codes: &[u16; 256], sid_to_gid: &FxHashMap<u16, u16>) -> CodeToGid {
    let mut table: CodeToGid = Box::new([None; 256]);

    for (code, sid) in codes.iter().enumerate() {
        if *sid != 0 {
            table[code] = sid_to_gid.get(sid).copied();
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assemble a minimal CFF font.
    ///
    /// The font has `glyph_count` glyphs with dummy charstrings, the given
    /// charset body (appended verbatim, referenced from the Top DICT) and
    /// one custom string (`"custom"`, string ID 391).
    fn build_cff(glyph_count: u8, charset: &[u8], cid_keyed: bool) -> Vec<u8> {
        let mut out = vec![1, 0, 4, 1];

        // Name INDEX with a single name.
        out.extend([0, 1, 1, 1, 5]);
        out.extend(b"Test");

        // The Top DICT uses fixed-width operands, so its size is known
        // before the offsets are.
        let top_dict_len = if cid_keyed { 23 } else { 18 };
        let top_dict_index_len = 2 + 1 + 2 + top_dict_len;
        let string_index_len = 2 + 1 + 2 + 6;
        let base = out.len() + top_dict_index_len + string_index_len;

        // CharStrings INDEX: one endchar byte per glyph.
        let mut charstrings = vec![0, glyph_count, 1];
        charstrings.extend(1..=glyph_count + 1);
        charstrings.extend(std::iter::repeat_n(0x0E, usize::from(glyph_count)));

        let charstrings_offset = base;
        let charset_offset = charstrings_offset + charstrings.len();

        let mut top_dict = Vec::new();
        let mut push_op = |dict: &mut Vec<u8>, value: usize, op: u8| {
            dict.push(29);
            dict.extend((value as u32).to_be_bytes());
            dict.push(op);
        };
        push_op(&mut top_dict, charset_offset, 15);
        push_op(&mut top_dict, 0, 16);
        push_op(&mut top_dict, charstrings_offset, 17);
        if cid_keyed {
            // ROS with two SID operands and a supplement number.
            top_dict.extend([139, 139, 139, 12, 30]);
        }
        assert_eq!(top_dict.len(), top_dict_len);

        // Top DICT INDEX.
        out.extend([0, 1, 1, 1]);
        out.push(1 + top_dict.len() as u8);
        out.extend(&top_dict);

        // String INDEX with one custom string.
        out.extend([0, 1, 1, 1, 7]);
        out.extend(b"custom");

        assert_eq!(out.len(), base);
        out.extend(&charstrings);
        out.extend(charset);

        out
    }

    /// Charset format 0 mapping glyph 1 to `space` and glyph 2 to the
    /// first custom string.
    fn simple_charset() -> Vec<u8> {
        vec![0x00, 0x00, 0x01, 0x01, 0x87]
    }

    #[test]
    fn glyph_names_round_trip() {
        let data = build_cff(3, &simple_charset(), false);
        let mapper = GlyphMapper::parse(&data).unwrap();

        assert_eq!(mapper.glyph_count(), 3);
        assert_eq!(mapper.glyph_name(GlyphId(0)), Some(".notdef"));
        assert_eq!(mapper.glyph_name(GlyphId(1)), Some("space"));
        assert_eq!(mapper.glyph_name(GlyphId(2)), Some("custom"));
        assert_eq!(mapper.glyph_name(GlyphId(3)), None);

        assert_eq!(mapper.glyph_by_name(".notdef"), Some(GlyphId(0)));
        assert_eq!(mapper.glyph_by_name("space"), Some(GlyphId(1)));
        assert_eq!(mapper.glyph_by_name("custom"), Some(GlyphId(2)));
        assert_eq!(mapper.glyph_by_name("missing"), None);
    }

    #[test]
    fn standard_encoding_resolves_codes() {
        let data = build_cff(3, &simple_charset(), false);
        let mapper = GlyphMapper::parse(&data).unwrap();

        // Code 32 is `space` in the standard encoding.
        assert_eq!(mapper.code_to_gid(32), Some(GlyphId(1)));
        assert_eq!(mapper.code_to_gid(33), None);
        assert_eq!(mapper.code_to_gid(0), None);
    }

    #[test]
    fn cid_keyed_fonts_are_rejected() {
        let data = build_cff(3, &simple_charset(), true);
        assert!(GlyphMapper::parse(&data).is_none());
    }

    #[test]
    fn truncated_data_is_rejected() {
        let data = build_cff(3, &simple_charset(), false);
        assert!(GlyphMapper::parse(&data[..data.len() - 3]).is_none());
        assert!(GlyphMapper::parse(&[]).is_none());
    }

    #[test]
    fn expert_charsets_use_the_predefined_tables() {
        let mut data = build_cff(3, &[], false);
        let base = 4 + 9;

        // Patch the charset operand to the predefined Expert id.
        data[base + 5 + 1..base + 5 + 5].copy_from_slice(&1u32.to_be_bytes());
        let mapper = GlyphMapper::parse(&data).unwrap();
        assert_eq!(mapper.glyph_name(GlyphId(0)), Some(".notdef"));
        assert_eq!(mapper.glyph_name(GlyphId(1)), Some("space"));
        assert_eq!(mapper.glyph_name(GlyphId(2)), Some("exclamsmall"));
        assert_eq!(mapper.glyph_by_name("exclamsmall"), Some(GlyphId(2)));

        // Expert Subset, id 2.
        data[base + 5 + 1..base + 5 + 5].copy_from_slice(&2u32.to_be_bytes());
        let mapper = GlyphMapper::parse(&data).unwrap();
        assert_eq!(mapper.glyph_name(GlyphId(2)), Some("dollaroldstyle"));
    }

    #[test]
    fn expert_encoding_resolves_codes() {
        let mut data = build_cff(3, &[], false);
        let base = 4 + 9;

        // Expert charset and Expert encoding.
        data[base + 5 + 1..base + 5 + 5].copy_from_slice(&1u32.to_be_bytes());
        data[base + 5 + 6 + 1..base + 5 + 6 + 5].copy_from_slice(&1u32.to_be_bytes());
        let mapper = GlyphMapper::parse(&data).unwrap();

        // Code 33 is `exclamsmall` in the Expert Encoding, code 32 is
        // `space`, code 35 is unassigned.
        assert_eq!(mapper.code_to_gid(33), Some(GlyphId(2)));
        assert_eq!(mapper.code_to_gid(32), Some(GlyphId(1)));
        assert_eq!(mapper.code_to_gid(35), None);
        assert_eq!(mapper.code_to_gid(0), None);
    }

    #[test]
    fn iso_adobe_charset_is_the_identity() {
        // Charset offset 0 never reads charset data.
        let mut data = build_cff(2, &[], false);
        // Patch the charset operand to 0.
        let mapper_with_explicit = GlyphMapper::parse(&data);
        assert!(mapper_with_explicit.is_none());

        let base = 4 + 9;
        // Operand layout: 29 <u32 charset> 15 ...
        data[base + 5 + 1..base + 5 + 5].copy_from_slice(&0u32.to_be_bytes());
        let mapper = GlyphMapper::parse(&data).unwrap();

        assert_eq!(mapper.glyph_name(GlyphId(0)), Some(".notdef"));
        assert_eq!(mapper.glyph_name(GlyphId(1)), Some("space"));
    }
}
