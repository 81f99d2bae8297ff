/*!
Glyph mapping for bare CFF fonts and OpenType wrapping for embedding them.

PDF files may embed a font as a raw CFF table. [`cff::GlyphMapper`] reads
the structural parts of such a table (no outlines) to translate between
character codes, glyph names and glyph IDs. [`opentype::wrap`] then
synthesizes the remaining OpenType tables around the CFF data so consumers
that only accept complete font files can use it.
*/

#![forbid(unsafe_code)]

pub mod cff;
pub mod opentype;

/// A type-safe wrapper for glyph ID.
#[repr(transparent)]
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Default, Debug, Hash)]
pub struct GlyphId(pub u16);
