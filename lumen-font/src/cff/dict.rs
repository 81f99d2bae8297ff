//! CFF DICT parsing.

use lumen_common::byte::Reader;

/// Two-byte operators are encoded as `1200 + second byte`.
const TWO_BYTE_OPERATOR_MARK: u16 = 1200;

pub(crate) const CHARSET: u16 = 15;
pub(crate) const ENCODING: u16 = 16;
pub(crate) const CHAR_STRINGS: u16 = 17;
pub(crate) const ROS: u16 = TWO_BYTE_OPERATOR_MARK + 30;

/// A streaming parser over the operator/operand pairs of a DICT.
///
/// Operands accumulate until an operator byte is reached; unknown lead
/// bytes abort the parse.
pub(crate) struct DictParser<'a> {
    reader: Reader<'a>,
    operands: Vec<f64>,
}

impl<'a> DictParser<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            operands: Vec::new(),
        }
    }

    /// Advance to the next operator.
    ///
    /// Returns the operator, with the operands available through
    /// [`Self::operands`] until the next call.
    pub(crate) fn next(&mut self) -> Option<u16> {
        self.operands.clear();

        while !self.reader.at_end() {
            let b0 = self.reader.read_byte()?;

            match b0 {
                // Operators.
                0..=11 | 13..=21 => return Some(u16::from(b0)),
                12 => {
                    let b1 = self.reader.read_byte()?;
                    return Some(TWO_BYTE_OPERATOR_MARK + u16::from(b1));
                }
                28 => {
                    let n = self.reader.read_i16()?;
                    self.operands.push(f64::from(n));
                }
                29 => {
                    let n = self.reader.read_i32()?;
                    self.operands.push(f64::from(n));
                }
                30 => {
                    let n = parse_real(&mut self.reader)?;
                    self.operands.push(n);
                }
                32..=246 => {
                    self.operands.push(f64::from(i32::from(b0) - 139));
                }
                247..=250 => {
                    let b1 = self.reader.read_byte()?;
                    let n = (i32::from(b0) - 247) * 256 + i32::from(b1) + 108;
                    self.operands.push(f64::from(n));
                }
                251..=254 => {
                    let b1 = self.reader.read_byte()?;
                    let n = -(i32::from(b0) - 251) * 256 - i32::from(b1) - 108;
                    self.operands.push(f64::from(n));
                }
                // Reserved lead bytes.
                22..=27 | 31 | 255 => return None,
            }
        }

        None
    }

    /// The operands collected for the current operator.
    pub(crate) fn operands(&self) -> &[f64] {
        &self.operands
    }

    /// The single operand of the current operator as a non-negative offset.
    pub(crate) fn operand_offset(&self) -> Option<usize> {
        match self.operands.as_slice() {
            &[n] if n >= 0.0 && n.fract() == 0.0 => Some(n as usize),
            _ => None,
        }
    }
}

/// Parse a packed BCD real number.
fn parse_real(r: &mut Reader<'_>) -> Option<f64> {
    const MAX_LEN: usize = 64;

    let mut text = String::new();

    'outer: loop {
        let byte = r.read_byte()?;

        for nibble in [byte >> 4, byte & 0x0F] {
            match nibble {
                0..=9 => text.push((b'0' + nibble) as char),
                0xA => text.push('.'),
                0xB => text.push('E'),
                0xC => text.push_str("E-"),
                0xE => text.push('-'),
                0xF => break 'outer,
                _ => return None,
            }

            if text.len() > MAX_LEN {
                return None;
            }
        }
    }

    text.parse().ok()
}
