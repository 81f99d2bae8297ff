//! Packet header parsing, described in Section B.10.
//!
//! A packet carries the codeword segments contributed by the code
//! blocks of one precinct (per sub-band) for one quality layer. The
//! header encodes, per code block, whether it contributes, how many
//! coding passes it adds and how many bytes it appends. Most of that
//! state is differential against earlier layers, so the parser keeps
//! per-code-block state across packets.

use crate::bits::StuffedBits;
use crate::tag_tree::TagTree;
use log::warn;
use lumen_common::bit::BitReader;
use lumen_common::byte::Reader;

/// Cap on the unary run that grows `lblock`, keeping length fields
/// well inside the 32 bits a reader can produce.
const MAX_LBLOCK_RUN: u32 = 16;

/// Decoding state of one code block.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// Horizontal index in the precinct's code-block grid.
    x: u32,
    /// Vertical index in the precinct's code-block grid.
    y: u32,
    included: bool,
    missing_bit_planes: u8,
    lblock: u32,
    passes: u32,
}

impl CodeBlock {
    fn new(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            included: false,
            missing_bit_planes: 0,
            // B.10.7.1: Lblock starts at three.
            lblock: 3,
            passes: 0,
        }
    }

    /// The number of missing most significant bit planes, known once
    /// the block has been included for the first time.
    pub fn missing_bit_planes(&self) -> u8 {
        self.missing_bit_planes
    }

    /// Total coding passes accumulated over all layers so far.
    pub fn passes(&self) -> u32 {
        self.passes
    }
}

/// One precinct of one sub-band: its code blocks plus the two tag
/// trees that encode inclusion and zero bit-plane information.
#[derive(Debug, Clone)]
pub struct Precinct {
    inclusion: TagTree,
    zero_bit_planes: TagTree,
    code_blocks: Vec<CodeBlock>,
}

impl Precinct {
    /// A precinct with `wide` x `high` code blocks, in raster order.
    pub fn new(wide: u32, high: u32) -> Self {
        let mut code_blocks = Vec::with_capacity((wide * high) as usize);
        for y in 0..high {
            for x in 0..wide {
                code_blocks.push(CodeBlock::new(x, y));
            }
        }

        Self {
            inclusion: TagTree::new(wide, high),
            zero_bit_planes: TagTree::new(wide, high),
            code_blocks,
        }
    }

    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.code_blocks
    }

    fn reset(&mut self) {
        self.inclusion.reset();
        self.zero_bit_planes.reset();
        for block in &mut self.code_blocks {
            *block = CodeBlock::new(block.x, block.y);
        }
    }
}

/// A codeword segment contributed by one code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution<'a> {
    /// Index of the precinct within the parser.
    pub precinct: usize,
    /// Index of the code block within its precinct.
    pub code_block: usize,
    /// Coding passes added by this packet.
    pub passes: u32,
    /// The codeword bytes.
    pub data: &'a [u8],
}

/// One parsed packet.
#[derive(Debug, Clone)]
pub struct Packet<'a> {
    pub contributions: Vec<Contribution<'a>>,
    /// The input remaining after the packet.
    pub remainder: &'a [u8],
}

/// A stateful parser for the packets of one tile.
///
/// The parser owns one [`Precinct`] per (sub-band, precinct position)
/// pair; the caller decides the indexing and names the precincts that
/// contribute to each packet. Packets of a layer must be fed in
/// codestream order, since inclusion information is differential.
#[derive(Debug, Clone)]
pub struct PacketParser {
    precincts: Vec<Precinct>,
}

impl PacketParser {
    pub fn new(precincts: Vec<Precinct>) -> Self {
        Self { precincts }
    }

    /// Restore the state before the first packet, keeping the precinct
    /// geometry.
    pub fn reset(&mut self) {
        for precinct in &mut self.precincts {
            precinct.reset();
        }
    }

    pub fn precinct(&self, index: usize) -> Option<&Precinct> {
        self.precincts.get(index)
    }

    /// Parse one packet for `layer`, covering the precincts named by
    /// `precincts` (one per contributing sub-band, in sub-band order).
    ///
    /// On success, the contributions reference slices of `data` and
    /// `remainder` points past the packet. A `None` leaves the parser
    /// state unusable for further packets of this tile.
    pub fn parse_packet<'a>(
        &mut self,
        data: &'a [u8],
        layer: u16,
        precincts: &[usize],
    ) -> Option<Packet<'a>> {
        let mut reader = BitReader::new(data);

        // B.10.3: a zero first bit means an empty packet that includes
        // no code blocks at all.
        if reader.read_stuffed(1)? == 0 {
            reader.align();
            return Some(Packet {
                contributions: Vec::new(),
                remainder: reader.tail(),
            });
        }

        let mut lengths = Vec::new();

        for &precinct_idx in precincts {
            if precinct_idx >= self.precincts.len() {
                warn!("packet names precinct {precinct_idx} which does not exist");
                return None;
            }

            let precinct = &mut self.precincts[precinct_idx];

            for block_idx in 0..precinct.code_blocks.len() {
                let block = &precinct.code_blocks[block_idx];
                let (x, y) = (block.x, block.y);

                // B.10.4: previously included blocks signal inclusion
                // with a single bit, fresh ones through the tag tree,
                // which stores the first layer they appear in.
                let included = if block.included {
                    reader.read_stuffed(1)? == 1
                } else {
                    let first_layer = u32::from(layer) + 1;
                    precinct
                        .inclusion
                        .read(x, y, &mut reader, first_layer)?
                        <= u32::from(layer)
                };

                if !included {
                    continue;
                }

                // B.10.5: the first inclusion also carries the number
                // of missing most significant bit planes.
                if !precinct.code_blocks[block_idx].included {
                    let missing = precinct
                        .zero_bit_planes
                        .read(x, y, &mut reader, u32::MAX)?;
                    precinct.code_blocks[block_idx].missing_bit_planes =
                        u8::try_from(missing).ok()?;
                }

                let block = &mut precinct.code_blocks[block_idx];
                block.included = true;

                let passes = read_coding_passes(&mut reader)?;
                block.passes += passes;

                // B.10.7.1: a unary run of ones grows Lblock before the
                // length field is read.
                let mut run = 0;
                while reader.read_stuffed(1)? == 1 {
                    run += 1;

                    if run > MAX_LBLOCK_RUN {
                        warn!("runaway Lblock signalling, treating packet as corrupt");
                        return None;
                    }
                }

                block.lblock += run;
                let length_bits = block.lblock + passes.ilog2();
                let length = reader.read_stuffed(u8::try_from(length_bits).ok()?)?;
                lengths.push((precinct_idx, block_idx, passes, length as usize));
            }
        }

        // The codeword segments follow the header at the next byte
        // boundary, back to back in header order.
        reader.align();
        let mut body = Reader::new(reader.tail());

        let mut contributions = Vec::with_capacity(lengths.len());
        for (precinct, code_block, passes, length) in lengths {
            contributions.push(Contribution {
                precinct,
                code_block,
                passes,
                data: body.read_bytes(length)?,
            });
        }

        Some(Packet {
            contributions,
            remainder: body.tail()?,
        })
    }
}

/// Decode the number of coding passes, using the codewords from
/// Table B.4.
fn read_coding_passes(reader: &mut BitReader<'_>) -> Option<u32> {
    if reader.read_stuffed(1)? == 0 {
        return Some(1);
    }

    if reader.read_stuffed(1)? == 0 {
        return Some(2);
    }

    match reader.read_stuffed(2)? {
        0b00 => Some(3),
        0b01 => Some(4),
        0b10 => Some(5),
        _ => {
            // The remaining codewords are 1111 followed by five bits
            // (6 to 36 passes) or 1111 11111 followed by seven bits
            // (37 to 164 passes).
            let next = reader.read_stuffed(5)?;
            if next != 0b11111 {
                return Some(next + 6);
            }

            Some(reader.read_stuffed(7)? + 37)
        }
    }
}
