/*!
Tier-2 structures of the JPEG 2000 codestream.

JPX images embedded in PDFs interleave their compressed data as packets,
one per combination of layer, resolution, component and precinct. This
crate covers the machinery that locates and splits those packets:

- [`progression`]: the five progression orders and a restartable
  enumerator over packet positions,
- [`tag_tree`]: the incremental quad trees that encode code-block
  inclusion and zero bit-plane counts,
- [`packet`]: the packet header parser itself.

Entropy decoding of the code-block data is out of scope here; the parser
hands out the raw codeword segments.
*/

#![forbid(unsafe_code)]

pub mod packet;
pub mod progression;
pub mod tag_tree;

mod bits;
