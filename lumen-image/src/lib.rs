/*!
Pixel-level building blocks for decoding PDF image streams.

This crate covers the two transforms that sit between entropy decoding
and final pixel data:

- the inverse DCT that turns dequantized JPEG coefficient blocks into
  8x8 sample blocks, and
- the predictor undo step that reverses PNG row filtering and TIFF
  horizontal differencing on flate and LZW streams.
*/

#![forbid(unsafe_code)]

pub mod idct;
pub mod predictor;
