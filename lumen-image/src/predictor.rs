//! Undoing the predictors applied to flate and LZW image streams.
//!
//! PDF streams may be filtered row by row before compression, either
//! with the PNG filters (predictors 10 and up, one filter byte per row)
//! or with TIFF horizontal differencing (predictor 2). Decoding
//! reverses the filtering in strict top-to-bottom order.

use log::warn;
use lumen_common::bit::{BitReader, BitWriter};
use lumen_common::byte::Reader;

/// The predictor parameters of a stream, with the PDF defaults.
#[derive(Debug, Clone, Copy)]
pub struct PredictorParams {
    /// The predictor id: 1 is none, 2 is TIFF, 10 and up are PNG.
    pub predictor: u8,
    /// Color components per pixel.
    pub colors: u8,
    /// Bits per color component: 1, 2, 4, 8 or 16.
    pub bits_per_component: u8,
    /// Pixels per row.
    pub columns: usize,
}

impl Default for PredictorParams {
    fn default() -> Self {
        Self {
            predictor: 1,
            colors: 1,
            bits_per_component: 8,
            columns: 1,
        }
    }
}

impl PredictorParams {
    fn bits_per_pixel(&self) -> usize {
        usize::from(self.bits_per_component) * usize::from(self.colors)
    }

    /// The byte distance between a sample and the one to its left, as
    /// used by the PNG filters. At least one.
    fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel().div_ceil(8)
    }

    fn row_length_in_bytes(&self) -> usize {
        (self.columns * self.bits_per_pixel()).div_ceil(8)
    }
}

/// Undo the predictor named by the parameters.
///
/// Predictor 1 and unknown predictor ids pass the data through
/// unchanged.
pub fn undo(data: Vec<u8>, params: &PredictorParams) -> Option<Vec<u8>> {
    match params.predictor {
        2 => undo_tiff(data, params),
        10.. => unfilter_png(&data, params),
        predictor => {
            if predictor != 1 {
                warn!("unknown predictor {predictor}, leaving data unfiltered");
            }

            Some(data)
        }
    }
}

/// Undo the PNG row filters.
///
/// Each input row starts with a filter byte naming the filter applied
/// to it. Unknown filter bytes are treated as no filter so that a
/// damaged row does not lose the rest of the image.
pub fn unfilter_png(data: &[u8], params: &PredictorParams) -> Option<Vec<u8>> {
    let row_len = params.row_length_in_bytes();
    let bpp = params.bytes_per_pixel();

    // Each row carries its filter byte.
    let num_rows = data.len() / (row_len + 1);
    if num_rows * (row_len + 1) != data.len() {
        return None;
    }

    let mut out = Vec::with_capacity(num_rows * row_len);
    let mut prev_row = vec![0u8; row_len];
    let mut cur_row = vec![0u8; row_len];
    let mut r = Reader::new(data);

    for _ in 0..num_rows {
        let filter = r.read_byte()?;
        cur_row.copy_from_slice(r.read_bytes(row_len)?);

        match filter {
            1 => {
                for i in bpp..row_len {
                    cur_row[i] = cur_row[i].wrapping_add(cur_row[i - bpp]);
                }
            }
            2 => {
                for i in 0..row_len {
                    cur_row[i] = cur_row[i].wrapping_add(prev_row[i]);
                }
            }
            3 => {
                for i in 0..row_len {
                    let left = if i >= bpp { cur_row[i - bpp] } else { 0 };
                    let avg = (u16::from(left) + u16::from(prev_row[i])) / 2;
                    cur_row[i] = cur_row[i].wrapping_add(avg as u8);
                }
            }
            4 => {
                for i in 0..row_len {
                    let left = if i >= bpp { cur_row[i - bpp] } else { 0 };
                    let up_left = if i >= bpp { prev_row[i - bpp] } else { 0 };
                    cur_row[i] = cur_row[i].wrapping_add(paeth(left, prev_row[i], up_left));
                }
            }
            0 => {}
            _ => warn!("unknown PNG filter {filter}, treating row as unfiltered"),
        }

        out.extend_from_slice(&cur_row);
        std::mem::swap(&mut prev_row, &mut cur_row);
    }

    Some(out)
}

/// The Paeth predictor: whichever of the three neighbors is closest to
/// `left + up - up_left`. Ties prefer left over up over up-left.
fn paeth(left: u8, up: u8, up_left: u8) -> u8 {
    let p = i16::from(left) + i16::from(up) - i16::from(up_left);
    let pa = (p - i16::from(left)).abs();
    let pb = (p - i16::from(up)).abs();
    let pc = (p - i16::from(up_left)).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        up
    } else {
        up_left
    }
}

/// Undo TIFF horizontal differencing.
///
/// Each sample had the sample one pixel to its left (same component)
/// subtracted, modulo the sample bit width. Sub-byte depths are
/// unpacked into whole samples and repacked after summing.
pub fn undo_tiff(mut data: Vec<u8>, params: &PredictorParams) -> Option<Vec<u8>> {
    let row_len = params.row_length_in_bytes();
    if row_len == 0 || data.len() % row_len != 0 {
        return None;
    }

    let colors = usize::from(params.colors);

    match params.bits_per_component {
        8 => {
            for row in data.chunks_exact_mut(row_len) {
                for i in colors..row.len() {
                    row[i] = row[i].wrapping_add(row[i - colors]);
                }
            }
        }
        16 => {
            for row in data.chunks_exact_mut(row_len) {
                let num_samples = row.len() / 2;

                for i in colors..num_samples {
                    let prev = u16::from_be_bytes([row[2 * (i - colors)], row[2 * (i - colors) + 1]]);
                    let cur = u16::from_be_bytes([row[2 * i], row[2 * i + 1]]);
                    row[2 * i..2 * i + 2].copy_from_slice(&cur.wrapping_add(prev).to_be_bytes());
                }
            }
        }
        bits @ (1 | 2 | 4) => {
            let num_samples = params.columns * colors;
            let mask = (1u32 << bits) - 1;
            let mut samples = vec![0u32; num_samples];

            for row in data.chunks_exact_mut(row_len) {
                let mut reader = BitReader::new(row);
                for sample in &mut samples {
                    *sample = reader.read(bits)?;
                }

                for i in colors..num_samples {
                    samples[i] = (samples[i] + samples[i - colors]) & mask;
                }

                let mut writer = BitWriter::new(row, bits)?;
                writer.write_bits(samples.iter().copied())?;
                writer.align();
            }
        }
        bits => {
            warn!("unsupported component depth {bits} for TIFF differencing");
            return None;
        }
    }

    Some(data)
}
