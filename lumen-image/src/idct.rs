//! The inverse DCT for 8x8 JPEG coefficient blocks.
//!
//! This is the scaled float algorithm by Arai, Agui and Nakajima: the
//! AAN scale factors are folded into the dequantization table, which
//! leaves each 1-D pass with only five multiplications.

/// Side length of a coefficient block.
const BLOCK_SIZE: usize = 8;

/// sqrt(2) and the cosine-derived butterfly constants.
const SQRT_2: f32 = 1.414213562;
const C2_SUM: f32 = 1.847759065;
const C2_A: f32 = 1.082392200;
const C2_B: f32 = -2.613125930;

/// `cos(k * PI / 16) * sqrt(2)` for k = 1..8, and 1.0 for k = 0.
const AAN_SCALE: [f32; 8] = [
    1.0,
    1.387039845,
    1.306562965,
    1.175875602,
    1.0,
    0.785694958,
    0.541196100,
    0.275899379,
];

/// A dequantization table with the AAN scale factors folded in.
///
/// Built once per quantization table and reused for every block that
/// references it.
#[derive(Debug, Clone)]
pub struct QuantTable {
    scaled: [f32; 64],
}

impl QuantTable {
    /// Fold the AAN scale factors and the final 1/8 descale into the
    /// given quantization values.
    pub fn new(values: &[u16; 64]) -> Self {
        let mut scaled = [0.0; 64];

        for row in 0..BLOCK_SIZE {
            for col in 0..BLOCK_SIZE {
                let i = row * BLOCK_SIZE + col;
                scaled[i] = f32::from(values[i]) * AAN_SCALE[row] * AAN_SCALE[col] * 0.125;
            }
        }

        Self { scaled }
    }
}

/// Dequantize a block of coefficients and transform it into 0-255
/// samples.
///
/// `coeffs` holds the entropy-decoded coefficients in row-major order.
/// The output samples are level-shifted by 128.
pub fn dequantize_and_idct_block(coeffs: &[i16; 64], qt: &QuantTable, out: &mut [u8; 64]) {
    // Blocks with a lone DC coefficient are flat, so the butterflies
    // can be skipped entirely.
    if coeffs[1..].iter().all(|&c| c == 0) {
        let level = f32::from(coeffs[0]) * qt.scaled[0];
        out.fill(clamp_sample(level));
        return;
    }

    let mut block = [0.0f32; 64];
    for (slot, (&coeff, &scale)) in block.iter_mut().zip(coeffs.iter().zip(&qt.scaled)) {
        *slot = f32::from(coeff) * scale;
    }

    // Pass 1: one butterfly per row.
    for row in block.chunks_exact_mut(BLOCK_SIZE) {
        // A row without AC energy transforms to its DC value.
        if row[1..].iter().all(|&c| c == 0.0) {
            row.fill(row[0]);
            continue;
        }

        let transformed = idct_1d([
            row[0], row[1], row[2], row[3], row[4], row[5], row[6], row[7],
        ]);
        row.copy_from_slice(&transformed);
    }

    // Pass 2: one butterfly per column.
    for col in 0..BLOCK_SIZE {
        let transformed = idct_1d([
            block[col],
            block[col + 8],
            block[col + 16],
            block[col + 24],
            block[col + 32],
            block[col + 40],
            block[col + 48],
            block[col + 56],
        ]);

        for (row, value) in transformed.into_iter().enumerate() {
            out[row * BLOCK_SIZE + col] = clamp_sample(value);
        }
    }
}

/// One 8-point scaled IDCT over prescaled inputs.
fn idct_1d(input: [f32; 8]) -> [f32; 8] {
    // Even part.
    let tmp10 = input[0] + input[4];
    let tmp11 = input[0] - input[4];
    let tmp13 = input[2] + input[6];
    let tmp12 = (input[2] - input[6]) * SQRT_2 - tmp13;

    let tmp0 = tmp10 + tmp13;
    let tmp3 = tmp10 - tmp13;
    let tmp1 = tmp11 + tmp12;
    let tmp2 = tmp11 - tmp12;

    // Odd part.
    let z13 = input[5] + input[3];
    let z10 = input[5] - input[3];
    let z11 = input[1] + input[7];
    let z12 = input[1] - input[7];

    let tmp7 = z11 + z13;
    let tmp11 = (z11 - z13) * SQRT_2;
    let z5 = (z10 + z12) * C2_SUM;
    let tmp10 = C2_A * z12 - z5;
    let tmp12 = C2_B * z10 + z5;

    let tmp6 = tmp12 - tmp7;
    let tmp5 = tmp11 - tmp6;
    let tmp4 = tmp10 + tmp5;

    [
        tmp0 + tmp7,
        tmp1 + tmp6,
        tmp2 + tmp5,
        tmp3 - tmp4,
        tmp3 + tmp4,
        tmp2 - tmp5,
        tmp1 - tmp6,
        tmp0 - tmp7,
    ]
}

/// Level-shift by 128 and clamp to the sample range.
fn clamp_sample(value: f32) -> u8 {
    (value + 128.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct evaluation of the IDCT definition, in f64.
    fn reference_idct(coeffs: &[i16; 64], qt: &[u16; 64]) -> [u8; 64] {
        let mut out = [0u8; 64];

        for y in 0..8 {
            for x in 0..8 {
                let mut sum = 0.0f64;

                for v in 0..8 {
                    for u in 0..8 {
                        let cu = if u == 0 { 1.0 / 2.0f64.sqrt() } else { 1.0 };
                        let cv = if v == 0 { 1.0 / 2.0f64.sqrt() } else { 1.0 };
                        let coeff = f64::from(coeffs[v * 8 + u]) * f64::from(qt[v * 8 + u]);

                        sum += cu
                            * cv
                            * coeff
                            * ((2.0 * x as f64 + 1.0) * u as f64 * std::f64::consts::PI / 16.0)
                                .cos()
                            * ((2.0 * y as f64 + 1.0) * v as f64 * std::f64::consts::PI / 16.0)
                                .cos();
                    }
                }

                out[y * 8 + x] = (sum / 4.0 + 128.0).round().clamp(0.0, 255.0) as u8;
            }
        }

        out
    }

    fn assert_close(actual: &[u8; 64], expected: &[u8; 64]) {
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                a.abs_diff(*e) <= 1,
                "sample {i} differs: {a} vs {e}",
            );
        }
    }

    #[test]
    fn dc_only_block_is_flat() {
        let mut coeffs = [0i16; 64];
        coeffs[0] = 16;
        let qt = QuantTable::new(&[8; 64]);

        let mut out = [0u8; 64];
        dequantize_and_idct_block(&coeffs, &qt, &mut out);

        // 16 * 8 / 8 + 128 = 144.
        assert_eq!(out, [144; 64]);
    }

    #[test]
    fn single_ac_coefficient() {
        let mut coeffs = [0i16; 64];
        coeffs[0] = 12;
        coeffs[1] = -20;
        let quant = [10u16; 64];
        let qt = QuantTable::new(&quant);

        let mut out = [0u8; 64];
        dequantize_and_idct_block(&coeffs, &qt, &mut out);

        assert_close(&out, &reference_idct(&coeffs, &quant));
    }

    #[test]
    fn dense_block_matches_reference() {
        // A deterministic pseudo-random block.
        let mut coeffs = [0i16; 64];
        let mut state = 0x2F6E2B1u32;
        for slot in &mut coeffs {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            *slot = ((state >> 24) as i16) - 128;
        }

        let mut quant = [0u16; 64];
        for (i, q) in quant.iter_mut().enumerate() {
            *q = 4 + (i as u16) % 13;
        }

        let qt = QuantTable::new(&quant);
        let mut out = [0u8; 64];
        dequantize_and_idct_block(&coeffs, &qt, &mut out);

        assert_close(&out, &reference_idct(&coeffs, &quant));
    }

    #[test]
    fn saturating_block_clamps() {
        let mut coeffs = [0i16; 64];
        coeffs[0] = 2047;
        let qt = QuantTable::new(&[255; 64]);

        let mut out = [0u8; 64];
        dequantize_and_idct_block(&coeffs, &qt, &mut out);
        assert_eq!(out, [255; 64]);

        coeffs[0] = -2048;
        dequantize_and_idct_block(&coeffs, &qt, &mut out);
        assert_eq!(out, [0; 64]);
    }
}
