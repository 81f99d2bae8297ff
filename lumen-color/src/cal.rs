//! The CalGray and CalRGB color spaces.

use crate::icc::transform::{D65_WHITE, Mat3, SRGB_D65_XYZ_TO_RGB, adaptation, encode_srgb};
use crate::{RgbaSampler, f32_to_u8};

/// A calibrated gray color space.
#[derive(Debug, Clone)]
pub(crate) struct CalGray {
    white_point: [f32; 3],
    gamma: f32,
}

impl CalGray {
    pub(crate) fn new(white_point: [f32; 3], gamma: f32) -> Self {
        Self { white_point, gamma }
    }

    /// With a unit gamma the calibration carries no information, so the
    /// space collapses to device gray.
    pub(crate) fn is_degenerate(&self) -> bool {
        self.gamma == 1.0
    }
}

impl RgbaSampler for CalGray {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let a = components.first().copied().unwrap_or(0.0).clamp(0.0, 1.0);
        let yw = self.white_point[1];

        // Approximates the L* encoding of the resulting luminance.
        let l = yw * a.powf(self.gamma);
        let val = (0.0_f32.max(295.8 * l.powf(0.333_333_34) - 40.8) + 0.5) as u8;

        [val, val, val, 255]
    }
}

const IDENTITY_MATRIX: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// The white point of the intermediate space in which the black point
/// is compensated.
const FLAT_WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// A calibrated RGB color space.
///
/// The conversion chain is fixed at construction: decoding gammas, the
/// primaries matrix, then Bradford adaptation from the stated white
/// point through the flat intermediate to D65.
#[derive(Debug, Clone)]
pub(crate) struct CalRgb {
    black_point: [f32; 3],
    gamma: [f32; 3],
    primaries: Mat3,
    to_flat: Mat3,
    to_d65: Mat3,
}

impl CalRgb {
    pub(crate) fn new(
        white_point: [f32; 3],
        black_point: [f32; 3],
        matrix: [f32; 9],
        gamma: [f32; 3],
    ) -> Self {
        Self {
            black_point,
            gamma,
            // The PDF matrix is stored column by column.
            primaries: Mat3::from_columns(
                [matrix[0], matrix[1], matrix[2]],
                [matrix[3], matrix[4], matrix[5]],
                [matrix[6], matrix[7], matrix[8]],
            ),
            to_flat: adaptation(white_point, FLAT_WHITE),
            to_d65: adaptation(FLAT_WHITE, D65_WHITE),
        }
    }

    /// With unit gammas and an identity matrix the calibration carries no
    /// information, so the space collapses to device RGB.
    pub(crate) fn is_degenerate(&self) -> bool {
        self.gamma == [1.0, 1.0, 1.0] && self.primaries.0 == IDENTITY_MATRIX
    }

    fn decode_l_constant() -> f32 {
        ((8.0_f32 + 16.0) / 116.0).powi(3) / 8.0
    }

    fn decode_l(l: f32) -> f32 {
        if l < 0.0 {
            -Self::decode_l(-l)
        } else if l > 8.0 {
            ((l + 16.0) / 116.0).powi(3)
        } else {
            l * Self::decode_l_constant()
        }
    }

    fn compensate_black_point(source_bp: &[f32; 3], xyz_flat: &[f32; 3]) -> [f32; 3] {
        if source_bp == &[0.0, 0.0, 0.0] {
            return *xyz_flat;
        }

        let zero_decode_l = Self::decode_l(0.0);

        let mut out = [0.0; 3];
        for i in 0..3 {
            let src = Self::decode_l(source_bp[i]);
            let scale = (1.0 - zero_decode_l) / (1.0 - src);
            let offset = 1.0 - scale;
            out[i] = xyz_flat[i] * scale + offset;
        }

        out
    }

    fn to_srgb(&self, input: [f32; 3], apply_black_point: bool) -> [u8; 3] {
        let decode = |c: f32, g: f32| {
            let c = c.clamp(0.0, 1.0);
            if c == 1.0 { 1.0 } else { c.powf(g) }
        };
        let linear = [
            decode(input[0], self.gamma[0]),
            decode(input[1], self.gamma[1]),
            decode(input[2], self.gamma[2]),
        ];

        let xyz = self.primaries.mul_vec(linear);
        let xyz_flat = self.to_flat.mul_vec(xyz);
        let xyz_black = if apply_black_point {
            Self::compensate_black_point(&self.black_point, &xyz_flat)
        } else {
            xyz_flat
        };
        let srgb = SRGB_D65_XYZ_TO_RGB.mul_vec(self.to_d65.mul_vec(xyz_black));

        [
            f32_to_u8(encode_srgb(srgb[0])),
            f32_to_u8(encode_srgb(srgb[1])),
            f32_to_u8(encode_srgb(srgb[2])),
        ]
    }
}

/// A sampler over a [`CalRgb`] space with the black point handling fixed
/// for one rendering intent.
#[derive(Debug)]
pub(crate) struct CalRgbSampler {
    cal: CalRgb,
    apply_black_point: bool,
}

impl CalRgbSampler {
    pub(crate) fn new(cal: CalRgb, apply_black_point: bool) -> Self {
        Self {
            cal,
            apply_black_point,
        }
    }
}

impl RgbaSampler for CalRgbSampler {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let input = [
            components.first().copied().unwrap_or(0.0),
            components.get(1).copied().unwrap_or(0.0),
            components.get(2).copied().unwrap_or(0.0),
        ];

        let [r, g, b] = self.cal.to_srgb(input, self.apply_black_point);
        [r, g, b, 255]
    }
}
