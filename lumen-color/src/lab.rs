//! The Lab color space.

use crate::icc::transform::{
    D65_WHITE, Mat3, SRGB_D65_XYZ_TO_RGB, adaptation, encode_srgb, lab_to_xyz,
};
use crate::{RgbaSampler, f32_to_u8};

/// A CIE L*a*b* color space with a configurable white point.
///
/// Samplers take the components in their natural ranges: `L*` in
/// `[0, 100]`, `a*` and `b*` in the declared range.
#[derive(Debug, Clone)]
pub(crate) struct Lab {
    white_point: [f32; 3],
    range: [f32; 4],
    /// Chromatic adaptation from the stated white to D65, folded together
    /// with the XYZ to linear sRGB matrix.
    matrix: Mat3,
}

impl Lab {
    pub(crate) fn new(white_point: [f32; 3], range: [f32; 4]) -> Self {
        let matrix = SRGB_D65_XYZ_TO_RGB.mul_mat(&adaptation(white_point, D65_WHITE));

        Self {
            white_point,
            range,
            matrix,
        }
    }

    pub(crate) fn range(&self) -> [f32; 4] {
        self.range
    }
}

impl RgbaSampler for Lab {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let l = components.first().copied().unwrap_or(0.0).clamp(0.0, 100.0);
        let a = components
            .get(1)
            .copied()
            .unwrap_or(0.0)
            .clamp(self.range[0], self.range[1]);
        let b = components
            .get(2)
            .copied()
            .unwrap_or(0.0)
            .clamp(self.range[2], self.range[3]);

        let xyz = lab_to_xyz(l, a, b, self.white_point);
        let rgb = self.matrix.mul_vec(xyz);

        [
            f32_to_u8(encode_srgb(rgb[0])),
            f32_to_u8(encode_srgb(rgb[1])),
            f32_to_u8(encode_srgb(rgb[2])),
            255,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_RANGE: [f32; 4] = [-100.0, 100.0, -100.0, 100.0];

    #[test]
    fn lab_white_and_black() {
        let lab = Lab::new(D65_WHITE, DEFAULT_RANGE);

        let [r, g, b, _] = lab.sample(&[100.0, 0.0, 0.0]);
        assert!(r >= 254);
        assert!(g >= 254);
        assert!(b >= 254);

        assert_eq!(lab.sample(&[0.0, 0.0, 0.0]), [0, 0, 0, 255]);
    }

    #[test]
    fn positive_a_shifts_towards_red() {
        let lab = Lab::new(D65_WHITE, DEFAULT_RANGE);

        let [r, g, _, _] = lab.sample(&[50.0, 60.0, 0.0]);
        assert!(r > g + 50);
    }

    #[test]
    fn components_are_clamped_to_the_range() {
        let lab = Lab::new(D65_WHITE, [-10.0, 10.0, -10.0, 10.0]);

        assert_eq!(
            lab.sample(&[50.0, 60.0, 0.0]),
            lab.sample(&[50.0, 10.0, 0.0])
        );
        assert_eq!(
            lab.sample(&[120.0, 0.0, 0.0]),
            lab.sample(&[100.0, 0.0, 0.0])
        );
    }
}
