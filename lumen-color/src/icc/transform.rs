//! Chainable conversion primitives shared by the CIE-based color spaces.

/// A 3x3 row-major matrix.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Mat3(pub [f32; 9]);

impl Mat3 {
    pub(crate) const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Build a matrix from three column vectors.
    pub(crate) fn from_columns(c0: [f32; 3], c1: [f32; 3], c2: [f32; 3]) -> Self {
        Self([
            c0[0], c1[0], c2[0], c0[1], c1[1], c2[1], c0[2], c1[2], c2[2],
        ])
    }

    pub(crate) fn mul_vec(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            m[0] * v[0] + m[1] * v[1] + m[2] * v[2],
            m[3] * v[0] + m[4] * v[1] + m[5] * v[2],
            m[6] * v[0] + m[7] * v[1] + m[8] * v[2],
        ]
    }

    pub(crate) fn mul_mat(&self, other: &Self) -> Self {
        let mut out = [0.0; 9];

        for row in 0..3 {
            for col in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.0[row * 3 + k] * other.0[k * 3 + col];
                }
                out[row * 3 + col] = sum;
            }
        }

        Self(out)
    }
}

/// The Bradford cone response matrix.
pub(crate) const BRADFORD: Mat3 = Mat3([
    0.8951, 0.2664, -0.1614, -0.7502, 1.7135, 0.0367, 0.0389, -0.0685, 1.0296,
]);

/// The inverse of [`BRADFORD`].
pub(crate) const BRADFORD_INVERSE: Mat3 = Mat3([
    0.9869929, -0.1470543, 0.1599627, 0.4323053, 0.5183603, 0.0492912, -0.0085287, 0.0400428,
    0.9684867,
]);

/// XYZ (D65-relative) to linear sRGB.
pub(crate) const SRGB_D65_XYZ_TO_RGB: Mat3 = Mat3([
    3.2404542, -1.5371385, -0.4985314, -0.969_266, 1.8760108, 0.0415560, 0.0556434, -0.2040259,
    1.0572252,
]);

/// The D50 white point (the ICC profile connection space white).
pub(crate) const D50_WHITE: [f32; 3] = [0.9642, 1.0, 0.8249];

/// The D65 white point (the sRGB white).
pub(crate) const D65_WHITE: [f32; 3] = [0.95047, 1.0, 1.08883];

/// The Bradford chromatic adaptation matrix from `src` to `dst` white.
pub(crate) fn adaptation(src: [f32; 3], dst: [f32; 3]) -> Mat3 {
    let src_lms = BRADFORD.mul_vec(src);
    let dst_lms = BRADFORD.mul_vec(dst);

    let scale = Mat3([
        dst_lms[0] / src_lms[0],
        0.0,
        0.0,
        0.0,
        dst_lms[1] / src_lms[1],
        0.0,
        0.0,
        0.0,
        dst_lms[2] / src_lms[2],
    ]);

    BRADFORD_INVERSE.mul_mat(&scale.mul_mat(&BRADFORD))
}

/// Encode a linear sRGB value with the sRGB transfer function.
pub(crate) fn encode_srgb(color: f32) -> f32 {
    if color <= 0.0031308 {
        (12.92 * color).clamp(0.0, 1.0)
    } else if color >= 0.99554525 {
        1.0
    } else {
        ((1.0 + 0.055) * color.powf(1.0 / 2.4) - 0.055).clamp(0.0, 1.0)
    }
}

/// Convert CIE L*a*b* to XYZ relative to the given white point.
pub(crate) fn lab_to_xyz(l: f32, a: f32, b: f32, white: [f32; 3]) -> [f32; 3] {
    const DELTA: f32 = 6.0 / 29.0;

    let finv = |t: f32| {
        if t > DELTA {
            t * t * t
        } else {
            3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
        }
    };

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    [
        white[0] * finv(fx),
        white[1] * finv(fy),
        white[2] * finv(fz),
    ]
}

/// A tone reproduction curve.
#[derive(Debug, Clone)]
pub(crate) enum ToneCurve {
    Identity,
    Gamma(f32),
    Table(Vec<f32>),
    Parametric { kind: u16, params: [f32; 7] },
}

impl ToneCurve {
    pub(crate) fn eval(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);

        match self {
            Self::Identity => x,
            Self::Gamma(g) => x.powf(*g),
            Self::Table(table) => table_interp(table, x),
            Self::Parametric { kind, params } => {
                let [g, a, b, c, d, e, f] = *params;

                match kind {
                    0 => x.powf(g),
                    1 => {
                        if x >= -b / a {
                            (a * x + b).powf(g)
                        } else {
                            0.0
                        }
                    }
                    2 => {
                        if x >= -b / a {
                            (a * x + b).powf(g) + c
                        } else {
                            c
                        }
                    }
                    3 => {
                        if x >= d {
                            (a * x + b).powf(g)
                        } else {
                            c * x
                        }
                    }
                    4 => {
                        if x >= d {
                            (a * x + b).powf(g) + e
                        } else {
                            c * x + f
                        }
                    }
                    _ => x,
                }
            }
        }
    }
}

/// Sample a normalized table at `x` in `[0, 1]` with linear interpolation.
pub(crate) fn table_interp(table: &[f32], x: f32) -> f32 {
    match table.len() {
        0 => x,
        1 => table[0],
        len => {
            let pos = x.clamp(0.0, 1.0) * (len - 1) as f32;
            let lo = (pos as usize).min(len - 2);
            let frac = pos - lo as f32;

            table[lo] * (1.0 - frac) + table[lo + 1] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptation_maps_src_white_to_dst_white() {
        let m = adaptation(D50_WHITE, D65_WHITE);
        let mapped = m.mul_vec(D50_WHITE);

        for (got, want) in mapped.iter().zip(D65_WHITE) {
            assert!((got - want).abs() < 1e-4);
        }
    }

    #[test]
    fn adaptation_between_equal_whites_is_identity() {
        let m = adaptation(D65_WHITE, D65_WHITE);

        for (got, want) in m.0.iter().zip(Mat3::IDENTITY.0) {
            assert!((got - want).abs() < 1e-5);
        }
    }

    #[test]
    fn lab_white_is_the_white_point() {
        let xyz = lab_to_xyz(100.0, 0.0, 0.0, D50_WHITE);

        for (got, want) in xyz.iter().zip(D50_WHITE) {
            assert!((got - want).abs() < 1e-4);
        }
    }

    #[test]
    fn srgb_transfer_endpoints() {
        assert_eq!(encode_srgb(0.0), 0.0);
        assert_eq!(encode_srgb(1.0), 1.0);
        assert!(encode_srgb(-0.5) == 0.0);
        assert!(encode_srgb(2.0) == 1.0);
    }

    #[test]
    fn table_interp_is_linear_between_entries() {
        let table = [0.0, 1.0];
        assert!((table_interp(&table, 0.25) - 0.25).abs() < 1e-6);

        let table = [0.0, 0.5, 1.0];
        assert!((table_interp(&table, 0.5) - 0.5).abs() < 1e-6);
        assert!((table_interp(&table, 0.75) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn parametric_type_3_matches_srgb_decode() {
        // The sRGB EOTF expressed as an ICC parametric curve.
        let curve = ToneCurve::Parametric {
            kind: 3,
            params: [
                2.4,
                1.0 / 1.055,
                0.055 / 1.055,
                1.0 / 12.92,
                0.04045,
                0.0,
                0.0,
            ],
        };

        let encoded = 0.5;
        let linear = curve.eval(encoded);
        assert!((encode_srgb(linear) - encoded).abs() < 1e-3);
    }
}
