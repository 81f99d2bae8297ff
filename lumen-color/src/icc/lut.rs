//! Lookup tables for tabulated color conversion.
//!
//! A [`Clut`] maps one to four input channels to RGB via multilinear
//! interpolation over a uniform grid. The same structure backs both the
//! CLUTs read out of ICC profiles and the tables that pre-tabulate a whole
//! converter so per-pixel sampling stays cheap.

/// The grid size used when tabulating a single-channel converter.
pub(crate) const GRAY_GRID: u16 = 256;

/// The grid size used when tabulating a three-channel converter.
pub(crate) const RGB_GRID: u16 = 17;

/// The grid size used when tabulating a four-channel converter.
pub(crate) const CMYK_GRID: u16 = 16;

/// A color lookup table with three output channels.
#[derive(Debug, Clone)]
pub(crate) struct Clut {
    in_ch: usize,
    grid: usize,
    data: Vec<f32>,
}

impl Clut {
    /// Tabulate a single-channel converter into 256 samples.
    pub(crate) fn build_gray(f: impl Fn(&[f32]) -> [f32; 3]) -> Self {
        Self::build(1, GRAY_GRID, f)
    }

    /// Tabulate a three-channel converter over a 17x17x17 grid.
    pub(crate) fn build_rgb(f: impl Fn(&[f32]) -> [f32; 3]) -> Self {
        Self::build(3, RGB_GRID, f)
    }

    /// Tabulate a four-channel converter over sixteen 16x16x16 layers.
    pub(crate) fn build_cmyk(f: impl Fn(&[f32]) -> [f32; 3]) -> Self {
        Self::build(4, CMYK_GRID, f)
    }

    /// Wrap existing table data.
    ///
    /// The data holds RGB triples with the first input channel varying
    /// slowest. Returns `None` if the dimensions are out of range or do not
    /// match the data length.
    pub(crate) fn new(in_ch: u8, grid: u16, data: Vec<f32>) -> Option<Self> {
        if !(1..=4).contains(&in_ch) || grid < 2 {
            return None;
        }

        let entries = (grid as usize).checked_pow(u32::from(in_ch))?;

        if data.len() != entries.checked_mul(3)? {
            return None;
        }

        Some(Self {
            in_ch: in_ch as usize,
            grid: grid as usize,
            data,
        })
    }

    /// Tabulate a converter over a uniform grid.
    pub(crate) fn build(in_ch: u8, grid: u16, f: impl Fn(&[f32]) -> [f32; 3]) -> Self {
        let in_ch = in_ch.clamp(1, 4) as usize;
        let grid = grid.max(2) as usize;
        let entries = grid.pow(in_ch as u32);
        let mut data = Vec::with_capacity(entries * 3);
        let mut input = [0.0f32; 4];

        for i in 0..entries {
            let mut rem = i;
            // The first input channel varies slowest.
            for ch in (0..in_ch).rev() {
                input[ch] = (rem % grid) as f32 / (grid - 1) as f32;
                rem /= grid;
            }

            data.extend(f(&input[..in_ch]));
        }

        Self { in_ch, grid, data }
    }

    /// The number of input channels.
    pub(crate) fn in_ch(&self) -> usize {
        self.in_ch
    }

    /// Sample the table with multilinear interpolation.
    ///
    /// Inputs are clamped to `[0, 1]`; missing inputs are treated as zero.
    pub(crate) fn sample(&self, input: &[f32]) -> [f32; 3] {
        let mut lo = [0usize; 4];
        let mut frac = [0.0f32; 4];

        for ch in 0..self.in_ch {
            let x = input.get(ch).copied().unwrap_or(0.0).clamp(0.0, 1.0);
            let pos = x * (self.grid - 1) as f32;
            lo[ch] = (pos as usize).min(self.grid - 2);
            frac[ch] = pos - lo[ch] as f32;
        }

        let mut out = [0.0f32; 3];

        for corner in 0..(1usize << self.in_ch) {
            let mut weight = 1.0f32;
            let mut index = 0usize;

            for ch in 0..self.in_ch {
                let hi = (corner >> ch) & 1;
                weight *= if hi == 1 { frac[ch] } else { 1.0 - frac[ch] };
                index = index * self.grid + lo[ch] + hi;
            }

            if weight == 0.0 {
                continue;
            }

            let entry = &self.data[index * 3..index * 3 + 3];
            for (o, e) in out.iter_mut().zip(entry) {
                *o += weight * e;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_data() {
        assert!(Clut::new(3, 2, vec![0.0; 24]).is_some());
        assert!(Clut::new(3, 2, vec![0.0; 23]).is_none());
        assert!(Clut::new(0, 2, vec![]).is_none());
        assert!(Clut::new(3, 1, vec![0.0; 3]).is_none());
    }

    #[test]
    fn interpolation_reproduces_linear_functions() {
        // Multilinear interpolation is exact for per-channel linear maps.
        let lut = Clut::build(3, 5, |c| [c[0], c[1] * 0.5, 1.0 - c[2]]);

        for &(r, g, b) in &[(0.0, 0.0, 0.0), (0.3, 0.7, 0.2), (1.0, 1.0, 1.0)] {
            let [or, og, ob] = lut.sample(&[r, g, b]);
            assert!((or - r).abs() < 1e-5);
            assert!((og - g * 0.5).abs() < 1e-5);
            assert!((ob - (1.0 - b)).abs() < 1e-5);
        }
    }

    #[test]
    fn four_channel_interpolation() {
        let lut = Clut::build(4, 4, |c| {
            let k = 1.0 - c[3];
            [(1.0 - c[0]) * k, (1.0 - c[1]) * k, (1.0 - c[2]) * k]
        });

        let [r, g, b] = lut.sample(&[0.0, 0.0, 0.0, 0.0]);
        assert!((r - 1.0).abs() < 1e-5);
        assert!((g - 1.0).abs() < 1e-5);
        assert!((b - 1.0).abs() < 1e-5);

        let [r, _, _] = lut.sample(&[1.0, 0.0, 0.0, 0.0]);
        assert!(r.abs() < 1e-5);
    }

    #[test]
    fn inputs_are_clamped() {
        let lut = Clut::build(1, 16, |c| [c[0]; 3]);
        assert!((lut.sample(&[2.0])[0] - 1.0).abs() < 1e-5);
        assert!(lut.sample(&[-1.0])[0].abs() < 1e-5);
    }
}
