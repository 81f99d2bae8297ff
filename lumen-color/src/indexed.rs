//! The Indexed color space.

use crate::space::ColorSpace;
use crate::{RenderingIntent, RgbaSampler};
use std::sync::Arc;

/// A palette of base space colors addressed by a single index component.
#[derive(Debug, Clone)]
pub(crate) struct Indexed {
    base: ColorSpace,
    hival: u8,
    lookup: Vec<u8>,
}

impl Indexed {
    pub(crate) fn new(base: ColorSpace, hival: u8, lookup: Vec<u8>) -> Self {
        Self {
            base,
            hival,
            lookup,
        }
    }

    pub(crate) fn hival(&self) -> u8 {
        self.hival
    }

    /// Convert every palette entry through the base space up front, so
    /// per-pixel sampling is a single table lookup.
    pub(crate) fn sampler(&self, intent: RenderingIntent) -> Arc<dyn RgbaSampler> {
        let base_sampler = self.base.sampler(intent);
        let decode = self.base.default_decode(8.0);
        let num_components = decode.len();

        let palette = (0..=usize::from(self.hival))
            .map(|i| {
                let components: smallvec::SmallVec<[f32; 4]> = decode
                    .iter()
                    .enumerate()
                    .map(|(c, (lo, hi))| {
                        // Missing lookup bytes are treated as zero.
                        let byte = self
                            .lookup
                            .get(i * num_components + c)
                            .copied()
                            .unwrap_or(0);

                        lo + f32::from(byte) / 255.0 * (hi - lo)
                    })
                    .collect();

                base_sampler.sample(&components)
            })
            .collect();

        Arc::new(PaletteSampler { palette })
    }
}

struct PaletteSampler {
    palette: Vec<[u8; 4]>,
}

impl RgbaSampler for PaletteSampler {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let index = components.first().copied().unwrap_or(0.0);
        let index = (index + 0.5).clamp(0.0, (self.palette.len() - 1) as f32) as usize;

        self.palette[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_palette() -> Indexed {
        // Red, green, blue.
        Indexed::new(
            ColorSpace::device_rgb(),
            2,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255],
        )
    }

    #[test]
    fn palette_entries_round_trip() {
        let sampler = rgb_palette().sampler(RenderingIntent::RelativeColorimetric);

        assert_eq!(sampler.sample(&[0.0]), [255, 0, 0, 255]);
        assert_eq!(sampler.sample(&[1.0]), [0, 255, 0, 255]);
        assert_eq!(sampler.sample(&[2.0]), [0, 0, 255, 255]);
    }

    #[test]
    fn out_of_range_indices_are_clamped() {
        let sampler = rgb_palette().sampler(RenderingIntent::RelativeColorimetric);

        assert_eq!(sampler.sample(&[-3.0]), [255, 0, 0, 255]);
        assert_eq!(sampler.sample(&[17.0]), [0, 0, 255, 255]);
    }

    #[test]
    fn short_lookup_data_is_zero_padded() {
        let indexed = Indexed::new(ColorSpace::device_rgb(), 1, vec![255]);
        let sampler = indexed.sampler(RenderingIntent::RelativeColorimetric);

        assert_eq!(sampler.sample(&[0.0]), [255, 0, 0, 255]);
        assert_eq!(sampler.sample(&[1.0]), [0, 0, 0, 255]);
    }

    #[test]
    fn palette_is_built_once_per_intent() {
        let space = ColorSpace::indexed(ColorSpace::device_rgb(), 2, vec![1, 2, 3]);

        let first = space.sampler(RenderingIntent::Perceptual);
        let second = space.sampler(RenderingIntent::Perceptual);
        assert!(Arc::ptr_eq(&first, &second));

        let other = space.sampler(RenderingIntent::Saturation);
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(first.sample(&[0.0]), other.sample(&[0.0]));
    }
}
