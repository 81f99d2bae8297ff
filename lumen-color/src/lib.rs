/*!
Conversion of PDF color spaces to sRGB.

The entry point is [`ColorSpace`], which covers the device spaces, the
CIE-based spaces (`CalGray`, `CalRGB`, `Lab`, `ICCBased`) and the special
spaces (`Indexed`, `Separation`, `DeviceN`, `Pattern`). Each color space
hands out an [`RgbaSampler`] per [`RenderingIntent`] that maps component
values to packed RGBA. Samplers are built lazily and memoized, so repeated
lookups for the same intent are cheap.
*/

#![forbid(unsafe_code)]

pub mod space;

mod cache;
mod cal;
mod cmyk;
mod icc;
mod indexed;
mod lab;
mod tint;

pub use space::ColorSpace;

use smallvec::SmallVec;
use std::sync::Arc;

/// A storage for the components of colors.
pub type ColorComponents = SmallVec<[f32; 4]>;

/// A tint transform mapping colorant values to alternate space components.
pub type TintFunction = Arc<dyn Fn(&[f32]) -> ColorComponents + Send + Sync>;

/// The rendering intent requested for a conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RenderingIntent {
    /// Map the source white point to the destination white point.
    #[default]
    RelativeColorimetric,
    /// Reproduce colors exactly, including the white point.
    AbsoluteColorimetric,
    /// Compress the source gamut to fit the destination.
    Perceptual,
    /// Preserve saturation at the expense of hue and lightness.
    Saturation,
}

/// A converter from color components to packed sRGB with alpha.
///
/// Samplers are self-contained and cheap to call, so they can be shared
/// across threads and used in per-pixel loops.
pub trait RgbaSampler: Send + Sync {
    /// Convert the given components to RGBA.
    ///
    /// `components` must hold at least as many values as the color space
    /// that produced this sampler has components. Missing components are
    /// treated as zero.
    fn sample(&self, components: &[f32]) -> [u8; 4];

    /// Convert the given components to RGB, dropping the alpha channel.
    fn sample_rgb(&self, components: &[f32]) -> [u8; 3] {
        let [r, g, b, _] = self.sample(components);
        [r, g, b]
    }
}

/// An RGB color with an alpha channel.
#[derive(Debug, Copy, Clone)]
pub struct AlphaColor {
    components: [f32; 4],
}

impl AlphaColor {
    /// A black color.
    pub const BLACK: Self = Self::new([0.0, 0.0, 0.0, 1.0]);

    /// A transparent color.
    pub const TRANSPARENT: Self = Self::new([0.0, 0.0, 0.0, 0.0]);

    /// A white color.
    pub const WHITE: Self = Self::new([1.0, 1.0, 1.0, 1.0]);

    /// Create a new color from the given components.
    pub const fn new(components: [f32; 4]) -> Self {
        Self { components }
    }

    /// Create a new color from RGBA8 values.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new([u8_to_f32(r), u8_to_f32(g), u8_to_f32(b), u8_to_f32(a)])
    }

    /// Return the color as RGBA8.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            f32_to_u8(self.components[0]),
            f32_to_u8(self.components[1]),
            f32_to_u8(self.components[2]),
            f32_to_u8(self.components[3]),
        ]
    }

    /// Return the color as premultiplied RGBF32.
    pub fn premultiplied(&self) -> [f32; 4] {
        [
            self.components[0] * self.components[3],
            self.components[1] * self.components[3],
            self.components[2] * self.components[3],
            self.components[3],
        ]
    }

    /// Return the components of the color as RGBF32.
    pub fn components(&self) -> [f32; 4] {
        self.components
    }
}

pub(crate) const fn u8_to_f32(x: u8) -> f32 {
    x as f32 * (1.0 / 255.0)
}

pub(crate) fn f32_to_u8(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_round_trip() {
        let color = AlphaColor::from_rgba8(12, 130, 255, 128);
        assert_eq!(color.to_rgba8(), [12, 130, 255, 128]);
    }

    #[test]
    fn premultiplied_scales_rgb_only() {
        let color = AlphaColor::new([1.0, 0.5, 0.0, 0.5]);
        let [r, g, b, a] = color.premultiplied();
        assert_eq!(r, 0.5);
        assert_eq!(g, 0.25);
        assert_eq!(b, 0.0);
        assert_eq!(a, 0.5);
    }
}
