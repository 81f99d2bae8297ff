//! PDF color spaces.

use crate::cache::SamplerCache;
use crate::cal::{CalGray, CalRgb, CalRgbSampler};
use crate::cmyk::Cmyk;
use crate::icc::IccProfile;
use crate::icc::lut::Clut;
use crate::indexed::Indexed;
use crate::lab::Lab;
use crate::tint::{DeviceN, Separation};
use crate::{AlphaColor, ColorComponents, RenderingIntent, RgbaSampler, TintFunction, f32_to_u8};
use log::warn;
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

/// A PDF color space.
///
/// Color spaces are cheap to clone and share their per-intent sampler
/// cache. Construction never fails: when the parameters of a CIE-based
/// space cannot be used, the nearest safe device space stands in and the
/// substitution is permanent for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct ColorSpace(Arc<Repr>);

#[derive(Debug)]
struct Repr {
    kind: Kind,
    samplers: SamplerCache,
}

#[derive(Debug)]
enum Kind {
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
    CalGray(CalGray),
    CalRgb(CalRgb),
    Lab(Lab),
    IccBased(IccProfile),
    Indexed(Indexed),
    Separation(Separation),
    DeviceN(DeviceN),
    Pattern(Option<ColorSpace>),
}

impl ColorSpace {
    fn from_kind(kind: Kind) -> Self {
        Self(Arc::new(Repr {
            kind,
            samplers: SamplerCache::new(),
        }))
    }

    /// The device gray color space.
    pub fn device_gray() -> Self {
        Self::from_kind(Kind::DeviceGray)
    }

    /// The device RGB color space.
    pub fn device_rgb() -> Self {
        Self::from_kind(Kind::DeviceRgb)
    }

    /// The device CMYK color space.
    pub fn device_cmyk() -> Self {
        Self::from_kind(Kind::DeviceCmyk)
    }

    /// The pattern color space, optionally with an underlying color space.
    pub fn pattern(underlying: Option<ColorSpace>) -> Self {
        Self::from_kind(Kind::Pattern(underlying))
    }

    /// A calibrated gray color space.
    pub fn cal_gray(white_point: [f32; 3], gamma: f32) -> Self {
        let cal = CalGray::new(white_point, gamma);

        // A unit gamma carries no calibration; treat it as device gray.
        if cal.is_degenerate() {
            Self::device_gray()
        } else {
            Self::from_kind(Kind::CalGray(cal))
        }
    }

    /// A calibrated RGB color space.
    pub fn cal_rgb(
        white_point: [f32; 3],
        black_point: [f32; 3],
        matrix: [f32; 9],
        gamma: [f32; 3],
    ) -> Self {
        let cal = CalRgb::new(white_point, black_point, matrix, gamma);

        // Unit gammas and an identity matrix carry no calibration; treat
        // the space as device RGB.
        if cal.is_degenerate() {
            Self::device_rgb()
        } else {
            Self::from_kind(Kind::CalRgb(cal))
        }
    }

    /// A Lab color space with the given white point and `a*`/`b*` range.
    pub fn lab(white_point: [f32; 3], range: [f32; 4]) -> Self {
        Self::from_kind(Kind::Lab(Lab::new(white_point, range)))
    }

    /// An ICC-based color space.
    ///
    /// If the profile cannot be parsed the alternate space is used, and
    /// failing that the device space matching the component count.
    pub fn icc_based(data: &[u8], num_components: u8, alternate: Option<ColorSpace>) -> Self {
        if let Some(profile) = IccProfile::new(data, num_components) {
            // sRGB output needs no conversion at all.
            if profile.is_srgb() {
                return Self::device_rgb();
            }

            return Self::from_kind(Kind::IccBased(profile));
        }

        warn!("failed to read ICC profile, falling back to the alternate color space");

        alternate.unwrap_or_else(|| match num_components {
            1 => Self::device_gray(),
            4 => Self::device_cmyk(),
            _ => Self::device_rgb(),
        })
    }

    /// An indexed color space with `hival + 1` palette entries.
    pub fn indexed(base: ColorSpace, hival: u8, lookup: Vec<u8>) -> Self {
        Self::from_kind(Kind::Indexed(Indexed::new(base, hival, lookup)))
    }

    /// A separation color space for a single named colorant.
    pub fn separation(name: impl Into<String>, alternate: ColorSpace, tint: TintFunction) -> Self {
        Self::from_kind(Kind::Separation(Separation::new(
            name.into(),
            alternate,
            tint,
        )))
    }

    /// A DeviceN color space over the given colorant names.
    pub fn device_n(names: Vec<String>, alternate: ColorSpace, tint: TintFunction) -> Self {
        if names.is_empty() {
            warn!("DeviceN color space without colorants");
            return Self::device_gray();
        }

        Self::from_kind(Kind::DeviceN(DeviceN::new(names, alternate, tint)))
    }

    /// The number of components of the color space.
    pub fn num_components(&self) -> u8 {
        match &self.0.kind {
            Kind::DeviceGray | Kind::CalGray(_) => 1,
            Kind::DeviceRgb | Kind::CalRgb(_) | Kind::Lab(_) => 3,
            Kind::DeviceCmyk => 4,
            Kind::IccBased(icc) => icc.num_components(),
            Kind::Indexed(_) => 1,
            Kind::Separation(_) => 1,
            Kind::DeviceN(d) => d.num_components(),
            Kind::Pattern(p) => p.as_ref().map(Self::num_components).unwrap_or(1),
        }
    }

    /// Whether this is one of the device color spaces.
    pub fn is_device(&self) -> bool {
        matches!(
            self.0.kind,
            Kind::DeviceGray | Kind::DeviceRgb | Kind::DeviceCmyk
        )
    }

    /// Whether this is the pattern color space.
    pub fn is_pattern(&self) -> bool {
        matches!(self.0.kind, Kind::Pattern(_))
    }

    /// The underlying color space of a pattern space.
    pub fn pattern_space(&self) -> Option<ColorSpace> {
        match &self.0.kind {
            Kind::Pattern(p) => p.clone(),
            _ => None,
        }
    }

    /// Whether this is an indexed color space.
    pub fn is_indexed(&self) -> bool {
        matches!(self.0.kind, Kind::Indexed(_))
    }

    /// Whether painting in this space is suppressed entirely, which is the
    /// case for `None` colorants.
    pub fn is_none(&self) -> bool {
        match &self.0.kind {
            Kind::Separation(s) => s.is_none(),
            Kind::DeviceN(d) => d.is_none(),
            _ => false,
        }
    }

    /// The initial color of the color space, used before any color has
    /// been selected.
    pub fn initial_color(&self) -> ColorComponents {
        match &self.0.kind {
            Kind::DeviceGray | Kind::CalGray(_) => smallvec![0.0],
            Kind::DeviceRgb | Kind::CalRgb(_) | Kind::Lab(_) => smallvec![0.0, 0.0, 0.0],
            Kind::DeviceCmyk => smallvec![0.0, 0.0, 0.0, 1.0],
            Kind::IccBased(icc) => match icc.num_components() {
                1 => smallvec![0.0],
                4 => smallvec![0.0, 0.0, 0.0, 1.0],
                _ => smallvec![0.0, 0.0, 0.0],
            },
            Kind::Indexed(_) => smallvec![0.0],
            Kind::Separation(_) => smallvec![1.0],
            Kind::DeviceN(d) => smallvec![1.0; d.num_components() as usize],
            Kind::Pattern(p) => p
                .as_ref()
                .map(Self::initial_color)
                .unwrap_or_else(|| smallvec![0.0]),
        }
    }

    /// The default decode ranges for image data with `bits` bits per
    /// component.
    pub fn default_decode(&self, bits: f32) -> SmallVec<[(f32, f32); 4]> {
        match &self.0.kind {
            Kind::DeviceGray | Kind::CalGray(_) | Kind::Separation(_) => smallvec![(0.0, 1.0)],
            Kind::DeviceRgb | Kind::CalRgb(_) => smallvec![(0.0, 1.0); 3],
            Kind::DeviceCmyk => smallvec![(0.0, 1.0); 4],
            Kind::IccBased(icc) => smallvec![(0.0, 1.0); icc.num_components() as usize],
            Kind::Lab(l) => {
                let range = l.range();
                smallvec![(0.0, 100.0), (range[0], range[1]), (range[2], range[3])]
            }
            Kind::Indexed(_) => smallvec![(0.0, 2.0_f32.powf(bits) - 1.0)],
            Kind::DeviceN(d) => smallvec![(0.0, 1.0); d.num_components() as usize],
            // Not a valid image color space.
            Kind::Pattern(_) => smallvec![(0.0, 1.0)],
        }
    }

    /// The sampler converting components to RGBA for the given intent.
    ///
    /// Samplers are built lazily and memoized per intent.
    pub fn sampler(&self, intent: RenderingIntent) -> Arc<dyn RgbaSampler> {
        self.0
            .samplers
            .get_or_insert_with(intent, || self.build_sampler(intent))
    }

    /// Convert the given component values to encoded sRGB.
    pub fn to_srgb(&self, components: &[f32], intent: RenderingIntent) -> [u8; 3] {
        self.sampler(intent).sample_rgb(components)
    }

    /// Turn the given component values and opacity into an RGBA color.
    pub fn to_rgba(&self, components: &[f32], opacity: f32, intent: RenderingIntent) -> AlphaColor {
        let [r, g, b, a] = self.sampler(intent).sample(components);
        let alpha = f32::from(a) / 255.0 * opacity.clamp(0.0, 1.0);

        AlphaColor::new([
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            alpha,
        ])
    }

    fn build_sampler(&self, intent: RenderingIntent) -> Arc<dyn RgbaSampler> {
        match &self.0.kind {
            Kind::DeviceGray => Arc::new(GraySampler),
            Kind::DeviceRgb => Arc::new(RgbSampler),
            Kind::DeviceCmyk => Arc::new(Cmyk),
            Kind::CalGray(cal) => Arc::new(cal.clone()),
            Kind::CalRgb(cal) => {
                // The black point shifts colors, which only relative
                // colorimetric rendering asks for.
                let apply_black_point = intent == RenderingIntent::RelativeColorimetric;
                Arc::new(CalRgbSampler::new(cal.clone(), apply_black_point))
            }
            Kind::Lab(lab) => Arc::new(lab.clone()),
            Kind::IccBased(icc) => Arc::new(IccSampler::build(icc, intent)),
            Kind::Indexed(indexed) => indexed.sampler(intent),
            Kind::Separation(sep) => sep.sampler(intent),
            Kind::DeviceN(device_n) => device_n.sampler(intent),
            Kind::Pattern(underlying) => match underlying {
                Some(space) => space.sampler(intent),
                None => Arc::new(GraySampler),
            },
        }
    }
}

struct GraySampler;

impl RgbaSampler for GraySampler {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let g = f32_to_u8(components.first().copied().unwrap_or(0.0));
        [g, g, g, 255]
    }
}

struct RgbSampler;

impl RgbaSampler for RgbSampler {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        [
            f32_to_u8(components.first().copied().unwrap_or(0.0)),
            f32_to_u8(components.get(1).copied().unwrap_or(0.0)),
            f32_to_u8(components.get(2).copied().unwrap_or(0.0)),
            255,
        ]
    }
}

/// An ICC conversion tabulated into a lookup table.
struct IccSampler {
    lut: Clut,
}

impl IccSampler {
    /// Pre-tabulating trades a one-time build cost for constant-time
    /// per-pixel sampling, no matter how complex the profile is.
    fn build(profile: &IccProfile, intent: RenderingIntent) -> Self {
        let convert = |input: &[f32]| profile.to_srgb(intent, input);

        let lut = match profile.num_components() {
            1 => Clut::build_gray(convert),
            4 => Clut::build_cmyk(convert),
            _ => Clut::build_rgb(convert),
        };

        Self { lut }
    }
}

impl RgbaSampler for IccSampler {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let [r, g, b] = self.lut.sample(components);
        [f32_to_u8(r), f32_to_u8(g), f32_to_u8(b), 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::test_profiles::{build_profile, gamma_curve};
    use crate::icc::transform::encode_srgb;

    const IDENTITY: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    const D65: [f32; 3] = [0.95047, 1.0, 1.08883];

    #[test]
    fn device_gray_replicates_the_component() {
        let sampler = ColorSpace::device_gray().sampler(RenderingIntent::default());
        assert_eq!(sampler.sample(&[0.5]), [128, 128, 128, 255]);
    }

    #[test]
    fn identity_cal_rgb_matches_device_rgb() {
        let cal = ColorSpace::cal_rgb(D65, [0.0; 3], IDENTITY, [1.0; 3]);
        let device = ColorSpace::device_rgb();

        let intent = RenderingIntent::RelativeColorimetric;
        for &c in &[[0.0, 0.0, 0.0], [0.25, 0.5, 0.75], [1.0, 1.0, 1.0]] {
            assert_eq!(
                cal.sampler(intent).sample(&c),
                device.sampler(intent).sample(&c)
            );
        }
    }

    #[test]
    fn identity_cal_gray_matches_device_gray() {
        let cal = ColorSpace::cal_gray(D65, 1.0);
        assert!(cal.is_device());
        assert_eq!(cal.num_components(), 1);
    }

    #[test]
    fn icc_gray_ramp_matches_the_curve() {
        let data = build_profile(b"GRAY", b"XYZ ", &[(b"kTRC", gamma_curve(1.8))]);
        let space = ColorSpace::icc_based(&data, 1, None);
        assert!(!space.is_device());

        let sampler = space.sampler(RenderingIntent::RelativeColorimetric);

        for i in 0..=32 {
            let t = i as f32 / 32.0;
            let [r, g, b, a] = sampler.sample(&[t]);
            let want = f32_to_u8(encode_srgb(t.powf(1.8)));

            assert_eq!(r, g);
            assert_eq!(g, b);
            assert_eq!(a, 255);
            assert!(
                (i32::from(r) - i32::from(want)).abs() <= 2,
                "t = {t}: got {r}, want {want}"
            );
        }
    }

    #[test]
    fn broken_icc_profile_falls_back_to_the_alternate() {
        let alternate = ColorSpace::device_cmyk();
        let space = ColorSpace::icc_based(b"not a profile", 4, Some(alternate));

        assert!(space.is_device());
        assert_eq!(space.num_components(), 4);

        // Without an alternate, the component count picks the device space.
        let space = ColorSpace::icc_based(b"not a profile", 1, None);
        assert_eq!(space.num_components(), 1);
    }

    #[test]
    fn initial_colors() {
        assert_eq!(ColorSpace::device_gray().initial_color().as_slice(), &[0.0]);
        assert_eq!(
            ColorSpace::device_cmyk().initial_color().as_slice(),
            &[0.0, 0.0, 0.0, 1.0]
        );

        let tint: TintFunction = std::sync::Arc::new(|c: &[f32]| c.iter().copied().collect());
        let sep = ColorSpace::separation("Spot", ColorSpace::device_gray(), tint);
        assert_eq!(sep.initial_color().as_slice(), &[1.0]);
    }

    #[test]
    fn indexed_decode_covers_the_index_range() {
        let space = ColorSpace::indexed(ColorSpace::device_rgb(), 7, vec![0; 24]);
        assert_eq!(space.default_decode(4.0).as_slice(), &[(0.0, 15.0)]);
        assert_eq!(space.num_components(), 1);
        assert!(space.is_indexed());
    }

    #[test]
    fn pattern_delegates_to_the_underlying_space() {
        let pattern = ColorSpace::pattern(Some(ColorSpace::device_cmyk()));
        assert!(pattern.is_pattern());
        assert_eq!(pattern.num_components(), 4);
        assert!(pattern.pattern_space().is_some());

        let bare = ColorSpace::pattern(None);
        assert_eq!(bare.num_components(), 1);
    }

    #[test]
    fn to_rgba_applies_opacity() {
        let space = ColorSpace::device_rgb();
        let color = space.to_rgba(&[1.0, 0.0, 0.0], 0.5, RenderingIntent::default());

        assert_eq!(color.to_rgba8(), [255, 0, 0, 128]);
    }
}
