//! The Separation and DeviceN color spaces.

use crate::space::ColorSpace;
use crate::{RenderingIntent, RgbaSampler, TintFunction, f32_to_u8};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// The reserved colorant name that paints nothing.
const NONE_COLORANT: &str = "None";

/// A single named colorant with a tint transform into an alternate space.
#[derive(Clone)]
pub(crate) struct Separation {
    name: String,
    alternate: ColorSpace,
    tint: TintFunction,
}

impl Separation {
    pub(crate) fn new(name: String, alternate: ColorSpace, tint: TintFunction) -> Self {
        Self {
            name,
            alternate,
            tint,
        }
    }

    /// Whether the colorant is the reserved `None` name, which marks
    /// content that must not be painted.
    pub(crate) fn is_none(&self) -> bool {
        self.name == NONE_COLORANT
    }

    /// Tabulate the tint transform and the alternate space conversion into
    /// a 256-entry table.
    pub(crate) fn sampler(&self, intent: RenderingIntent) -> Arc<dyn RgbaSampler> {
        if self.is_none() {
            return Arc::new(NoneSampler);
        }

        let base = self.alternate.sampler(intent);
        let lut = (0..256)
            .map(|i| {
                let t = i as f32 / 255.0;
                base.sample(&(self.tint)(&[t]))
            })
            .collect();

        Arc::new(SeparationSampler { lut })
    }
}

impl Debug for Separation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Separation")
            .field("name", &self.name)
            .field("alternate", &self.alternate)
            .finish_non_exhaustive()
    }
}

/// A multi-colorant space with a tint transform into an alternate space.
#[derive(Clone)]
pub(crate) struct DeviceN {
    names: Vec<String>,
    alternate: ColorSpace,
    tint: TintFunction,
}

impl DeviceN {
    pub(crate) fn new(names: Vec<String>, alternate: ColorSpace, tint: TintFunction) -> Self {
        Self {
            names,
            alternate,
            tint,
        }
    }

    pub(crate) fn num_components(&self) -> u8 {
        self.names.len() as u8
    }

    /// Whether every colorant is the reserved `None` name.
    pub(crate) fn is_none(&self) -> bool {
        !self.names.is_empty() && self.names.iter().all(|n| n == NONE_COLORANT)
    }

    /// The tint transform has too many input dimensions to tabulate, so
    /// it is evaluated per sample.
    pub(crate) fn sampler(&self, intent: RenderingIntent) -> Arc<dyn RgbaSampler> {
        if self.is_none() {
            return Arc::new(NoneSampler);
        }

        Arc::new(DeviceNSampler {
            base: self.alternate.sampler(intent),
            tint: self.tint.clone(),
            num_components: self.names.len(),
        })
    }
}

impl Debug for DeviceN {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceN")
            .field("names", &self.names)
            .field("alternate", &self.alternate)
            .finish_non_exhaustive()
    }
}

struct SeparationSampler {
    lut: Vec<[u8; 4]>,
}

impl RgbaSampler for SeparationSampler {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let t = components.first().copied().unwrap_or(0.0);
        self.lut[usize::from(f32_to_u8(t))]
    }
}

struct DeviceNSampler {
    base: Arc<dyn RgbaSampler>,
    tint: TintFunction,
    num_components: usize,
}

impl RgbaSampler for DeviceNSampler {
    fn sample(&self, components: &[f32]) -> [u8; 4] {
        let clamped: smallvec::SmallVec<[f32; 4]> = components
            .iter()
            .take(self.num_components)
            .map(|c| c.clamp(0.0, 1.0))
            .collect();

        self.base.sample(&(self.tint)(&clamped))
    }
}

/// The sampler for `None` colorants; paints nothing.
struct NoneSampler;

impl RgbaSampler for NoneSampler {
    fn sample(&self, _: &[f32]) -> [u8; 4] {
        [0, 0, 0, 0]
    }
}
