//! Per-intent memoization of samplers.

use crate::{RenderingIntent, RgbaSampler};
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

/// A lazily filled map from rendering intent to a built sampler.
///
/// Building a sampler can be expensive (ICC conversions are tabulated into
/// lookup tables), so each color space builds at most one sampler per intent
/// over its lifetime.
pub(crate) struct SamplerCache(Mutex<FxHashMap<RenderingIntent, Arc<dyn RgbaSampler>>>);

impl SamplerCache {
    pub(crate) fn new() -> Self {
        Self(Mutex::new(FxHashMap::default()))
    }

    pub(crate) fn get_or_insert_with(
        &self,
        intent: RenderingIntent,
        f: impl FnOnce() -> Arc<dyn RgbaSampler>,
    ) -> Arc<dyn RgbaSampler> {
        self.0
            .lock()
            .unwrap()
            .entry(intent)
            .or_insert_with(f)
            .clone()
    }
}

impl Debug for SamplerCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SamplerCache(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant([u8; 4]);

    impl RgbaSampler for Constant {
        fn sample(&self, _: &[f32]) -> [u8; 4] {
            self.0
        }
    }

    #[test]
    fn builds_once_per_intent() {
        let cache = SamplerCache::new();
        let mut builds = 0;

        for _ in 0..3 {
            let sampler = cache.get_or_insert_with(RenderingIntent::Perceptual, || {
                builds += 1;
                Arc::new(Constant([1, 2, 3, 4]))
            });
            assert_eq!(sampler.sample(&[]), [1, 2, 3, 4]);
        }

        cache.get_or_insert_with(RenderingIntent::Saturation, || {
            builds += 1;
            Arc::new(Constant([5, 6, 7, 8]))
        });

        assert_eq!(builds, 2);
    }
}
