//! Glass effect: per-pixel random displacement before sampling.
//!
//! Each output pixel samples the source at a small uniform jitter around
//! its own coordinate, clamped to the image bounds. The generator is seeded
//! at construction and re-derived for every process call, so a filter
//! instance is reusable and a fixed seed reproduces the exact frosting.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Execution, Filter};
use crate::image::clamp;

/// Frosted-glass jitter of up to plus/minus 5 pixels per axis.
#[derive(Debug, Clone, Copy)]
pub struct GlassFilter {
    seed: u64,
}

impl GlassFilter {
    /// A glass filter with a fixed seed for reproducible output.
    pub fn new(seed: u64) -> GlassFilter {
        GlassFilter { seed }
    }
}

impl Default for GlassFilter {
    fn default() -> GlassFilter {
        GlassFilter { seed: 0 }
    }
}

impl Filter for GlassFilter {
    fn name(&self) -> &'static str {
        "glass"
    }

    fn execution(&self) -> Execution<'_> {
        // Fresh stream per call; the generator is stateful across pixels
        // within the call only.
        let mut rng = StdRng::seed_from_u64(self.seed);
        Execution::PerPixel(Box::new(move |source, x, y| {
            let jx = (rng.gen::<f64>() - 0.5) * 10.0;
            let jy = (rng.gen::<f64>() - 0.5) * 10.0;
            let sx = clamp((x as f64 + jx) as i32, 0, source.width() as i32 - 1);
            let sy = clamp((y as f64 + jy) as i32, 0, source.height() as i32 - 1);
            source.pixel(sx as usize, sy as usize)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Image, Pixel};
    use crate::progress::SilentProgress;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uniform_image_unchanged() {
        let source = Image::filled(8, 8, Pixel::rgb(60, 70, 80));
        let out = GlassFilter::default()
            .process(&source, &SilentProgress)
            .unwrap();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(out.pixel(x, y), Pixel::rgb(60, 70, 80));
            }
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut source = Image::blank(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                source.set_pixel(x, y, Pixel::rgb((x * 16) as u8, (y * 16) as u8, 0));
            }
        }
        let filter = GlassFilter::new(42);
        let a = filter.process(&source, &SilentProgress).unwrap();
        let b = filter.process(&source, &SilentProgress).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_pixels_come_from_source() {
        // Two-tone source: every output pixel must be one of the two tones.
        let mut source = Image::filled(10, 10, Pixel::rgb(0, 0, 0));
        for y in 0..10 {
            for x in 5..10 {
                source.set_pixel(x, y, Pixel::rgb(255, 255, 255));
            }
        }
        let out = GlassFilter::new(7).process(&source, &SilentProgress).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                let p = out.pixel(x, y);
                assert!(p == Pixel::rgb(0, 0, 0) || p == Pixel::rgb(255, 255, 255));
            }
        }
    }

    #[test]
    fn test_dimensions_preserved() {
        let source = Image::filled(5, 9, Pixel::rgb(1, 2, 3));
        let out = GlassFilter::default()
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!((out.width(), out.height()), (5, 9));
    }
}
