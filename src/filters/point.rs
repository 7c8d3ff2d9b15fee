//! Point filters: one pixel in, one pixel out, no neighbor access.
//!
//! All of these run under the shared per-pixel driver. Luminance uses the
//! BT.601 weights `0.299 R + 0.587 G + 0.114 B`.

use crate::engine::{Execution, Filter};
use crate::error::FilterError;
use crate::image::{clamp_channel, Pixel};

#[inline]
fn luminance(pixel: Pixel) -> f64 {
    0.299 * pixel.r as f64 + 0.587 * pixel.g as f64 + 0.114 * pixel.b as f64
}

// ============================================================================
// Invert
// ============================================================================

/// Channel inversion: `255 - c`. Applying it twice restores the original.
#[derive(Debug, Default, Clone, Copy)]
pub struct InvertFilter;

impl Filter for InvertFilter {
    fn name(&self) -> &'static str {
        "invert"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(|source, x, y| {
            let p = source.pixel(x, y);
            Pixel::rgb(255 - p.r, 255 - p.g, 255 - p.b)
        }))
    }
}

// ============================================================================
// Grayscale
// ============================================================================

/// Luminance replicated into all three channels.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrayscaleFilter;

impl Filter for GrayscaleFilter {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(|source, x, y| {
            let intensity = clamp_channel(luminance(source.pixel(x, y)).round() as i32);
            Pixel::rgb(intensity, intensity, intensity)
        }))
    }
}

// ============================================================================
// Sepia
// ============================================================================

/// Sepia toning: luminance shifted by `(+2k, +k/2, -k)` with `k = 60`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SepiaFilter;

impl Filter for SepiaFilter {
    fn name(&self) -> &'static str {
        "sepia"
    }

    fn execution(&self) -> Execution<'_> {
        const K: f64 = 60.0;
        Execution::PerPixel(Box::new(|source, x, y| {
            let intensity = luminance(source.pixel(x, y));
            Pixel::rgb(
                clamp_channel((intensity + 2.0 * K) as i32),
                clamp_channel((intensity + 0.5 * K) as i32),
                clamp_channel((intensity - K) as i32),
            )
        }))
    }
}

// ============================================================================
// Brightness
// ============================================================================

/// Adds a constant to every channel, clamped.
#[derive(Debug, Clone, Copy)]
pub struct BrightnessFilter {
    amount: i32,
}

impl BrightnessFilter {
    pub fn new(amount: i32) -> BrightnessFilter {
        BrightnessFilter { amount }
    }
}

impl Default for BrightnessFilter {
    /// The classic `+10` brightness boost.
    fn default() -> BrightnessFilter {
        BrightnessFilter { amount: 10 }
    }
}

impl Filter for BrightnessFilter {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn execution(&self) -> Execution<'_> {
        let amount = self.amount;
        Execution::PerPixel(Box::new(move |source, x, y| {
            let p = source.pixel(x, y);
            Pixel::rgb(
                clamp_channel(p.r as i32 + amount),
                clamp_channel(p.g as i32 + amount),
                clamp_channel(p.b as i32 + amount),
            )
        }))
    }
}

// ============================================================================
// Binary threshold
// ============================================================================

/// Pure black when every channel is below 127, pure white otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryFilter;

impl Filter for BinaryFilter {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(|source, x, y| {
            let p = source.pixel(x, y);
            if p.r < 127 && p.g < 127 && p.b < 127 {
                Pixel::rgb(0, 0, 0)
            } else {
                Pixel::rgb(255, 255, 255)
            }
        }))
    }
}

// ============================================================================
// Reference-color correction
// ============================================================================

/// Per-channel correction against a fixed reference triple:
/// `clamp(c * (255 - |ref_c - c|) / ref_c)`.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceColorFilter {
    reference: [u8; 3],
}

impl ReferenceColorFilter {
    /// Zero reference channels are rejected: the formula divides by them.
    pub fn new(reference: [u8; 3]) -> Result<ReferenceColorFilter, FilterError> {
        if reference.contains(&0) {
            return Err(FilterError::ZeroReferenceChannel);
        }
        Ok(ReferenceColorFilter { reference })
    }
}

impl Default for ReferenceColorFilter {
    fn default() -> ReferenceColorFilter {
        ReferenceColorFilter {
            reference: [124, 149, 171],
        }
    }
}

impl Filter for ReferenceColorFilter {
    fn name(&self) -> &'static str {
        "reference_color"
    }

    fn execution(&self) -> Execution<'_> {
        let reference = self.reference;
        Execution::PerPixel(Box::new(move |source, x, y| {
            let p = source.pixel(x, y);
            let correct = |c: u8, r: u8| {
                let (c, r) = (c as f64, r as f64);
                clamp_channel((c * (255.0 - (r - c).abs()) / r) as i32)
            };
            Pixel::rgb(
                correct(p.r, reference[0]),
                correct(p.g, reference[1]),
                correct(p.b, reference[2]),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Image;
    use crate::progress::SilentProgress;
    use pretty_assertions::assert_eq;

    fn sample() -> Image {
        Image::from_pixels(
            2,
            2,
            &[
                Pixel::rgb(10, 10, 10),
                Pixel::rgb(250, 250, 250),
                Pixel::rgb(0, 0, 0),
                Pixel::rgb(200, 200, 200),
            ],
        )
    }

    #[test]
    fn test_invert_known_values() {
        let out = InvertFilter.process(&sample(), &SilentProgress).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::rgb(245, 245, 245));
        assert_eq!(out.pixel(1, 0), Pixel::rgb(5, 5, 5));
        assert_eq!(out.pixel(0, 1), Pixel::rgb(255, 255, 255));
        assert_eq!(out.pixel(1, 1), Pixel::rgb(55, 55, 55));
    }

    #[test]
    fn test_invert_is_its_own_inverse() {
        let source = Image::from_pixels(
            2,
            2,
            &[
                Pixel::rgb(3, 90, 255),
                Pixel::rgb(128, 127, 126),
                Pixel::rgb(0, 255, 17),
                Pixel::rgb(44, 45, 46),
            ],
        );
        let once = InvertFilter.process(&source, &SilentProgress).unwrap();
        let twice = InvertFilter.process(&once, &SilentProgress).unwrap();
        assert_eq!(twice, source);
    }

    #[test]
    fn test_grayscale_channels_equal() {
        let source = Image::from_pixels(
            2,
            1,
            &[Pixel::rgb(200, 30, 90), Pixel::rgb(0, 255, 12)],
        );
        let out = GrayscaleFilter.process(&source, &SilentProgress).unwrap();
        for x in 0..2 {
            let p = out.pixel(x, 0);
            assert_eq!(p.r, p.g);
            assert_eq!(p.g, p.b);
        }
    }

    #[test]
    fn test_grayscale_luminance_value() {
        let source = Image::filled(1, 1, Pixel::rgb(100, 100, 100));
        let out = GrayscaleFilter.process(&source, &SilentProgress).unwrap();
        // Weights sum to 1, so a neutral pixel keeps its value.
        assert_eq!(out.pixel(0, 0), Pixel::rgb(100, 100, 100));
    }

    #[test]
    fn test_sepia_offsets() {
        let source = Image::filled(1, 1, Pixel::rgb(100, 100, 100));
        let out = SepiaFilter.process(&source, &SilentProgress).unwrap();
        // Luminance of a neutral 100 is 100; offsets are +120, +30, -60.
        assert_eq!(out.pixel(0, 0), Pixel::rgb(220, 130, 40));
    }

    #[test]
    fn test_sepia_clamps_high_intensity() {
        let source = Image::filled(1, 1, Pixel::rgb(250, 250, 250));
        let out = SepiaFilter.process(&source, &SilentProgress).unwrap();
        assert_eq!(out.pixel(0, 0).r, 255);
    }

    #[test]
    fn test_brightness_default_adds_ten() {
        let source = Image::filled(1, 1, Pixel::rgb(0, 120, 250));
        let out = BrightnessFilter::default()
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::rgb(10, 130, 255));
    }

    #[test]
    fn test_brightness_negative_amount() {
        let source = Image::filled(1, 1, Pixel::rgb(5, 100, 200));
        let out = BrightnessFilter::new(-20)
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::rgb(0, 80, 180));
    }

    #[test]
    fn test_binary_output_is_black_or_white() {
        let source = Image::from_pixels(
            2,
            2,
            &[
                Pixel::rgb(126, 126, 126),
                Pixel::rgb(127, 0, 0),
                Pixel::rgb(255, 255, 255),
                Pixel::rgb(10, 200, 10),
            ],
        );
        let out = BinaryFilter.process(&source, &SilentProgress).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::rgb(0, 0, 0));
        // A single channel at or above 127 flips the pixel to white.
        assert_eq!(out.pixel(1, 0), Pixel::rgb(255, 255, 255));
        assert_eq!(out.pixel(0, 1), Pixel::rgb(255, 255, 255));
        assert_eq!(out.pixel(1, 1), Pixel::rgb(255, 255, 255));
    }

    #[test]
    fn test_reference_color_identity_at_reference() {
        // A pixel exactly at the reference maps each channel to
        // c * 255 / ref, clamped.
        let filter = ReferenceColorFilter::new([124, 149, 171]).unwrap();
        let source = Image::filled(1, 1, Pixel::rgb(124, 149, 171));
        let out = filter.process(&source, &SilentProgress).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::rgb(255, 255, 255));
    }

    #[test]
    fn test_reference_color_black_stays_black() {
        let filter = ReferenceColorFilter::default();
        let source = Image::filled(1, 1, Pixel::rgb(0, 0, 0));
        let out = filter.process(&source, &SilentProgress).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::rgb(0, 0, 0));
    }

    #[test]
    fn test_reference_color_rejects_zero_channel() {
        assert_eq!(
            ReferenceColorFilter::new([10, 0, 20]).unwrap_err(),
            FilterError::ZeroReferenceChannel
        );
    }
}
