//! Geometric filters: remap the output coordinate to a source coordinate.
//!
//! Unlike the neighborhood filters these do not edge-replicate: a mapped
//! coordinate is sampled only when it lies strictly inside the image
//! (`0 < xx < width - 1` and `0 < yy < height - 1`); otherwise the output
//! pixel is the transparent fallback.

use std::f64::consts::{FRAC_PI_4, PI};

use crate::engine::{Execution, Filter};
use crate::image::{Image, Pixel};

/// Sample `(xx, yy)` if strictly in bounds, else the transparent fallback.
#[inline]
fn sample_or_transparent(source: &Image, xx: i32, yy: i32) -> Pixel {
    let (w, h) = (source.width() as i32, source.height() as i32);
    if xx > 0 && xx < w - 1 && yy > 0 && yy < h - 1 {
        source.pixel(xx as usize, yy as usize)
    } else {
        Pixel::TRANSPARENT
    }
}

// ============================================================================
// Translate
// ============================================================================

/// Horizontal shift: output `(x, y)` samples source `(x + dx, y)`.
#[derive(Debug, Clone, Copy)]
pub struct TranslateFilter {
    dx: i32,
}

impl TranslateFilter {
    pub fn new(dx: i32) -> TranslateFilter {
        TranslateFilter { dx }
    }
}

impl Default for TranslateFilter {
    /// The classic 50-pixel shift.
    fn default() -> TranslateFilter {
        TranslateFilter { dx: 50 }
    }
}

impl Filter for TranslateFilter {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn execution(&self) -> Execution<'_> {
        let dx = self.dx;
        Execution::PerPixel(Box::new(move |source, x, y| {
            let xx = x as i32 + dx;
            if xx < 0 || xx > source.width() as i32 - 1 {
                Pixel::TRANSPARENT
            } else {
                source.pixel(xx as usize, y)
            }
        }))
    }
}

// ============================================================================
// Rotate
// ============================================================================

/// Rotation about the image center by a fixed angle.
#[derive(Debug, Clone, Copy)]
pub struct RotateFilter {
    angle: f64,
}

impl RotateFilter {
    pub fn new(angle: f64) -> RotateFilter {
        RotateFilter { angle }
    }
}

impl Default for RotateFilter {
    /// 45 degrees.
    fn default() -> RotateFilter {
        RotateFilter { angle: FRAC_PI_4 }
    }
}

impl Filter for RotateFilter {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn execution(&self) -> Execution<'_> {
        let (sin, cos) = self.angle.sin_cos();
        Execution::PerPixel(Box::new(move |source, x, y| {
            let x0 = (source.width() / 2) as f64;
            let y0 = (source.height() / 2) as f64;
            let (dx, dy) = (x as f64 - x0, y as f64 - y0);
            let xx = (dx * cos - dy * sin + x0) as i32;
            let yy = (dx * sin + dy * cos + y0) as i32;
            sample_or_transparent(source, xx, yy)
        }))
    }
}

// ============================================================================
// Wave
// ============================================================================

/// Sinusoidal horizontal displacement: `xx = x + 20 sin(2 pi y / 60)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaveFilter;

impl Filter for WaveFilter {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(|source, x, y| {
            let xx = (x as f64 + 20.0 * (2.0 * PI * y as f64 / 60.0).sin()) as i32;
            sample_or_transparent(source, xx, y as i32)
        }))
    }
}
