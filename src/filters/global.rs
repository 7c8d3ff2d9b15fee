//! Two-pass global-statistic filters.
//!
//! Each of these must observe the entire image once before it can compute
//! any output pixel: the first scan accumulates a per-channel aggregate,
//! the second remaps every pixel through it. Both scans poll cancellation
//! once per column and split the progress budget half and half.
//!
//! Degenerate aggregates (zero channel mean, zero channel max, zero-range
//! histogram) would divide by zero in the naive formulas; the affected
//! channel is left unchanged instead.

use crate::engine::{Execution, Filter};
use crate::error::FilterError;
use crate::image::{clamp, clamp_channel, Image, Pixel};
use crate::progress::ProgressSink;

/// First pass: visit every pixel column by column, reporting progress over
/// the first half of the budget.
fn scan_columns(
    source: &Image,
    progress: &dyn ProgressSink,
    mut visit: impl FnMut(Pixel),
) -> Result<(), FilterError> {
    let width = source.width();
    for x in 0..width {
        progress.report((x as f32 / width as f32 * 50.0) as u8);
        if progress.is_cancelled() {
            return Err(FilterError::Cancelled);
        }
        for y in 0..source.height() {
            visit(source.pixel(x, y));
        }
    }
    Ok(())
}

/// Second pass: remap every source pixel, reporting progress over the
/// second half of the budget.
fn remap_columns(
    source: &Image,
    progress: &dyn ProgressSink,
    map: impl Fn(Pixel) -> Pixel,
) -> Result<Image, FilterError> {
    let width = source.width();
    let mut output = Image::blank(width, source.height());
    for x in 0..width {
        progress.report(50 + (x as f32 / width as f32 * 50.0) as u8);
        if progress.is_cancelled() {
            return Err(FilterError::Cancelled);
        }
        for y in 0..source.height() {
            output.set_pixel(x, y, map(source.pixel(x, y)));
        }
    }
    Ok(output)
}

// ============================================================================
// Gray world
// ============================================================================

/// Gray-world white balance: scale each channel by `overall mean / channel
/// mean`, pulling the image's average color toward neutral gray.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrayWorldFilter;

impl Filter for GrayWorldFilter {
    fn name(&self) -> &'static str {
        "gray_world"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::CustomPass(Box::new(|source, progress| {
            let mut sums = [0.0f64; 3];
            scan_columns(source, progress, |p| {
                sums[0] += p.r as f64;
                sums[1] += p.g as f64;
                sums[2] += p.b as f64;
            })?;

            let count = (source.width() * source.height()) as f64;
            let means = [sums[0] / count, sums[1] / count, sums[2] / count];
            let overall = (means[0] + means[1] + means[2]) / 3.0;

            remap_columns(source, progress, |p| {
                let correct = |c: u8, mean: f64| {
                    if mean > 0.0 {
                        clamp_channel((c as f64 * overall / mean) as i32)
                    } else {
                        c
                    }
                };
                Pixel::rgb(
                    correct(p.r, means[0]),
                    correct(p.g, means[1]),
                    correct(p.b, means[2]),
                )
            })
        }))
    }
}

// ============================================================================
// Perfect reflector
// ============================================================================

/// Perfect-reflector white balance: scale each channel so its observed
/// maximum maps to 255.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerfectReflectorFilter;

impl Filter for PerfectReflectorFilter {
    fn name(&self) -> &'static str {
        "perfect_reflector"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::CustomPass(Box::new(|source, progress| {
            let mut max = [0u8; 3];
            scan_columns(source, progress, |p| {
                max[0] = max[0].max(p.r);
                max[1] = max[1].max(p.g);
                max[2] = max[2].max(p.b);
            })?;

            remap_columns(source, progress, |p| {
                let correct = |c: u8, m: u8| {
                    if m > 0 {
                        clamp_channel(c as i32 * 255 / m as i32)
                    } else {
                        c
                    }
                };
                Pixel::rgb(
                    correct(p.r, max[0]),
                    correct(p.g, max[1]),
                    correct(p.b, max[2]),
                )
            })
        }))
    }
}

// ============================================================================
// Linear histogram stretch
// ============================================================================

/// Linear histogram stretch: the stretched value
/// `clamp(255 (c - min) / (max - min))` is added to the original channel,
/// then clamped again.
#[derive(Debug, Default, Clone, Copy)]
pub struct HistogramStretchFilter;

impl Filter for HistogramStretchFilter {
    fn name(&self) -> &'static str {
        "histogram_stretch"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::CustomPass(Box::new(|source, progress| {
            let mut min = [255u8; 3];
            let mut max = [0u8; 3];
            scan_columns(source, progress, |p| {
                for c in 0..3 {
                    let v = p.channel(c);
                    min[c] = min[c].min(v);
                    max[c] = max[c].max(v);
                }
            })?;

            remap_columns(source, progress, |p| {
                let stretch = |c: u8, min: u8, max: u8| {
                    if max == min {
                        // Zero-range channel: no stretch to apply.
                        return c;
                    }
                    let (c, min, max) = (c as i32, min as i32, max as i32);
                    clamp_channel(clamp(255 * (c - min) / (max - min), 0, 255) + c)
                };
                Pixel::rgb(
                    stretch(p.r, min[0], max[0]),
                    stretch(p.g, min[1], max[1]),
                    stretch(p.b, min[2], max[2]),
                )
            })
        }))
    }
}
