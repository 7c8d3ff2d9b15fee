//! Morphological filters over a 3x3 binary structuring element.
//!
//! Dilate takes the per-channel maximum over the active cells of the mask,
//! making bright regions grow; erode takes the minimum, making dark regions
//! grow. Opening is erosion followed by dilation and removes bright specks
//! smaller than the element. Sampling edge-replicates like the convolution
//! filters.

use crate::engine::{Execution, Filter};
use crate::error::FilterError;
use crate::image::{Image, Pixel};
use crate::progress::ProgressSink;

/// A 3x3 binary structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    mask: [[bool; 3]; 3],
}

impl StructuringElement {
    /// Wrap a mask, rejecting one with no active cells.
    pub fn new(mask: [[bool; 3]; 3]) -> Result<StructuringElement, FilterError> {
        if mask.iter().flatten().all(|&cell| !cell) {
            return Err(FilterError::EmptyStructuringElement);
        }
        Ok(StructuringElement { mask })
    }

    /// All nine cells active.
    pub fn full() -> StructuringElement {
        StructuringElement {
            mask: [[true; 3]; 3],
        }
    }

    /// The 4-connected cross.
    pub fn cross() -> StructuringElement {
        StructuringElement {
            mask: [
                [false, true, false],
                [true, true, true],
                [false, true, false],
            ],
        }
    }

    /// Iterate active offsets `(kx, ky)` in `-1..=1`.
    fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..3).flat_map(move |j| {
            (0..3).filter_map(move |i| {
                if self.mask[j][i] {
                    Some((i as i32 - 1, j as i32 - 1))
                } else {
                    None
                }
            })
        })
    }
}

impl Default for StructuringElement {
    fn default() -> StructuringElement {
        StructuringElement::full()
    }
}

/// Per-channel extremum over the element at `(x, y)`, edge-replicated.
fn extremum(source: &Image, element: &StructuringElement, x: usize, y: usize, max: bool) -> Pixel {
    let mut acc: Option<[u8; 3]> = None;
    for (kx, ky) in element.offsets() {
        let p = source.pixel_clamped(x as i32 + kx, y as i32 + ky);
        let sample = [p.r, p.g, p.b];
        acc = Some(match acc {
            None => sample,
            Some(prev) => {
                let mut next = [0u8; 3];
                for c in 0..3 {
                    next[c] = if max {
                        prev[c].max(sample[c])
                    } else {
                        prev[c].min(sample[c])
                    };
                }
                next
            }
        });
    }
    // The element has at least one active cell by construction.
    let [r, g, b] = acc.unwrap_or([0, 0, 0]);
    Pixel::rgb(r, g, b)
}

/// One morphology scan reporting progress over half the budget.
fn half_pass(
    source: &Image,
    progress: &dyn ProgressSink,
    base: u8,
    element: &StructuringElement,
    max: bool,
) -> Result<Image, FilterError> {
    let width = source.width();
    let mut output = Image::blank(width, source.height());
    for x in 0..width {
        progress.report(base + (x as f32 / width as f32 * 50.0) as u8);
        if progress.is_cancelled() {
            return Err(FilterError::Cancelled);
        }
        for y in 0..source.height() {
            output.set_pixel(x, y, extremum(source, element, x, y, max));
        }
    }
    Ok(output)
}

// ============================================================================
// Dilate / erode
// ============================================================================

/// Per-channel maximum over the structuring element.
#[derive(Debug, Default, Clone, Copy)]
pub struct DilateFilter {
    element: StructuringElement,
}

impl DilateFilter {
    pub fn new(element: StructuringElement) -> DilateFilter {
        DilateFilter { element }
    }
}

impl Filter for DilateFilter {
    fn name(&self) -> &'static str {
        "dilate"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(move |source, x, y| {
            extremum(source, &self.element, x, y, true)
        }))
    }
}

/// Per-channel minimum over the structuring element.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErodeFilter {
    element: StructuringElement,
}

impl ErodeFilter {
    pub fn new(element: StructuringElement) -> ErodeFilter {
        ErodeFilter { element }
    }
}

impl Filter for ErodeFilter {
    fn name(&self) -> &'static str {
        "erode"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(move |source, x, y| {
            extremum(source, &self.element, x, y, false)
        }))
    }
}

// ============================================================================
// Opening
// ============================================================================

/// Erosion followed by dilation with the same element.
///
/// A custom two-pass: the erosion scan takes the first half of the progress
/// budget, the dilation of the intermediate image the second half.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenFilter {
    element: StructuringElement,
}

impl OpenFilter {
    pub fn new(element: StructuringElement) -> OpenFilter {
        OpenFilter { element }
    }
}

impl Filter for OpenFilter {
    fn name(&self) -> &'static str {
        "open"
    }

    fn execution(&self) -> Execution<'_> {
        let element = self.element;
        Execution::CustomPass(Box::new(move |source, progress| {
            let eroded = half_pass(source, progress, 0, &element, false)?;
            half_pass(&eroded, progress, 50, &element, true)
        }))
    }
}

// ============================================================================
// Maximum
// ============================================================================

/// Per-channel maximum over the full 3x3 window.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaximumFilter;

impl Filter for MaximumFilter {
    fn name(&self) -> &'static str {
        "maximum"
    }

    fn execution(&self) -> Execution<'_> {
        let element = StructuringElement::full();
        Execution::PerPixel(Box::new(move |source, x, y| {
            extremum(source, &element, x, y, true)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ProcessingContext, SilentProgress};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_element_rejected() {
        assert_eq!(
            StructuringElement::new([[false; 3]; 3]).unwrap_err(),
            FilterError::EmptyStructuringElement
        );
        assert!(StructuringElement::new([[false, true, false]; 3]).is_ok());
    }

    #[test]
    fn test_dilate_propagates_bright_pixel() {
        let mut source = Image::filled(5, 5, Pixel::rgb(0, 0, 0));
        source.set_pixel(2, 2, Pixel::rgb(255, 255, 255));
        let out = DilateFilter::default()
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!(out.pixel(1, 1), Pixel::rgb(255, 255, 255));
        assert_eq!(out.pixel(3, 2), Pixel::rgb(255, 255, 255));
        assert_eq!(out.pixel(0, 0), Pixel::rgb(0, 0, 0));
    }

    #[test]
    fn test_cross_element_skips_diagonals() {
        let mut source = Image::filled(5, 5, Pixel::rgb(0, 0, 0));
        source.set_pixel(2, 2, Pixel::rgb(255, 255, 255));
        let out = DilateFilter::new(StructuringElement::cross())
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!(out.pixel(1, 2), Pixel::rgb(255, 255, 255));
        // The diagonal neighbor is not under the cross.
        assert_eq!(out.pixel(1, 1), Pixel::rgb(0, 0, 0));
    }

    #[test]
    fn test_erode_propagates_dark_pixel() {
        let mut source = Image::filled(5, 5, Pixel::rgb(200, 200, 200));
        source.set_pixel(2, 2, Pixel::rgb(10, 10, 10));
        let out = ErodeFilter::default()
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!(out.pixel(1, 2), Pixel::rgb(10, 10, 10));
        assert_eq!(out.pixel(0, 0), Pixel::rgb(200, 200, 200));
    }

    #[test]
    fn test_open_removes_isolated_speck() {
        let mut source = Image::filled(7, 7, Pixel::rgb(0, 0, 0));
        source.set_pixel(3, 3, Pixel::rgb(255, 255, 255));
        let out = OpenFilter::default()
            .process(&source, &SilentProgress)
            .unwrap();
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(out.pixel(x, y), Pixel::rgb(0, 0, 0));
            }
        }
    }

    #[test]
    fn test_open_preserves_large_region() {
        let mut source = Image::filled(9, 9, Pixel::rgb(0, 0, 0));
        for y in 2..7 {
            for x in 2..7 {
                source.set_pixel(x, y, Pixel::rgb(255, 255, 255));
            }
        }
        let out = OpenFilter::default()
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!(out.pixel(4, 4), Pixel::rgb(255, 255, 255));
    }

    #[test]
    fn test_maximum_filter_matches_full_dilate() {
        let mut source = Image::filled(6, 6, Pixel::rgb(30, 30, 30));
        source.set_pixel(2, 3, Pixel::rgb(90, 120, 150));
        let max_out = MaximumFilter.process(&source, &SilentProgress).unwrap();
        let dilate_out = DilateFilter::new(StructuringElement::full())
            .process(&source, &SilentProgress)
            .unwrap();
        assert_eq!(max_out, dilate_out);
    }

    #[test]
    fn test_open_cancellation() {
        let source = Image::filled(8, 8, Pixel::rgb(5, 5, 5));
        let ctx = ProcessingContext::new();
        ctx.cancel();
        assert_eq!(
            OpenFilter::default().process(&source, &ctx).unwrap_err(),
            FilterError::Cancelled
        );
    }
}
