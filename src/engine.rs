//! The filter contract and the shared processing driver.
//!
//! A filter either supplies a per-pixel rule that the shared driver maps
//! over every output coordinate, or supplies a full custom pass (the
//! two-pass global-statistic filters do this). Both run under the same
//! contract: progress is reported once per outer column, cancellation is
//! polled at the same point, and a cancelled call discards its partial
//! output entirely.

use tracing::debug;

use crate::error::FilterError;
use crate::image::{Image, Pixel};
use crate::progress::ProgressSink;

/// Per-pixel rule consumed by the shared driver.
///
/// Boxed `FnMut` so stochastic rules can carry generator state across
/// pixels within one call.
pub type PixelRule<'a> = Box<dyn FnMut(&Image, usize, usize) -> Pixel + 'a>;

/// A complete custom pass honoring the progress/cancellation contract.
pub type PassRule<'a> = Box<dyn FnOnce(&Image, &dyn ProgressSink) -> Result<Image, FilterError> + 'a>;

/// How a filter executes over the image.
pub enum Execution<'a> {
    /// The shared driver maps this rule over every output coordinate.
    PerPixel(PixelRule<'a>),
    /// The filter drives its own loop (e.g. two-pass aggregation).
    CustomPass(PassRule<'a>),
}

/// A pixel-level image transformation.
///
/// Instances are built once with their parameters, invoked for one
/// `process` call per request, and hold no cross-call state.
pub trait Filter {
    /// Stable name for logging and the shell's invoke-by-name boundary.
    fn name(&self) -> &'static str;

    /// The execution strategy for one process call.
    fn execution(&self) -> Execution<'_>;

    /// Run the filter over `source`, producing a new image of identical
    /// dimensions or `FilterError::Cancelled`.
    fn process(&self, source: &Image, progress: &dyn ProgressSink) -> Result<Image, FilterError> {
        if source.is_empty() {
            return Err(FilterError::EmptyImage);
        }
        debug!(
            filter = self.name(),
            width = source.width(),
            height = source.height(),
            "starting filter pass"
        );
        let result = match self.execution() {
            Execution::PerPixel(rule) => drive(source, progress, 0, rule),
            Execution::CustomPass(pass) => pass(source, progress),
        };
        if matches!(result, Err(FilterError::Cancelled)) {
            debug!(filter = self.name(), "filter pass cancelled");
        }
        result
    }
}

/// The shared column-major drive loop.
///
/// Iterates `x` over `margin..width - margin` (outer) and `y` over
/// `margin..height - margin` (inner), reporting `x / width * 100` and
/// polling cancellation once per column. A non-zero margin leaves that many
/// border pixels in the default state (the median filter's border-exclusion
/// policy); every other filter uses `margin = 0`.
pub(crate) fn drive(
    source: &Image,
    progress: &dyn ProgressSink,
    margin: usize,
    mut rule: PixelRule<'_>,
) -> Result<Image, FilterError> {
    let (width, height) = (source.width(), source.height());
    let mut output = Image::blank(width, height);
    if width <= 2 * margin || height <= 2 * margin {
        // Window never fits; the whole output stays in the default state.
        return Ok(output);
    }

    for x in margin..width - margin {
        progress.report((x as f32 / width as f32 * 100.0) as u8);
        if progress.is_cancelled() {
            return Err(FilterError::Cancelled);
        }
        for y in margin..height - margin {
            output.set_pixel(x, y, rule(source, x, y));
        }
    }
    Ok(output)
}
