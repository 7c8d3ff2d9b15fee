//! Error taxonomy for filter construction and processing.

use thiserror::Error;

/// Everything a filter can report besides a finished image.
///
/// `Cancelled` is a terminal outcome, not a failure: the caller asked for
/// the pass to stop and no partial result is handed back. The remaining
/// variants are parameter-validity errors raised before any pixel is
/// written.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Cancellation was observed at a poll point; the partial output was
    /// discarded.
    #[error("processing was cancelled")]
    Cancelled,

    /// The source image has zero width or height.
    #[error("source image has zero width or height")]
    EmptyImage,

    /// Kernel extents must be odd so the center weight aligns with the
    /// sampled pixel.
    #[error("kernel extents must be odd, got {width}x{height}")]
    EvenKernel { width: usize, height: usize },

    /// Order-statistic window sizes must be odd and positive.
    #[error("window size must be odd and positive, got {0}")]
    EvenWindow(usize),

    /// Gaussian spread must be strictly positive.
    #[error("sigma must be positive, got {0}")]
    InvalidSigma(f32),

    /// Reference-color correction divides by each reference channel.
    #[error("reference color channels must be non-zero")]
    ZeroReferenceChannel,

    /// A structuring element with no active cells selects nothing.
    #[error("structuring element has no active cells")]
    EmptyStructuringElement,
}
