//! The filter library.
//!
//! ## Filter Categories
//!
//! - **Point**: invert, grayscale, sepia, brightness, binary threshold,
//!   reference-color correction (one pixel in, one pixel out)
//! - **Geometric**: translate, rotate, wave (coordinate remapping with a
//!   transparent fallback)
//! - **Convolution**: blur, Gaussian, sharpen, motion blur, emboss, Sobel,
//!   Prewitt (kernel-weighted neighborhood sums, edge-replicated)
//! - **Order-statistic**: median over an odd window with an untouched border
//! - **Global-statistic**: gray world, perfect reflector, histogram stretch
//!   (two full scans: aggregate, then remap)
//! - **Stochastic**: glass jitter (seeded, reproducible)
//! - **Morphology**: dilate, erode, opening, maximum over a 3x3 structuring
//!   element
//!
//! Every filter runs under the contract in [`crate::engine`]: one
//! `process` call per request, progress reported once per column,
//! cooperative cancellation with no partial output.

pub mod convolution;
pub mod geometric;
pub mod glass;
pub mod global;
pub mod median;
pub mod morphology;
pub mod point;

pub use convolution::{ConvolutionFilter, PrewittFilter, SobelFilter};
pub use geometric::{RotateFilter, TranslateFilter, WaveFilter};
pub use glass::GlassFilter;
pub use global::{GrayWorldFilter, HistogramStretchFilter, PerfectReflectorFilter};
pub use median::MedianFilter;
pub use morphology::{
    DilateFilter, ErodeFilter, MaximumFilter, OpenFilter, StructuringElement,
};
pub use point::{
    BinaryFilter, BrightnessFilter, GrayscaleFilter, InvertFilter, ReferenceColorFilter,
    SepiaFilter,
};
