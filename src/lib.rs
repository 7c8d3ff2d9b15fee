//! rasterfx
//!
//! A library of pixel-level raster transformations with cooperative
//! progress reporting and cancellation.
//!
//! ## Image Format
//! Images are RGBA rasters backed by an ndarray `Array3<u8>` of shape
//! `(height, width, 4)`. Filter arithmetic works on the R, G, B channels;
//! alpha carries the transparent sentinel the geometric filters emit for
//! out-of-bounds remaps.
//!
//! ## Filter Architecture
//! A [`Filter`] either supplies a per-pixel rule that the shared driver
//! maps over every output coordinate, or a full custom pass (two-pass
//! global-statistic filters). Both honor the same contract: the output has
//! the source's dimensions, progress is reported once per outer column,
//! and a cancelled call discards its partial output and returns
//! [`FilterError::Cancelled`].
//!
//! ```
//! use rasterfx::{Filter, Image, InvertFilter, Pixel, SilentProgress};
//!
//! let source = Image::filled(4, 4, Pixel::rgb(10, 20, 30));
//! let output = InvertFilter.process(&source, &SilentProgress).unwrap();
//! assert_eq!(output.pixel(0, 0), Pixel::rgb(245, 235, 225));
//! ```

pub mod engine;
pub mod error;
pub mod filters;
pub mod image;
pub mod kernel;
pub mod progress;

pub use engine::{Execution, Filter};
pub use error::FilterError;
pub use filters::*;
pub use image::{clamp, clamp_channel, Image, Pixel};
pub use kernel::Kernel;
pub use progress::{ProcessingContext, ProgressSink, SilentProgress};
