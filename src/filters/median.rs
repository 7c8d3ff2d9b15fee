//! Order-statistic median filter.
//!
//! Removes salt-and-pepper noise while preserving edges. The window must
//! stay fully in bounds, so iteration is restricted to the interior and a
//! `radius`-wide border is left in the default state. This is a deliberate
//! border-exclusion policy, distinct from the edge-replicate policy of the
//! convolution filters.

use crate::engine::{drive, Execution, Filter};
use crate::error::FilterError;
use crate::image::Pixel;

/// Median over an odd `size x size` window, per channel.
#[derive(Debug, Clone, Copy)]
pub struct MedianFilter {
    size: usize,
}

impl MedianFilter {
    /// Window size must be odd and positive.
    pub fn new(size: usize) -> Result<MedianFilter, FilterError> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::EvenWindow(size));
        }
        Ok(MedianFilter { size })
    }

    /// Border width excluded from the output.
    pub fn radius(&self) -> usize {
        self.size / 2
    }
}

impl Default for MedianFilter {
    /// The stock 3x3 window.
    fn default() -> MedianFilter {
        MedianFilter { size: 3 }
    }
}

impl Filter for MedianFilter {
    fn name(&self) -> &'static str {
        "median"
    }

    fn execution(&self) -> Execution<'_> {
        let size = self.size;
        let radius = self.radius();
        Execution::CustomPass(Box::new(move |source, progress| {
            let window = size * size;
            let index = window / 2;
            let mut reds = vec![0u8; window];
            let mut greens = vec![0u8; window];
            let mut blues = vec![0u8; window];

            drive(
                source,
                progress,
                radius,
                Box::new(move |source, x, y| {
                    // The drive margin keeps the whole window in bounds.
                    let mut k = 0;
                    for i in x - radius..=x + radius {
                        for j in y - radius..=y + radius {
                            let p = source.pixel(i, j);
                            reds[k] = p.r;
                            greens[k] = p.g;
                            blues[k] = p.b;
                            k += 1;
                        }
                    }
                    reds.sort_unstable();
                    greens.sort_unstable();
                    blues.sort_unstable();
                    Pixel::rgb(reds[index], greens[index], blues[index])
                }),
            )
        }))
    }
}
