//! Convolution filters: weighted neighborhood sums over a kernel.
//!
//! Out-of-bounds neighbor coordinates are clamped to the nearest edge
//! (edge-replicate). Channel sums accumulate in f32, truncate toward zero,
//! take an optional integer bias, and clamp into the u8 range.

use crate::engine::{Execution, Filter};
use crate::error::FilterError;
use crate::image::{clamp_channel, Image, Pixel};
use crate::kernel::Kernel;

/// Per-channel convolution of `kernel` centered at `(x, y)`.
fn convolve(source: &Image, kernel: &Kernel, x: usize, y: usize) -> [f32; 3] {
    let (rx, ry) = (kernel.radius_x(), kernel.radius_y());
    let mut sum = [0.0f32; 3];
    for l in -ry..=ry {
        for k in -rx..=rx {
            let neighbor = source.pixel_clamped(x as i32 + k, y as i32 + l);
            let weight = kernel.weight(k, l);
            sum[0] += neighbor.r as f32 * weight;
            sum[1] += neighbor.g as f32 * weight;
            sum[2] += neighbor.b as f32 * weight;
        }
    }
    sum
}

// ============================================================================
// Single-kernel convolution
// ============================================================================

/// A single-kernel convolution filter with an optional output bias.
#[derive(Debug, Clone)]
pub struct ConvolutionFilter {
    name: &'static str,
    kernel: Kernel,
    bias: i32,
}

impl ConvolutionFilter {
    /// Convolve an arbitrary kernel.
    pub fn new(kernel: Kernel) -> ConvolutionFilter {
        ConvolutionFilter {
            name: "convolution",
            kernel,
            bias: 0,
        }
    }

    /// 3x3 uniform box blur.
    pub fn blur() -> ConvolutionFilter {
        ConvolutionFilter {
            name: "blur",
            kernel: Kernel::box_blur(),
            bias: 0,
        }
    }

    /// 3x3 sharpen (center 9, neighbors -1).
    pub fn sharpen() -> ConvolutionFilter {
        ConvolutionFilter {
            name: "sharpen",
            kernel: Kernel::sharpen(),
            bias: 0,
        }
    }

    /// 9x9 diagonal motion blur.
    pub fn motion_blur() -> ConvolutionFilter {
        ConvolutionFilter {
            name: "motion_blur",
            kernel: Kernel::motion_blur(),
            bias: 0,
        }
    }

    /// Emboss/stamp: cross kernel with a +128 bias so the relief is
    /// centered around mid-gray.
    pub fn emboss() -> ConvolutionFilter {
        ConvolutionFilter {
            name: "emboss",
            kernel: Kernel::emboss(),
            bias: 128,
        }
    }

    /// Gaussian blur with the given radius and spread.
    pub fn gaussian(radius: usize, sigma: f32) -> Result<ConvolutionFilter, FilterError> {
        Ok(ConvolutionFilter {
            name: "gaussian",
            kernel: Kernel::gaussian(radius, sigma)?,
            bias: 0,
        })
    }

    /// Gaussian blur with the stock `(radius 3, sigma 2)` parameters.
    pub fn gaussian_default() -> ConvolutionFilter {
        // Fixed positive sigma, cannot fail.
        ConvolutionFilter::gaussian(3, 2.0).unwrap()
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

impl Filter for ConvolutionFilter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(move |source, x, y| {
            let sum = convolve(source, &self.kernel, x, y);
            Pixel::rgb(
                clamp_channel(sum[0] as i32 + self.bias),
                clamp_channel(sum[1] as i32 + self.bias),
                clamp_channel(sum[2] as i32 + self.bias),
            )
        }))
    }
}

// ============================================================================
// Sobel gradient magnitude
// ============================================================================

/// Two-kernel Sobel gradient magnitude.
///
/// Both kernels are convolved per channel; the magnitudes combine into one
/// scalar `sqrt(sum over channels of gx^2 + gy^2)` and the output is
/// achromatic.
#[derive(Debug, Clone)]
pub struct SobelFilter {
    horizontal: Kernel,
    vertical: Kernel,
}

impl Default for SobelFilter {
    fn default() -> SobelFilter {
        SobelFilter {
            horizontal: Kernel::sobel_x(),
            vertical: Kernel::sobel_y(),
        }
    }
}

impl Filter for SobelFilter {
    fn name(&self) -> &'static str {
        "sobel"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(move |source, x, y| {
            let gx = convolve(source, &self.horizontal, x, y);
            let gy = convolve(source, &self.vertical, x, y);
            let magnitude = (0..3)
                .map(|c| gx[c] * gx[c] + gy[c] * gy[c])
                .sum::<f32>()
                .sqrt();
            let value = clamp_channel(magnitude as i32);
            Pixel::rgb(value, value, value)
        }))
    }
}

// ============================================================================
// Prewitt edge filter
// ============================================================================

/// Prewitt gradient magnitude, kept per channel (chromatic edges).
#[derive(Debug, Clone)]
pub struct PrewittFilter {
    horizontal: Kernel,
    vertical: Kernel,
}

impl Default for PrewittFilter {
    fn default() -> PrewittFilter {
        PrewittFilter {
            horizontal: Kernel::prewitt_x(),
            vertical: Kernel::prewitt_y(),
        }
    }
}

impl Filter for PrewittFilter {
    fn name(&self) -> &'static str {
        "prewitt"
    }

    fn execution(&self) -> Execution<'_> {
        Execution::PerPixel(Box::new(move |source, x, y| {
            let gx = convolve(source, &self.horizontal, x, y);
            let gy = convolve(source, &self.vertical, x, y);
            let channel = |c: usize| clamp_channel((gx[c] * gx[c] + gy[c] * gy[c]).sqrt() as i32);
            Pixel::rgb(channel(0), channel(1), channel(2))
        }))
    }
}
