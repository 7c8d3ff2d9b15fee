//! Convolution kernels and their builders.
//!
//! A kernel is an immutable 2D array of real-valued weights with odd extents
//! along both axes, so the center weight aligns with the sampled pixel.
//! Kernels are produced by pure builder functions; construction from an
//! arbitrary array validates the extents.
//!
//! Gaussian kernels are normalized to sum 1. The fixed kernels (sharpen,
//! motion blur, emboss, Sobel, Prewitt) are not; range safety comes from
//! clamping the final channel value downstream.

use ndarray::{array, Array2};

use crate::error::FilterError;

/// A 2D weight matrix with odd extents, indexed by signed offsets from the
/// center.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    // (height, width), row-major: weights[[ky + radius_y, kx + radius_x]]
    weights: Array2<f32>,
}

impl Kernel {
    /// Wrap a weight matrix, rejecting even (or zero) extents.
    pub fn new(weights: Array2<f32>) -> Result<Kernel, FilterError> {
        let (height, width) = weights.dim();
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::EvenKernel { width, height });
        }
        Ok(Kernel { weights })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.weights.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.weights.dim().0
    }

    /// Horizontal radius `(width - 1) / 2`.
    #[inline]
    pub fn radius_x(&self) -> i32 {
        (self.width() as i32 - 1) / 2
    }

    /// Vertical radius `(height - 1) / 2`.
    #[inline]
    pub fn radius_y(&self) -> i32 {
        (self.height() as i32 - 1) / 2
    }

    /// Weight at signed offset `(kx, ky)` from the center.
    #[inline]
    pub fn weight(&self, kx: i32, ky: i32) -> f32 {
        self.weights[[(ky + self.radius_y()) as usize, (kx + self.radius_x()) as usize]]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.sum()
    }

    // ========================================================================
    // Fixed kernels
    // ========================================================================

    /// 3x3 box blur: uniform `1/9`.
    pub fn box_blur() -> Kernel {
        Kernel {
            weights: Array2::from_elem((3, 3), 1.0 / 9.0),
        }
    }

    /// 3x3 sharpen: center `9`, all other cells `-1`.
    pub fn sharpen() -> Kernel {
        let mut weights = Array2::from_elem((3, 3), -1.0);
        weights[[1, 1]] = 9.0;
        Kernel { weights }
    }

    /// 9x9 motion blur: `1/9` along the main diagonal, zero elsewhere.
    pub fn motion_blur() -> Kernel {
        let mut weights = Array2::<f32>::zeros((9, 9));
        for i in 0..9 {
            weights[[i, i]] = 1.0 / 9.0;
        }
        Kernel { weights }
    }

    /// 3x3 emboss cross `{0,1,0; 1,0,-1; 0,-1,0}`.
    ///
    /// Convolved output needs a `+128` bias to center around mid-gray; the
    /// emboss filter applies that bias after the convolution.
    pub fn emboss() -> Kernel {
        Kernel {
            weights: array![[0.0, 1.0, 0.0], [1.0, 0.0, -1.0], [0.0, -1.0, 0.0]],
        }
    }

    /// Conventional Sobel horizontal-gradient kernel.
    pub fn sobel_x() -> Kernel {
        Kernel {
            weights: array![[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]],
        }
    }

    /// Conventional Sobel vertical-gradient kernel.
    pub fn sobel_y() -> Kernel {
        Kernel {
            weights: array![[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]],
        }
    }

    /// Prewitt horizontal-gradient kernel.
    pub fn prewitt_x() -> Kernel {
        Kernel {
            weights: array![[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]],
        }
    }

    /// Prewitt vertical-gradient kernel.
    pub fn prewitt_y() -> Kernel {
        Kernel {
            weights: array![[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
        }
    }

    // ========================================================================
    // Generated kernels
    // ========================================================================

    /// Gaussian kernel of extent `2 * radius + 1` with spread `sigma`.
    ///
    /// Weight at offset `(i, j)` is `exp(-(i^2 + j^2) / (2 sigma^2))`; the
    /// filled kernel is normalized so the weights sum to 1.
    pub fn gaussian(radius: usize, sigma: f32) -> Result<Kernel, FilterError> {
        if sigma <= 0.0 {
            return Err(FilterError::InvalidSigma(sigma));
        }

        let size = 2 * radius + 1;
        let r = radius as i32;
        let mut weights = Array2::<f32>::zeros((size, size));
        let mut norm = 0.0f32;

        for j in -r..=r {
            for i in -r..=r {
                let w = (-((i * i + j * j) as f32) / (2.0 * sigma * sigma)).exp();
                weights[[(j + r) as usize, (i + r) as usize]] = w;
                norm += w;
            }
        }
        weights.mapv_inplace(|w| w / norm);

        Ok(Kernel { weights })
    }
}
