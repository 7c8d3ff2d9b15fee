//! Raster image type and shared pixel helpers.
//!
//! Images are stored as an ndarray `Array3<u8>` with shape
//! `(height, width, 4)` (RGBA). Filter arithmetic only reads and writes the
//! R, G, B channels; the alpha channel exists to carry the transparent
//! sentinel that geometric filters emit when a remapped coordinate falls
//! outside the source.

use ndarray::Array3;

/// Bound an integer to `[min, max]`.
///
/// Used pervasively to keep channel values and sample coordinates in range.
#[inline]
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp an integer channel value into the `u8` range.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    clamp(value, 0, 255) as u8
}

/// One RGBA pixel.
///
/// Filters produce opaque pixels; `TRANSPARENT` is the fallback sentinel for
/// geometric remapping, never an arithmetic input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black, emitted when a geometric filter maps a
    /// coordinate out of bounds.
    pub const TRANSPARENT: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque pixel from RGB channel values.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Pixel {
        Pixel { r, g, b, a: 255 }
    }

    /// Channel value by index (0 = R, 1 = G, 2 = B).
    #[inline]
    pub fn channel(&self, c: usize) -> u8 {
        match c {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }
}

/// A `width x height` RGBA raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Array3<u8>,
}

impl Image {
    /// A blank (transparent black) image.
    pub fn blank(width: usize, height: usize) -> Image {
        Image {
            data: Array3::<u8>::zeros((height, width, 4)),
        }
    }

    /// An image filled with one pixel value.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Image {
        let mut image = Image::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set_pixel(x, y, pixel);
            }
        }
        image
    }

    /// Build an image from a row-major pixel list.
    ///
    /// Panics if `pixels.len() != width * height`; intended for tests and
    /// for the decode boundary of the surrounding shell.
    pub fn from_pixels(width: usize, height: usize, pixels: &[Pixel]) -> Image {
        assert_eq!(pixels.len(), width * height, "pixel count mismatch");
        let mut image = Image::blank(width, height);
        for (i, &pixel) in pixels.iter().enumerate() {
            image.set_pixel(i % width, i / width, pixel);
        }
        image
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        Pixel {
            r: self.data[[y, x, 0]],
            g: self.data[[y, x, 1]],
            b: self.data[[y, x, 2]],
            a: self.data[[y, x, 3]],
        }
    }

    /// Pixel at a signed coordinate, clamped to the nearest edge coordinate.
    ///
    /// This is the edge-replicate boundary policy shared by the convolution,
    /// order-statistic, stochastic and morphology filters.
    #[inline]
    pub fn pixel_clamped(&self, x: i32, y: i32) -> Pixel {
        let cx = clamp(x, 0, self.width() as i32 - 1) as usize;
        let cy = clamp(y, 0, self.height() as i32 - 1) as usize;
        self.pixel(cx, cy)
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        self.data[[y, x, 0]] = pixel.r;
        self.data[[y, x, 1]] = pixel.g;
        self.data[[y, x, 2]] = pixel.b;
        self.data[[y, x, 3]] = pixel.a;
    }

    /// Raw RGBA array, shape `(height, width, 4)`.
    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clamp_within_range_is_identity() {
        for v in [0, 1, 127, 254, 255] {
            assert_eq!(clamp(v, 0, 255), v);
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        for v in [-500, -1, 0, 128, 255, 256, 9000] {
            let once = clamp(v, 0, 255);
            assert_eq!(clamp(once, 0, 255), once);
        }
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(-10, 0, 255), 0);
        assert_eq!(clamp(300, 0, 255), 255);
        assert_eq!(clamp_channel(-1), 0);
        assert_eq!(clamp_channel(256), 255);
    }

    #[test]
    fn test_blank_image_is_transparent() {
        let img = Image::blank(4, 3);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.pixel(0, 0), Pixel::TRANSPARENT);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut img = Image::blank(2, 2);
        img.set_pixel(1, 0, Pixel::rgb(10, 20, 30));
        assert_eq!(img.pixel(1, 0), Pixel::rgb(10, 20, 30));
        assert_eq!(img.pixel(0, 1), Pixel::TRANSPARENT);
    }

    #[test]
    fn test_pixel_clamped_replicates_edges() {
        let mut img = Image::blank(3, 3);
        img.set_pixel(0, 0, Pixel::rgb(1, 2, 3));
        img.set_pixel(2, 2, Pixel::rgb(7, 8, 9));

        assert_eq!(img.pixel_clamped(-5, -5), Pixel::rgb(1, 2, 3));
        assert_eq!(img.pixel_clamped(10, 10), Pixel::rgb(7, 8, 9));
        assert_eq!(img.pixel_clamped(1, 1), img.pixel(1, 1));
    }

    #[test]
    fn test_from_pixels_row_major() {
        let img = Image::from_pixels(
            2,
            2,
            &[
                Pixel::rgb(1, 1, 1),
                Pixel::rgb(2, 2, 2),
                Pixel::rgb(3, 3, 3),
                Pixel::rgb(4, 4, 4),
            ],
        );
        assert_eq!(img.pixel(1, 0), Pixel::rgb(2, 2, 2));
        assert_eq!(img.pixel(0, 1), Pixel::rgb(3, 3, 3));
    }
}
