//! Image - Floating-point grayscale image
//!
//! `Image` is a 2D array of `f64` samples. Every stage of the illumination
//! normalizer reads one or two `Image`s by reference and produces a new one,
//! so the type carries no interior mutability and is freely shared across
//! threads.
//!
//! # Examples
//!
//! ```
//! use tantriggs_core::Image;
//!
//! let mut img = Image::new(100, 80);
//! img.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(img.get_pixel(10, 20).unwrap(), 0.5);
//! assert_eq!(img.dimensions(), (100, 80));
//! ```

use crate::error::{Error, Result};
use crate::gray::GrayImage;

/// Floating-point grayscale image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
///
/// An image with zero width or height is representable; it holds no
/// samples and [`Image::is_empty`] returns `true`. Filters reject such
/// images with their own error.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f64>,
}

impl Image {
    /// Create a new image with all pixels set to zero
    pub fn new(width: u32, height: u32) -> Self {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new image with all pixels set to `value`
    ///
    /// # Examples
    ///
    /// ```
    /// use tantriggs_core::Image;
    ///
    /// let img = Image::new_with_value(3, 3, 100.0);
    /// assert!(img.data().iter().all(|&v| v == 100.0));
    /// ```
    pub fn new_with_value(width: u32, height: u32, value: f64) -> Self {
        let size = (width as usize) * (height as usize);
        Image {
            width,
            height,
            data: vec![value; size],
        }
    }

    /// Create an image from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Create an image whose pixel at (x, y) is `f(x, y)`
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> f64,
    {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Image {
            width,
            height,
            data,
        }
    }

    /// Create an image from an 8-bit grayscale image, one sample per byte
    pub fn from_gray(gray: &GrayImage) -> Self {
        Image {
            width: gray.width(),
            height: gray.height(),
            data: gray.data().iter().map(|&v| f64::from(v)).collect(),
        }
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples (`width * height`)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the image has zero width or zero height
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        let idx = self.checked_index(x, y)?;
        Ok(self.data[idx])
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Get the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f64 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f64) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(idx)
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable access to the pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f64] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Get a mutable row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f64] {
        let start = (y as usize) * (self.width as usize);
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Create an image with the same dimensions, zeroed data
    pub fn create_template(&self) -> Image {
        Image::new(self.width, self.height)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Apply `f` to every sample, returning a new image
    pub fn map<F>(&self, f: F) -> Image
    where
        F: Fn(f64) -> f64,
    {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Subtract `other` from this image element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn sub(&self, other: &Image) -> Result<Image> {
        self.check_same_size(other)?;

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        Ok(Image {
            width: self.width,
            height: self.height,
            data,
        })
    }

    fn check_same_size(&self, other: &Image) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Smallest sample, ignoring NaN. `None` for an empty image.
    pub fn min_value(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Largest sample, ignoring NaN. `None` for an empty image.
    pub fn max_value(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    // ========================================================================
    // Quantization
    // ========================================================================

    /// Quantize to 8 bits using the image's own value range
    ///
    /// The minimum sample maps to 0 and the maximum to 255, linearly in
    /// between; fractional results are truncated. A constant image (min ==
    /// max) maps every pixel to 0. The fixed theoretical output bound of a
    /// filter is deliberately not used: each image is stretched to its own
    /// observed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use tantriggs_core::Image;
    ///
    /// let img = Image::from_data(3, 1, vec![-2.0, 0.0, 2.0]).unwrap();
    /// assert_eq!(img.to_gray_scaled().data(), &[0, 127, 255]);
    /// ```
    pub fn to_gray_scaled(&self) -> GrayImage {
        let (min, max) = match (self.min_value(), self.max_value()) {
            (Some(min), Some(max)) => (min, max),
            _ => return GrayImage::new(self.width, self.height),
        };

        let range = max - min;
        if range <= 0.0 || !range.is_finite() {
            return GrayImage::new(self.width, self.height);
        }

        // The maximum is pinned to 255; the division alone can land just
        // below it and truncate to 254.
        let data = self
            .data
            .iter()
            .map(|&v| {
                if v >= max {
                    255
                } else {
                    ((v - min) * 255.0 / range).clamp(0.0, 255.0) as u8
                }
            })
            .collect();
        GrayImage::from_raw(self.width, self.height, data)
    }
}

// ============================================================================
// Tests
// ============================================================================
