//! GrayImage - 8-bit grayscale image
//!
//! The quantized form of a normalized [`Image`](crate::Image), and the only
//! pixel type the encoders in `tantriggs-io` write.

use crate::error::{Error, Result};

/// 8-bit grayscale image, row-major with no padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayImage {
    /// Create a new image with all pixels set to zero
    pub fn new(width: u32, height: u32) -> Self {
        GrayImage {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Create an image from raw row-major bytes
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
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
        Ok(Self::from_raw(width, height, data))
    }

    /// Create an image whose pixel at (x, y) is `f(x, y)`
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> u8,
    {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::from_raw(width, height, data)
    }

    /// Length is checked by the caller.
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        GrayImage {
            width,
            height,
            data,
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

    /// `true` if the image has zero width or zero height
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel value at (x, y), or `None` if out of range
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Raw read-only data access
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_from_data() {
        let gray = GrayImage::from_data(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(gray.get_pixel(0, 1), Some(4));
        assert_eq!(gray.get_pixel(3, 0), None);
        assert_eq!(gray.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_gray_from_data_wrong_size() {
        assert!(GrayImage::from_data(3, 2, vec![0; 5]).is_err());
    }

    #[test]
    fn test_gray_from_fn() {
        let gray = GrayImage::from_fn(4, 2, |x, y| (x + 10 * y) as u8);
        assert_eq!(gray.data(), &[0, 1, 2, 3, 10, 11, 12, 13]);
    }
}
