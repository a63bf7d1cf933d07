//! Separable convolution
//!
//! Borders are handled by edge replication: a coordinate outside the image
//! is clamped to the nearest valid row or column.
//!
//! Each output sample is accumulated as
//! `center + Σ w[k] * (sample[k] - center)`. For a kernel whose weights sum
//! to 1 this is the ordinary weighted sum, but flat regions come out exactly
//! equal to their input instead of picking up rounding noise.

use crate::error::check_nonempty;
use crate::{FilterResult, Kernel};
use tantriggs_core::Image;

/// Convolve one line of samples with `kernel`, clamping at both ends.
fn convolve_line(src: &[f64], dst: &mut [f64], kernel: &Kernel) {
    let n = src.len() as i64;
    let r = kernel.radius() as i64;
    let weights = kernel.data();

    for (i, out) in dst.iter_mut().enumerate() {
        let i = i as i64;
        let center = src[i as usize];
        let mut acc = 0.0;
        for (k, &w) in weights.iter().enumerate() {
            let s = (i + k as i64 - r).clamp(0, n - 1) as usize;
            acc += w * (src[s] - center);
        }
        *out = center + acc;
    }
}

/// Convolve every row of `image` with `kernel`.
pub fn convolve_rows(image: &Image, kernel: &Kernel) -> FilterResult<Image> {
    check_nonempty(image)?;

    let mut out = image.create_template();
    for y in 0..image.height() {
        convolve_line(image.row(y), out.row_mut(y), kernel);
    }
    Ok(out)
}

/// Convolve every column of `image` with `kernel`.
pub fn convolve_cols(image: &Image, kernel: &Kernel) -> FilterResult<Image> {
    check_nonempty(image)?;

    let (w, h) = image.dimensions();
    let mut out = image.create_template();
    let mut column = vec![0.0; h as usize];
    let mut result = vec![0.0; h as usize];

    for x in 0..w {
        for (y, v) in column.iter_mut().enumerate() {
            *v = image.get_pixel_unchecked(x, y as u32);
        }
        convolve_line(&column, &mut result, kernel);
        for (y, &v) in result.iter().enumerate() {
            out.set_pixel_unchecked(x, y as u32, v);
        }
    }
    Ok(out)
}

/// Blur `image` with `kernel` along rows, then along columns.
///
/// The output has the same dimensions as the input.
///
/// # Errors
///
/// Returns `FilterError::EmptyImage` for an image with no pixels.
///
/// # Examples
///
/// ```
/// use tantriggs_core::Image;
/// use tantriggs_filter::{Kernel, blur_separable};
///
/// let flat = Image::new_with_value(4, 3, 7.5);
/// let kernel = Kernel::gaussian(2.0, 5).unwrap();
/// assert_eq!(blur_separable(&flat, &kernel).unwrap(), flat);
/// ```
pub fn blur_separable(image: &Image, kernel: &Kernel) -> FilterResult<Image> {
    let tmp = convolve_rows(image, kernel)?;
    convolve_cols(&tmp, kernel)
}
