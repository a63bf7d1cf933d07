//! Difference-of-Gaussians band-pass filter

use crate::convolve::blur_separable;
use crate::error::check_nonempty;
use crate::{FilterError, FilterResult, Kernel};
use tantriggs_core::Image;

/// Band-pass `image` by subtracting a `sigma1` blur from a `sigma0` blur.
///
/// Both Gaussian kernels share the same `radius`. Neither sigma order is
/// enforced; with `sigma0 > sigma1` the response is simply negated.
///
/// A constant image produces exactly zero everywhere.
///
/// # Errors
///
/// - `FilterError::InvalidParameter` if either sigma is not finite and
///   positive
/// - `FilterError::EmptyImage` for an image with no pixels
pub fn dog_filter(image: &Image, sigma0: f64, sigma1: f64, radius: u32) -> FilterResult<Image> {
    let fine = Kernel::gaussian(sigma0, radius).map_err(|e| rename_sigma(e, "sigma0"))?;
    let coarse = Kernel::gaussian(sigma1, radius).map_err(|e| rename_sigma(e, "sigma1"))?;
    check_nonempty(image)?;

    let low = blur_separable(image, &fine)?;
    let high = blur_separable(image, &coarse)?;
    Ok(low.sub(&high)?)
}

/// Report a kernel sigma error under the band-pass parameter name.
fn rename_sigma(err: FilterError, name: &'static str) -> FilterError {
    match err {
        FilterError::InvalidParameter { reason, .. } => FilterError::InvalidParameter { name, reason },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dog_constant_is_zero() {
        let img = Image::new_with_value(7, 5, 2.511_886_431_509_58);
        let out = dog_filter(&img, 1.0, 2.0, 5).unwrap();
        assert!(out.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dog_equal_sigmas_is_zero() {
        let img = Image::from_fn(6, 6, |x, y| ((x * y) % 4) as f64);
        let out = dog_filter(&img, 1.5, 1.5, 3).unwrap();
        assert!(out.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dog_swapped_sigmas_negate() {
        let img = Image::from_fn(8, 8, |x, y| ((x + 2 * y) % 5) as f64);
        let a = dog_filter(&img, 1.0, 2.0, 4).unwrap();
        let b = dog_filter(&img, 2.0, 1.0, 4).unwrap();
        for (&p, &q) in a.data().iter().zip(b.data()) {
            assert_eq!(p, -q);
        }
    }

    #[test]
    fn test_dog_impulse_center_positive() {
        let img = Image::from_fn(11, 11, |x, y| if x == 5 && y == 5 { 1.0 } else { 0.0 });
        let out = dog_filter(&img, 1.0, 2.0, 5).unwrap();
        assert!(out.get_pixel(5, 5).unwrap() > 0.0);
        assert!(out.get_pixel(5, 8).unwrap() < 0.0);
    }

    #[test]
    fn test_dog_invalid_sigma_names() {
        let img = Image::new_with_value(3, 3, 1.0);
        assert!(matches!(
            dog_filter(&img, 0.0, 2.0, 2),
            Err(FilterError::InvalidParameter { name: "sigma0", .. })
        ));
        assert!(matches!(
            dog_filter(&img, 1.0, -2.0, 2),
            Err(FilterError::InvalidParameter { name: "sigma1", .. })
        ));
    }
}
