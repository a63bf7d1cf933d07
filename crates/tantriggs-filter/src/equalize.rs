//! Contrast equalization
//!
//! Three passes over a single working buffer:
//!
//! 1. divide by the global alpha-norm `(mean |p|^alpha)^(1/alpha)`
//! 2. divide by the alpha-norm of the samples with `|p| < threshold`, so
//!    that a few large outliers do not set the scale
//! 3. squash every sample into `(-threshold, threshold)` with
//!    `threshold * tanh(p / threshold)`
//!
//! A norm of zero (or a pass-2 set with no samples) leaves the buffer as
//! it is instead of dividing; this is logged at debug level and is not an
//! error.

use crate::error::{check_nonempty, check_positive};
use crate::FilterResult;
use tantriggs_core::Image;
use tracing::debug;

/// Alpha-norm `(mean |v|^alpha)^(1/alpha)` of a set of values.
///
/// Returns `None` for an empty set.
///
/// # Examples
///
/// ```
/// use tantriggs_filter::alpha_norm;
///
/// let n = alpha_norm([2.0, -2.0, 2.0], 0.5).unwrap();
/// assert!((n - 2.0).abs() < 1e-12);
/// assert_eq!(alpha_norm(std::iter::empty(), 0.1), None);
/// ```
pub fn alpha_norm<I>(values: I, alpha: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v.abs().powf(alpha), count + 1));
    if count == 0 {
        return None;
    }
    Some((sum / count as f64).powf(1.0 / alpha))
}

/// Soft clip `x` into the open interval `(-threshold, threshold)`.
///
/// Computes `threshold * tanh(x / threshold)`. In double precision `tanh`
/// reaches exactly ±1 for large arguments, so the result is clamped to the
/// largest value strictly below `threshold` in magnitude. The mapping is
/// odd and non-decreasing.
pub fn soft_clip(x: f64, threshold: f64) -> f64 {
    let bound = below(threshold);
    (threshold * (x / threshold).tanh()).clamp(-bound, bound)
}

/// Largest `f64` strictly less than a positive finite `t`.
fn below(t: f64) -> f64 {
    f64::from_bits(t.to_bits() - 1)
}

/// Equalize the contrast of a band-passed image.
///
/// Every output sample lies strictly inside `(-threshold, threshold)`. An
/// all-zero input stays all zero.
///
/// # Errors
///
/// - `FilterError::InvalidParameter` if `alpha` or `threshold` is not
///   finite and positive
/// - `FilterError::EmptyImage` for an image with no pixels
pub fn equalize_contrast(image: &Image, alpha: f64, threshold: f64) -> FilterResult<Image> {
    check_positive("alpha", alpha)?;
    check_positive("threshold", threshold)?;
    check_nonempty(image)?;

    let mut out = image.clone();
    let data = out.data_mut();

    // Pass 1: global norm
    match alpha_norm(data.iter().copied(), alpha) {
        Some(norm) if norm != 0.0 => data.iter_mut().for_each(|p| *p /= norm),
        _ => {
            debug!("equalize: global alpha-norm is zero, image set to zero");
            data.fill(0.0);
        }
    }

    // Pass 2: norm over the samples below the threshold
    let inliers = data.iter().map(|p| p.abs()).filter(|&p| p < threshold);
    match alpha_norm(inliers, alpha) {
        Some(norm) if norm != 0.0 => data.iter_mut().for_each(|p| *p /= norm),
        Some(_) => debug!("equalize: trimmed alpha-norm is zero, division skipped"),
        None => debug!("equalize: no sample below threshold {threshold}, division skipped"),
    }

    // Pass 3: tanh squashing
    data.iter_mut().for_each(|p| *p = soft_clip(*p, threshold));

    Ok(out)
}
