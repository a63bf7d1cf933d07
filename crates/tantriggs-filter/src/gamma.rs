//! Gamma compression
//!
//! Compresses the dynamic range of the input so that bright regions no
//! longer dominate the later band-pass and normalization stages.

use crate::error::check_nonempty;
use crate::{FilterError, FilterResult};
use tantriggs_core::Image;

/// Apply gamma compression elementwise.
///
/// Negative samples are treated as 0. For `gamma > 0` each sample becomes
/// `p^gamma`; `gamma == 0` selects the log transform `ln(p + 1)`.
///
/// # Errors
///
/// - `FilterError::InvalidParameter` if `gamma` is negative or not finite
/// - `FilterError::EmptyImage` for an image with no pixels
pub fn gamma_compress(image: &Image, gamma: f64) -> FilterResult<Image> {
    check_gamma(gamma)?;
    check_nonempty(image)?;

    let out = if gamma == 0.0 {
        image.map(|p| p.max(0.0).ln_1p())
    } else {
        image.map(|p| p.max(0.0).powf(gamma))
    };
    Ok(out)
}

pub(crate) fn check_gamma(gamma: f64) -> FilterResult<()> {
    if gamma.is_finite() && gamma >= 0.0 {
        return Ok(());
    }
    Err(FilterError::InvalidParameter {
        name: "gamma",
        reason: format!("must be finite and >= 0, got {gamma}"),
    })
}
