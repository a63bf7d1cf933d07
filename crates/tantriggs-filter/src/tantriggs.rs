//! Tan & Triggs illumination normalization pipeline
//!
//! Gamma compression, difference-of-Gaussians band-pass, then contrast
//! equalization. See X. Tan and B. Triggs, "Enhanced Local Texture Feature
//! Sets for Face Recognition Under Difficult Lighting Conditions", IEEE
//! Transactions on Image Processing, 2010.

use crate::dog::dog_filter;
use crate::equalize::equalize_contrast;
use crate::error::{check_nonempty, check_positive};
use crate::gamma::{check_gamma, gamma_compress};
use crate::FilterResult;
use tantriggs_core::Image;
use tracing::trace;

/// Parameters of the Tan & Triggs pipeline
///
/// The defaults are the values recommended in the paper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TanTriggsParams {
    /// Gamma exponent; 0 selects the log transform (default: 0.2)
    pub gamma: f64,
    /// Inner (fine) Gaussian sigma of the band-pass (default: 1.0)
    pub sigma0: f64,
    /// Outer (coarse) Gaussian sigma of the band-pass (default: 2.0)
    pub sigma1: f64,
    /// Kernel half-width shared by both Gaussians (default: 5)
    pub radius: u32,
    /// Saturation level of the final squashing (default: 10.0)
    pub threshold: f64,
    /// Exponent of the alpha-norms (default: 0.1)
    pub alpha: f64,
}

impl Default for TanTriggsParams {
    fn default() -> Self {
        Self {
            gamma: 0.2,
            sigma0: 1.0,
            sigma1: 2.0,
            radius: 5,
            threshold: 10.0,
            alpha: 0.1,
        }
    }
}

impl TanTriggsParams {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gamma exponent
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set both band-pass sigmas
    pub fn with_sigmas(mut self, sigma0: f64, sigma1: f64) -> Self {
        self.sigma0 = sigma0;
        self.sigma1 = sigma1;
        self
    }

    /// Set the kernel radius
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the saturation threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the alpha-norm exponent
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameter` naming the first offending
    /// field.
    pub fn validate(&self) -> FilterResult<()> {
        check_gamma(self.gamma)?;
        check_positive("sigma0", self.sigma0)?;
        check_positive("sigma1", self.sigma1)?;
        check_positive("threshold", self.threshold)?;
        check_positive("alpha", self.alpha)?;
        Ok(())
    }
}

/// Run the full Tan & Triggs normalization on `image`.
///
/// The input is left untouched; the result has the same dimensions and
/// every sample lies strictly inside `(-threshold, threshold)`.
///
/// # Errors
///
/// - `FilterError::InvalidParameter` if `params` fails
///   [`TanTriggsParams::validate`]
/// - `FilterError::EmptyImage` for an image with no pixels
///
/// # Examples
///
/// ```
/// use tantriggs_core::Image;
/// use tantriggs_filter::{TanTriggsParams, tan_triggs};
///
/// let img = Image::new_with_value(3, 3, 100.0);
/// let out = tan_triggs(&img, &TanTriggsParams::default()).unwrap();
/// assert!(out.data().iter().all(|&v| v == 0.0));
/// ```
pub fn tan_triggs(image: &Image, params: &TanTriggsParams) -> FilterResult<Image> {
    params.validate()?;
    check_nonempty(image)?;

    let compressed = gamma_compress(image, params.gamma)?;
    trace!(gamma = params.gamma, "gamma compression done");

    let banded = dog_filter(&compressed, params.sigma0, params.sigma1, params.radius)?;
    trace!(
        sigma0 = params.sigma0,
        sigma1 = params.sigma1,
        radius = params.radius,
        "band-pass done"
    );

    let out = equalize_contrast(&banded, params.alpha, params.threshold)?;
    trace!(
        alpha = params.alpha,
        threshold = params.threshold,
        "contrast equalization done"
    );

    Ok(out)
}

/// Alias of [`tan_triggs`]
pub fn normalize(image: &Image, params: &TanTriggsParams) -> FilterResult<Image> {
    tan_triggs(image, params)
}
