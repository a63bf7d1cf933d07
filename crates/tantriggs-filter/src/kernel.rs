//! One-dimensional convolution kernels
//!
//! A [`Kernel`] holds `2 * radius + 1` weights centered on index `radius`.
//! Separable 2-D filters apply the same kernel along rows and then along
//! columns (see [`crate::convolve`]).

use crate::error::check_positive;
use crate::FilterResult;

/// A 1-D convolution kernel with odd length and a centered origin
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Half-width; the kernel has `2 * radius + 1` taps
    radius: u32,
    /// Weights, index `radius` is offset 0
    data: Vec<f64>,
}

impl Kernel {
    /// Create a normalized Gaussian kernel.
    ///
    /// For each offset `k` in `-radius..=radius` the raw weight is
    /// `exp(-k² / (2 sigma²))`; the weights are then scaled to sum to 1.
    /// `radius == 0` gives the identity kernel `[1.0]`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameter` if `sigma` is not finite and
    /// strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use tantriggs_filter::Kernel;
    ///
    /// let k = Kernel::gaussian(1.0, 2).unwrap();
    /// assert_eq!(k.len(), 5);
    /// assert!((k.sum() - 1.0).abs() < 1e-12);
    /// assert_eq!(k.get(-1), k.get(1));
    /// ```
    pub fn gaussian(sigma: f64, radius: u32) -> FilterResult<Self> {
        check_positive("sigma", sigma)?;

        let r = radius as i64;
        let denom = 2.0 * sigma * sigma;
        let mut data: Vec<f64> = (-r..=r)
            .map(|k| {
                let k = k as f64;
                (-(k * k) / denom).exp()
            })
            .collect();

        // The center weight is exp(0) = 1, so the sum is at least 1.
        let sum: f64 = data.iter().sum();
        for w in &mut data {
            *w /= sum;
        }

        Ok(Kernel { radius, data })
    }

    /// Half-width of the kernel
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of taps (`2 * radius + 1`)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a kernel has at least its center tap
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All weights, from offset `-radius` to `+radius`
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Weight at signed `offset` from the center, or `None` outside the
    /// kernel
    #[inline]
    pub fn get(&self, offset: i64) -> Option<f64> {
        let idx = offset + self.radius as i64;
        if idx < 0 {
            return None;
        }
        self.data.get(idx as usize).copied()
    }

    /// Sum of all weights
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;

    #[test]
    fn test_gaussian_symmetric_and_normalized() {
        let k = Kernel::gaussian(1.0, 2).unwrap();
        assert_eq!(k.len(), 5);
        assert_eq!(k.radius(), 2);
        assert!((k.sum() - 1.0).abs() < 1e-9);
        for i in 1..=2 {
            assert_eq!(k.get(-i), k.get(i));
        }
        // Peak at the center, decreasing outwards
        let d = k.data();
        assert!(d[2] > d[1] && d[1] > d[0]);
    }

    #[test]
    fn test_gaussian_weights() {
        let k = Kernel::gaussian(1.0, 1).unwrap();
        let e = (-0.5f64).exp();
        let total = 1.0 + 2.0 * e;
        assert!((k.get(0).unwrap() - 1.0 / total).abs() < 1e-15);
        assert!((k.get(1).unwrap() - e / total).abs() < 1e-15);
    }

    #[test]
    fn test_gaussian_radius_zero_is_identity() {
        let k = Kernel::gaussian(3.0, 0).unwrap();
        assert_eq!(k.data(), &[1.0]);
    }

    #[test]
    fn test_gaussian_out_of_range_offset() {
        let k = Kernel::gaussian(2.0, 3).unwrap();
        assert_eq!(k.get(4), None);
        assert_eq!(k.get(-4), None);
    }

    #[test]
    fn test_gaussian_invalid_sigma() {
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Kernel::gaussian(sigma, 2),
                Err(FilterError::InvalidParameter { name: "sigma", .. })
            ));
        }
    }
}
