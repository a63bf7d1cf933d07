//! Error types for tantriggs-filter
//!
//! Every stage validates its parameters and input before computing, so an
//! error never leaves a partial result behind.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tantriggs_core::Error),

    /// A parameter violates its documented range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the API
        name: &'static str,
        /// What is wrong with the value
        reason: String,
    },

    /// The input image has zero width or height
    #[error("empty image: {width}x{height}")]
    EmptyImage {
        /// Input width in pixels
        width: u32,
        /// Input height in pixels
        height: u32,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Reject `value` unless it is finite and strictly positive.
pub(crate) fn check_positive(name: &'static str, value: f64) -> FilterResult<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(FilterError::InvalidParameter {
        name,
        reason: format!("must be finite and > 0, got {value}"),
    })
}

/// Reject images with zero width or height.
pub(crate) fn check_nonempty(image: &tantriggs_core::Image) -> FilterResult<()> {
    if image.is_empty() {
        return Err(FilterError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}
