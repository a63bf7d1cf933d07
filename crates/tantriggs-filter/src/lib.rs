//! tantriggs-filter - Illumination normalization filters
//!
//! This crate implements the preprocessing chain of Tan & Triggs on
//! floating-point [`Image`](tantriggs_core::Image)s:
//!
//! - **Kernels**: normalized 1-D Gaussian kernels ([`Kernel`])
//! - **Convolution**: separable blur with edge replication
//! - **Gamma**: power-law or log compression
//! - **Band-pass**: difference of Gaussians
//! - **Equalization**: two-stage alpha-norm rescaling and tanh squashing
//! - **Pipeline**: [`tan_triggs`], all of the above with [`TanTriggsParams`]
//!
//! Every function is pure: inputs are borrowed and a new image is returned.
//!
//! # Example
//!
//! ```
//! use tantriggs_core::Image;
//! use tantriggs_filter::{TanTriggsParams, tan_triggs};
//!
//! let img = Image::from_fn(16, 16, |x, y| ((x * y) % 200) as f64);
//! let out = tan_triggs(&img, &TanTriggsParams::default()).unwrap();
//! assert!(out.data().iter().all(|v| v.abs() < 10.0));
//! ```

pub mod convolve;
pub mod dog;
pub mod equalize;
mod error;
pub mod gamma;
pub mod kernel;
pub mod tantriggs;

pub use convolve::{blur_separable, convolve_cols, convolve_rows};
pub use dog::dog_filter;
pub use equalize::{alpha_norm, equalize_contrast, soft_clip};
pub use error::{FilterError, FilterResult};
pub use gamma::gamma_compress;
pub use kernel::Kernel;
pub use tantriggs::{TanTriggsParams, normalize, tan_triggs};
