//! Tan & Triggs - Illumination normalization for Rust
//!
//! Implements the preprocessing chain of X. Tan and B. Triggs for face
//! recognition under difficult lighting:
//!
//! - Gamma compression
//! - Difference-of-Gaussians band-pass filtering
//! - Contrast equalization with tanh squashing
//!
//! plus image I/O and a batch driver that normalizes lists of files.
//!
//! # Example
//!
//! ```
//! use tantriggs::Image;
//! use tantriggs::filter::{TanTriggsParams, tan_triggs};
//!
//! let img = Image::new_with_value(3, 3, 100.0);
//! let out = tan_triggs(&img, &TanTriggsParams::default()).unwrap();
//! assert_eq!(out.dimensions(), (3, 3));
//! assert!(out.data().iter().all(|&v| v == 0.0));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use tantriggs_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use tantriggs_filter as filter;
pub use tantriggs_io as io;

pub mod batch;
