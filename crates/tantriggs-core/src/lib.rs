//! tantriggs-core - Image containers for illumination normalization
//!
//! This crate provides the data structures shared by the other crates of
//! the workspace:
//!
//! - [`Image`] - Floating-point (`f64`) grayscale image, the working type
//!   of every filter stage
//! - [`GrayImage`] - 8-bit grayscale image, the quantized form handed to
//!   encoders
//!
//! Conversion between the two goes through [`Image::from_gray`] and the
//! min/max rescaling in [`Image::to_gray_scaled`].

pub mod error;
pub mod gray;
pub mod image;

pub use error::{Error, Result};
pub use gray::GrayImage;
pub use image::Image;
