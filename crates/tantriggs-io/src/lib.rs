//! tantriggs-io - Image I/O
//!
//! Decodes input files into floating-point [`Image`]s and encodes quantized
//! [`GrayImage`]s. Supported formats:
//!
//! - PNG (read: every color type, write: 8-bit grayscale)
//! - PNM (read: binary PGM/PPM, write: 8-bit PGM)
//!
//! Color input is reduced to luminance with the Rec. 601 weights
//! `0.299 R + 0.587 G + 0.114 B`.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;
use tantriggs_core::{GrayImage, Image};

/// Rec. 601 luma of one RGB sample
#[inline]
pub(crate) fn luminance(r: f64, g: f64, b: f64) -> f64 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Read an image file, detecting its format from the header
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

/// Read an image held in memory, detecting its format from the header
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<Image>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an 8-bit image to a file in the given format
pub fn write_image<P: AsRef<Path>>(gray: &GrayImage, path: P, format: ImageFormat) -> IoResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(gray, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(gray, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Encode an 8-bit image into a byte vector
pub fn write_image_mem(gray: &GrayImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(gray, &mut buffer)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(gray, &mut buffer)?,
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )));
        }
    }
    Ok(buffer)
}
