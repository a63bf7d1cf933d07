//! PNG image format support
//!
//! Decoding accepts every PNG color type. Palette and low-bit-depth images
//! are expanded by the decoder; color is reduced to luminance and alpha is
//! dropped. Samples keep their native range (0..=255 for 8-bit, 0..=65535
//! for 16-bit). Encoding always writes 8-bit grayscale.

use crate::{IoError, IoResult, luminance};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use tantriggs_core::{GrayImage, Image};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    let bytes_per_sample = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG bit depth after expansion: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let pixel_stride = channels * bytes_per_sample;

    let sample = |idx: usize| -> f64 {
        if bytes_per_sample == 2 {
            f64::from(u16::from_be_bytes([data[idx], data[idx + 1]]))
        } else {
            f64::from(data[idx])
        }
    };

    let mut image = Image::new(width, height);
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        let row = image.row_mut(y);
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * pixel_stride;
            *out = match channels {
                1 | 2 => sample(idx),
                _ => luminance(
                    sample(idx),
                    sample(idx + bytes_per_sample),
                    sample(idx + 2 * bytes_per_sample),
                ),
            };
        }
    }

    Ok(image)
}

/// Write an 8-bit grayscale PNG image
pub fn write_png<W: Write>(gray: &GrayImage, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, gray.width(), gray.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(gray.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
