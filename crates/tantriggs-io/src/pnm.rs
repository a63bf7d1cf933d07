//! PNM (Portable Any Map) format support
//!
//! Reads binary PGM (P5, 8 or 16 bits per sample) and PPM (P6, reduced to
//! luminance); writes 8-bit P5. ASCII variants (P1/P2/P3), PBM and PAM are
//! not supported.

use crate::{IoError, IoResult, luminance};
use std::io::{Read, Write};
use tantriggs_core::{GrayImage, Image};

/// Parsed PNM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PnmHeader {
    channels: usize,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Cursor over the header bytes; skips whitespace and `#` comments.
struct HeaderParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl HeaderParser<'_> {
    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        self.skip_separators();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PNM header: bad {what}")))
    }
}

fn parse_header(data: &[u8]) -> IoResult<(PnmHeader, usize)> {
    let channels = match data.get(..2) {
        Some(b"P5") => 1,
        Some(b"P6") => 3,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "only binary PGM (P5) and PPM (P6) are supported".to_string(),
            ));
        }
    };

    let mut parser = HeaderParser { data, pos: 2 };
    let width = parser.next_u32("width")?;
    let height = parser.next_u32("height")?;
    let maxval = parser.next_u32("maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!(
            "PNM maxval {maxval} out of range 1..=65535"
        )));
    }

    // Exactly one whitespace byte separates the header from the raster.
    match data.get(parser.pos) {
        Some(b) if b.is_ascii_whitespace() => parser.pos += 1,
        _ => {
            return Err(IoError::InvalidData(
                "PNM header not terminated by whitespace".to_string(),
            ));
        }
    }

    Ok((
        PnmHeader {
            channels,
            width,
            height,
            maxval,
        },
        parser.pos,
    ))
}

/// Read a binary PGM/PPM image from a reader.
///
/// Samples keep their native range `0..=maxval`.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let (header, offset) = parse_header(&data)?;
    let bytes_per_sample = if header.maxval > 255 { 2 } else { 1 };
    let pixel_stride = header.channels * bytes_per_sample;
    let expected = (header.width as usize) * (header.height as usize) * pixel_stride;

    let raster = &data[offset..];
    if raster.len() < expected {
        return Err(IoError::InvalidData(format!(
            "PNM raster truncated: expected {} bytes, found {}",
            expected,
            raster.len()
        )));
    }

    let sample = |idx: usize| -> f64 {
        if bytes_per_sample == 2 {
            f64::from(u16::from_be_bytes([raster[idx], raster[idx + 1]]))
        } else {
            f64::from(raster[idx])
        }
    };

    let image = Image::from_fn(header.width, header.height, |x, y| {
        let idx = ((y as usize) * (header.width as usize) + x as usize) * pixel_stride;
        if header.channels == 1 {
            sample(idx)
        } else {
            luminance(
                sample(idx),
                sample(idx + bytes_per_sample),
                sample(idx + 2 * bytes_per_sample),
            )
        }
    });

    Ok(image)
}

/// Write an 8-bit grayscale image as binary PGM (P5).
pub fn write_pnm<W: Write>(gray: &GrayImage, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", gray.width(), gray.height())?;
    writer.write_all(gray.data())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pgm_roundtrip() {
        let data: Vec<u8> = (0..=255).collect();
        let gray = GrayImage::from_data(16, 16, data).unwrap();

        let mut buffer = Vec::new();
        write_pnm(&gray, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P5\n16 16\n255\n"));

        let image = read_pnm(Cursor::new(buffer)).unwrap();
        assert_eq!(image, Image::from_gray(&gray));
    }

    #[test]
    fn test_pgm_header_comments() {
        let mut data = b"P5 # produced by hand\n# second comment\n3\n1 255\n".to_vec();
        data.extend_from_slice(&[10, 20, 30]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(image.data(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_pgm_sixteen_bit() {
        let mut data = b"P5\n2 1\n65535\n".to_vec();
        data.extend_from_slice(&[0x12, 0x34, 0xFF, 0xFE]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(image.data(), &[f64::from(0x1234u16), 65534.0]);
    }

    #[test]
    fn test_ppm_luminance() {
        let mut data = b"P6\n1 1\n255\n".to_vec();
        data.extend_from_slice(&[0, 0, 200]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert!((image.get_pixel(0, 0).unwrap() - 0.114 * 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_pnm_truncated() {
        let mut data = b"P5\n4 4\n255\n".to_vec();
        data.extend_from_slice(&[0; 10]);
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_pnm_unsupported_variant() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P2\n1 1\n255\n0\n".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
