//! Batch normalization of image lists
//!
//! Input images are named in list files, one path per line. Each image is
//! read, normalized with [`tan_triggs`], stretched to 8 bits by its own
//! min/max and written to `<output_dir>/<stem>.<ext>`. Files are processed
//! in order and the first failure aborts the batch.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tantriggs_core::GrayImage;
use tantriggs_filter::{FilterError, TanTriggsParams, tan_triggs};
use tantriggs_io::{ImageFormat, IoError, read_image, write_image};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised by the batch driver; each carries the offending path
#[derive(Debug, Error)]
pub enum BatchError {
    /// The pipeline parameters are out of range
    #[error("invalid parameters: {0}")]
    Params(#[source] FilterError),

    /// A list file could not be read
    #[error("cannot read file list {}: {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input image could not be decoded
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// Normalization failed for an input image
    #[error("cannot normalize {}: {source}", path.display())]
    Filter {
        path: PathBuf,
        #[source]
        source: FilterError,
    },

    /// An output image could not be written
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// The built-in self-test did not produce its output
    #[error("self-test failed: {0}")]
    SelfTest(String),
}

/// Result type for batch operations
pub type BatchResult<T> = Result<T, BatchError>;

/// Options of a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    /// Directory receiving the normalized images (default: `tantriggs`)
    pub output_dir: PathBuf,
    /// Requested output height; accepted but not applied (default: 64)
    pub out_height: u32,
    /// Requested output width; accepted but not applied (default: 80)
    pub out_width: u32,
    /// Pipeline parameters
    pub params: TanTriggsParams,
    /// Encoding of the written images (default: PNG)
    pub format: ImageFormat,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("tantriggs"),
            out_height: 64,
            out_width: 80,
            params: TanTriggsParams::default(),
            format: ImageFormat::Png,
        }
    }
}

/// Read image paths from a list, one per line.
///
/// Surrounding whitespace (including `\r`) is trimmed and blank lines are
/// skipped.
pub fn read_file_list<R: BufRead>(reader: R) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if !entry.is_empty() {
            paths.push(PathBuf::from(entry));
        }
    }
    Ok(paths)
}

/// Concatenate the entries of several list files.
///
/// A list named `-`, or an empty `lists` slice, reads standard input.
pub fn collect_inputs(lists: &[PathBuf]) -> BatchResult<Vec<PathBuf>> {
    let stdin = [PathBuf::from("-")];
    let lists = if lists.is_empty() { &stdin[..] } else { lists };

    let mut inputs = Vec::new();
    for list in lists {
        let entries = if list.as_os_str() == "-" {
            read_file_list(std::io::stdin().lock())
        } else {
            File::open(list).and_then(|f| read_file_list(BufReader::new(f)))
        }
        .map_err(|source| BatchError::List {
            path: list.clone(),
            source,
        })?;
        debug!(list = %list.display(), count = entries.len(), "read file list");
        inputs.extend(entries);
    }
    Ok(inputs)
}

/// Output path of `input`: `<dir>/<file stem>.<ext>`
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tantriggs::batch::output_path;
/// use tantriggs::io::ImageFormat;
///
/// let out = output_path(Path::new("out"), Path::new("/data/s01/face.v2.png"), ImageFormat::Pnm);
/// assert_eq!(out, Path::new("out/face.v2.pgm"));
/// ```
pub fn output_path(dir: &Path, input: &Path, format: ImageFormat) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(OsStr::new("image")).to_os_string();
    name.push(".");
    name.push(format.extension());
    dir.join(name)
}

/// Normalize one image file and write the result.
///
/// Returns the path of the written file.
pub fn process_file(input: &Path, options: &BatchOptions) -> BatchResult<PathBuf> {
    info!("Tan and Triggs: {}", input.display());

    let image = read_image(input).map_err(|source| BatchError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let normalized = tan_triggs(&image, &options.params).map_err(|source| BatchError::Filter {
        path: input.to_path_buf(),
        source,
    })?;

    let gray = normalized.to_gray_scaled();
    let output = output_path(&options.output_dir, input, options.format);
    write_image(&gray, &output, options.format).map_err(|source| BatchError::Write {
        path: output.clone(),
        source,
    })?;

    Ok(output)
}

/// Normalize every input in order.
///
/// The parameters are validated and the output directory is created before
/// the first file is touched. Processing stops at the first failing file.
pub fn run_batch(inputs: &[PathBuf], options: &BatchOptions) -> BatchResult<Vec<PathBuf>> {
    options.params.validate().map_err(BatchError::Params)?;
    debug!(
        output_dir = %options.output_dir.display(),
        out_height = options.out_height,
        out_width = options.out_width,
        params = ?options.params,
        format = ?options.format,
        "batch options"
    );

    fs::create_dir_all(&options.output_dir).map_err(|source| BatchError::OutputDir {
        path: options.output_dir.clone(),
        source,
    })?;

    inputs
        .iter()
        .map(|input| process_file(input, options))
        .collect()
}

/// 20x20 test pattern: rows of `10 * (y % 10) + x % 10` with a few zeroed
/// pixels on rows 3 and 13
pub fn self_test_pattern() -> GrayImage {
    GrayImage::from_fn(20, 20, |x, y| {
        if y % 10 == 3 && matches!(x % 10, 3 | 6) {
            0
        } else {
            (10 * (y % 10) + x % 10) as u8
        }
    })
}

/// Run the batch on a generated image inside a scratch directory.
///
/// The pattern from [`self_test_pattern`] is written together with a list
/// file naming it, the batch runs with `options` (its output directory is
/// replaced by one under the scratch directory) and the expected output
/// file is checked. The scratch directory is removed afterwards, whether
/// the test passed or not.
pub fn self_test(options: &BatchOptions) -> BatchResult<()> {
    let scratch = std::env::temp_dir().join(format!("tantriggs-self-test-{}", std::process::id()));
    let result = self_test_in(&scratch, options);
    if let Err(e) = fs::remove_dir_all(&scratch) {
        warn!("cannot remove {}: {}", scratch.display(), e);
    }
    result
}

fn self_test_in(scratch: &Path, options: &BatchOptions) -> BatchResult<()> {
    let options = BatchOptions {
        output_dir: scratch.join("tantriggs"),
        ..options.clone()
    };
    fs::create_dir_all(scratch).map_err(|source| BatchError::OutputDir {
        path: scratch.to_path_buf(),
        source,
    })?;

    let input = scratch.join(format!("input.{}", options.format.extension()));
    write_image(&self_test_pattern(), &input, options.format).map_err(|source| {
        BatchError::Write {
            path: input.clone(),
            source,
        }
    })?;

    let list = scratch.join("input.lst");
    fs::write(&list, format!("{}\n", input.display())).map_err(|source| BatchError::List {
        path: list.clone(),
        source,
    })?;

    let inputs = collect_inputs(std::slice::from_ref(&list))?;
    run_batch(&inputs, &options)?;

    let expected = output_path(&options.output_dir, &input, options.format);
    if !expected.is_file() {
        return Err(BatchError::SelfTest(format!(
            "{} was not produced",
            expected.display()
        )));
    }
    info!("self-test passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tantriggs_test_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_read_file_list_trims_and_skips_blanks() {
        let list = "  a.png \r\n\n\t\nsub/b.pgm\n   \nc.png";
        let paths = read_file_list(Cursor::new(list)).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("sub/b.pgm"),
                PathBuf::from("c.png")
            ]
        );
    }

    #[test]
    fn test_output_path() {
        let dir = Path::new("out");
        assert_eq!(
            output_path(dir, Path::new("/x/y/face.png"), ImageFormat::Png),
            Path::new("out/face.png")
        );
        assert_eq!(
            output_path(dir, Path::new("noext"), ImageFormat::Pnm),
            Path::new("out/noext.pgm")
        );
        assert_eq!(
            output_path(dir, Path::new("a.b.png"), ImageFormat::Png),
            Path::new("out/a.b.png")
        );
    }

    #[test]
    fn test_default_options() {
        let o = BatchOptions::default();
        assert_eq!(o.output_dir, PathBuf::from("tantriggs"));
        assert_eq!((o.out_height, o.out_width), (64, 80));
        assert_eq!(o.params, TanTriggsParams::default());
        assert_eq!(o.format, ImageFormat::Png);
    }

    #[test]
    fn test_self_test_pattern() {
        let p = self_test_pattern();
        assert_eq!(p.dimensions(), (20, 20));
        assert_eq!(p.get_pixel(0, 0), Some(0));
        assert_eq!(p.get_pixel(19, 9), Some(99));
        assert_eq!(p.get_pixel(3, 3), Some(0));
        assert_eq!(p.get_pixel(16, 13), Some(0));
        assert_eq!(p.get_pixel(4, 13), Some(34));
    }

    #[test]
    fn test_run_batch_writes_outputs() {
        let dir = scratch_dir("run_batch");
        let input = dir.join("face.pgm");
        write_image(&self_test_pattern(), &input, ImageFormat::Pnm).unwrap();

        let options = BatchOptions {
            output_dir: dir.join("out"),
            ..BatchOptions::default()
        };
        let outputs = run_batch(std::slice::from_ref(&input), &options).unwrap();
        assert_eq!(outputs, vec![dir.join("out").join("face.png")]);

        let written = read_image(&outputs[0]).unwrap();
        assert_eq!(written.dimensions(), (20, 20));
        assert_eq!(written.min_value(), Some(0.0));
        assert_eq!(written.max_value(), Some(255.0));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_batch_aborts_on_missing_file() {
        let dir = scratch_dir("abort");
        let good = dir.join("good.png");
        write_image(&self_test_pattern(), &good, ImageFormat::Png).unwrap();
        let missing = dir.join("missing.png");

        let options = BatchOptions {
            output_dir: dir.join("out"),
            ..BatchOptions::default()
        };
        let inputs = vec![missing.clone(), good];
        match run_batch(&inputs, &options) {
            Err(BatchError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Read error, got {other:?}"),
        }
        // Aborted before the second file
        assert!(!dir.join("out").join("good.png").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_batch_rejects_bad_params() {
        let dir = scratch_dir("bad_params");
        let options = BatchOptions {
            output_dir: dir.join("never"),
            params: TanTriggsParams::default().with_alpha(0.0),
            ..BatchOptions::default()
        };
        assert!(matches!(
            run_batch(&[], &options),
            Err(BatchError::Params(FilterError::InvalidParameter { name: "alpha", .. }))
        ));
        assert!(!dir.join("never").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_collect_inputs_missing_list() {
        let missing = PathBuf::from("/nonexistent/tantriggs/list.lst");
        assert!(matches!(
            collect_inputs(std::slice::from_ref(&missing)),
            Err(BatchError::List { .. })
        ));
    }
}
