//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use std::fs;
use std::path::Path;
use tantriggs_core::{GrayImage, Image};
use tantriggs_io::ImageFormat;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of one regression test: its name, the index of the
/// current check, the mode, and every failure recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "equalize")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`. A NaN on either
    /// side is always a mismatch.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if within(expected, actual, delta) {
            return true;
        }
        let diff = (expected - actual).abs();
        let msg = format!(
            "Failure in {}_reg: value comparison for index {}\n\
             difference = {} but allowed delta = {}\n\
             expected = {}, actual = {}",
            self.test_name, self.index, diff, delta, expected, actual
        );
        self.record_failure(msg);
        false
    }

    /// Record a boolean condition as a check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.record_failure(msg);
        }
        condition
    }

    /// Compare two floating-point images sample by sample
    ///
    /// Dimensions must match exactly; each sample may differ by at most
    /// `delta`.
    pub fn compare_images(&mut self, expected: &Image, actual: &Image, delta: f64) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            );
            self.record_failure(msg);
            return false;
        }

        let width = expected.width() as usize;
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(&e, &a)| !within(e, a, delta));

        if let Some(i) = mismatch {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - sample mismatch at ({}, {}): \
                 expected {}, actual {}, allowed delta {}",
                self.test_name,
                self.index,
                i % width,
                i / width,
                expected.data()[i],
                actual.data()[i],
                delta
            );
            self.record_failure(msg);
            return false;
        }

        true
    }

    /// Compare two 8-bit images for exact equality
    pub fn compare_gray(&mut self, gray1: &GrayImage, gray2: &GrayImage) -> bool {
        self.index += 1;

        if gray1 != gray2 {
            let msg = format!(
                "Failure in {}_reg: gray comparison for index {} ({:?} vs {:?})",
                self.test_name,
                self.index,
                gray1.dimensions(),
                gray2.dimensions()
            );
            self.record_failure(msg);
            return false;
        }
        true
    }

    /// Compare two binary data arrays
    pub fn compare_bytes(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.record_failure(msg);
            return false;
        }
        true
    }

    /// Write an 8-bit image to the regout directory and check it against
    /// its golden file
    ///
    /// In compare mode a missing golden file is a failure; create it with
    /// `REGTEST_MODE=generate`.
    pub fn write_gray_and_check(&mut self, gray: &GrayImage, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        tantriggs_io::write_image(gray, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    let msg = format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    );
                    self.record_failure(msg);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !Self::same_pixels(local_path, &golden_path)? {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.record_failure(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Compare two image files by decoded pixel values
    fn same_pixels(path1: &str, path2: &str) -> TestResult<bool> {
        let read = |path: &str| {
            tantriggs_io::read_image(path).map_err(|e| TestError::ImageRead {
                path: path.to_string(),
                message: e.to_string(),
            })
        };
        Ok(read(path1)? == read(path2)?)
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// NaN on either side is never within tolerance.
fn within(expected: f64, actual: f64, delta: f64) -> bool {
    (expected - actual).abs() <= delta
}
