//! tantriggs-test - Regression test framework
//!
//! Collects numeric and image comparisons for one regression test, keeps
//! going after a mismatch so that every failure is reported, and decides
//! pass/fail in [`RegParams::cleanup`]. Three modes are supported:
//!
//! - **Generate**: Write golden files for later comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run tests without file comparison
//!
//! # Usage
//!
//! ```ignore
//! use tantriggs_test::RegParams;
//!
//! let mut rp = RegParams::new("equalize");
//! rp.compare_values(0.0, max_abs, 1e-12);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // tantriggs-test is at crates/tantriggs-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
