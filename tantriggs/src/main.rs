//! `tantriggs` CLI - Normalize the illumination of face images.
//!
//! Reads one or more list files (one image path per line, `-` for stdin),
//! runs the Tan & Triggs pipeline on every listed image and prints the path
//! of each written file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tantriggs::batch::{self, BatchOptions};
use tantriggs::filter::TanTriggsParams;
use tantriggs::io::ImageFormat;

/// Tan and Triggs illumination normalization.
#[derive(Parser, Debug)]
#[command(name = "tantriggs")]
#[command(version, about, long_about = None)]
struct Args {
    /// List files naming the input images; stdin when omitted.
    #[arg(value_name = "LIST")]
    lists: Vec<PathBuf>,

    /// Output directory.
    #[arg(short, long, default_value = "tantriggs", value_name = "DIR")]
    output_dir: PathBuf,

    /// Output height (currently not applied).
    #[arg(short = 'f', long = "out-h", default_value = "64", value_name = "INT")]
    out_h: u32,

    /// Output width (currently not applied).
    #[arg(short = 'w', long = "out-w", alias = "out_w", default_value = "80", value_name = "INT")]
    out_w: u32,

    /// Gamma exponent; 0 selects log compression.
    #[arg(short, long, default_value = "0.2", value_name = "FLOAT")]
    gamma: f64,

    /// Inner Gaussian sigma of the band-pass.
    #[arg(short, long, default_value = "1.0", value_name = "FLOAT")]
    sigma0: f64,

    /// Outer Gaussian sigma of the band-pass.
    #[arg(short = 'u', long, default_value = "2.0", value_name = "FLOAT")]
    sigma1: f64,

    /// Gaussian kernel radius.
    #[arg(short = 'v', long = "size", default_value = "5", value_name = "INT")]
    radius: u32,

    /// Saturation threshold of the contrast equalization.
    #[arg(short, long, default_value = "10.0", value_name = "FLOAT")]
    threshold: f64,

    /// Alpha-norm exponent of the contrast equalization.
    #[arg(short, long, default_value = "0.1", value_name = "FLOAT")]
    alpha: f64,

    /// Output image format.
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Run the built-in self-test instead of processing lists.
    #[arg(long, hide = true)]
    self_test: bool,

    /// Enable verbose output.
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Pgm,
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => ImageFormat::Png,
            Format::Pgm => ImageFormat::Pnm,
        }
    }
}

impl Args {
    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            output_dir: self.output_dir.clone(),
            out_height: self.out_h,
            out_width: self.out_w,
            params: TanTriggsParams::new()
                .with_gamma(self.gamma)
                .with_sigmas(self.sigma0, self.sigma1)
                .with_radius(self.radius)
                .with_threshold(self.threshold)
                .with_alpha(self.alpha),
            format: self.format.into(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tantriggs={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let options = args.batch_options();

    if args.self_test {
        return batch::self_test(&options).context("Self-test failed");
    }

    let inputs = batch::collect_inputs(&args.lists).context("Failed to read input lists")?;
    let outputs = batch::run_batch(&inputs, &options).context("Failed to process images")?;
    for output in outputs {
        println!("{}", output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["tantriggs"]).unwrap();
        assert!(args.lists.is_empty());
        assert_eq!(args.batch_options(), BatchOptions::default());
        assert!(!args.self_test);
    }

    #[test]
    fn test_cli_short_flags() {
        let args = Args::try_parse_from([
            "tantriggs", "-o", "out", "-f", "32", "-w", "40", "-g", "0", "-s", "0.5", "-u",
            "3", "-v", "7", "-t", "5", "-a", "0.2", "--format", "pgm", "list.lst",
        ])
        .unwrap();
        let options = args.batch_options();
        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert_eq!((options.out_height, options.out_width), (32, 40));
        assert_eq!(
            options.params,
            TanTriggsParams {
                gamma: 0.0,
                sigma0: 0.5,
                sigma1: 3.0,
                radius: 7,
                threshold: 5.0,
                alpha: 0.2,
            }
        );
        assert_eq!(options.format, ImageFormat::Pnm);
        assert_eq!(args.lists, vec![PathBuf::from("list.lst")]);
    }

    #[test]
    fn test_cli_out_w_alias() {
        let args = Args::try_parse_from(["tantriggs", "--out_w", "100", "--self-test"]).unwrap();
        assert_eq!(args.out_w, 100);
        assert!(args.self_test);
    }

    #[test]
    fn test_cli_rejects_negative_radius() {
        assert!(Args::try_parse_from(["tantriggs", "-v", "-1"]).is_err());
    }
}
