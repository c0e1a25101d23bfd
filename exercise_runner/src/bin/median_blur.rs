//! Median filter exercise: library median blur next to a hand-written median filter.

use anyhow::{Context, Result};
use clap::Parser;
use exercise_runner::display::{Frame, Windows};
use exercise_runner::{exit_code_for, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use vision_exercises::core_modules::median::MedianRank;
use vision_exercises::{MedianDemo, MedianDemoConfig};

/// Compare a hand-written median filter with the library median blur.
#[derive(Parser, Debug)]
#[command(name = "median_blur")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT", default_value = "./img/in.jpg")]
    input: PathBuf,

    /// Write every result as PNG into this directory.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Width of the working copy; height keeps the aspect ratio.
    #[arg(long, default_value = "800", value_name = "INT")]
    width: u32,

    /// Use the statistical median instead of the element just above it.
    #[arg(long)]
    true_median: bool,

    /// Also open windows for the larger library kernels.
    #[arg(long)]
    show_all: bool,

    /// Exit without waiting for a key press.
    #[arg(long)]
    no_wait: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return exit_code_for(&err);
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = MedianDemoConfig {
        input_path: args.input.clone(),
        target_width: args.width,
        custom_rank: if args.true_median { MedianRank::Middle } else { MedianRank::Upper },
        output_dir: args.output_dir.clone(),
        ..MedianDemoConfig::default()
    };

    let report = MedianDemo::new(config)
        .run()
        .context("Failed to run median filter exercise")?;

    let mut windows = Windows::new();
    windows.show(
        &format!("out{:02}", report.unpadded_library_size),
        Frame::Gray(&report.library_unpadded),
    )?;
    windows.show(&format!("myout{:02}", report.custom_size), Frame::Gray(&report.custom))?;
    if args.show_all {
        for (size, image) in &report.library {
            windows.show(&format!("out{size:02}"), Frame::Gray(image))?;
        }
    }

    if !args.no_wait {
        windows.wait()?;
    }
    Ok(())
}
