//! Rotation matching exercise: find a template at every rotation angle in a scene built
//! from rotated copies of itself.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use exercise_runner::display::{Frame, Windows};
use exercise_runner::{exit_code_for, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use vision_exercises::core_modules::correlation::MatchMethod;
use vision_exercises::{RotationDemo, RotationMatchConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Normalized correlation coefficient (mean removed).
    Coefficient,
    /// Normalized cross-correlation.
    Cross,
}

impl From<Method> for MatchMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Coefficient => MatchMethod::CorrelationCoefficientNormed,
            Method::Cross => MatchMethod::CrossCorrelationNormed,
        }
    }
}

/// Locate a template at every rotation angle in a synthesized scene.
#[derive(Parser, Debug)]
#[command(name = "rotation_match")]
#[command(version, about, long_about = None)]
struct Args {
    /// Template image path.
    #[arg(value_name = "TEMPLATE", default_value = "../img/kadai8/template.png")]
    template: PathBuf,

    /// Where to write the synthesized scene.
    #[arg(long, default_value = "../img/kadai8/in.png", value_name = "PATH")]
    scene_output: PathBuf,

    /// Where to write the annotated result.
    #[arg(long, default_value = "../img/kadai8/out.png", value_name = "PATH")]
    result_output: PathBuf,

    /// Do not write any output files.
    #[arg(long)]
    no_write: bool,

    /// Scoring method.
    #[arg(long, value_enum, default_value_t = Method::Coefficient)]
    method: Method,

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
    let config = RotationMatchConfig {
        template_path: args.template.clone(),
        scene_output: args.scene_output.clone(),
        result_output: args.result_output.clone(),
        write_outputs: !args.no_write,
        method: args.method.into(),
        ..RotationMatchConfig::default()
    };

    let report = RotationDemo::new(config)
        .run()
        .context("Failed to run rotation matching exercise")?;

    for d in &report.detections {
        info!(
            angle = d.angle_degrees,
            x = d.location.0,
            y = d.location.1,
            score = d.score,
            "detection"
        );
    }

    let mut windows = Windows::new();
    windows.show("src_img", Frame::Gray(&report.template))?;
    windows.show("input_img", Frame::Gray(&report.synthesized))?;
    windows.show("out_img", Frame::Rgb(&report.annotated))?;

    if !args.no_wait {
        windows.wait()?;
    }
    Ok(())
}
