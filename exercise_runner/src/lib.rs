// Shared plumbing for the exercise binaries: logging setup, window display, and the
// mapping from failures to process exit codes.

pub mod display;

use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status when the input image cannot be loaded (`-1` as seen by the shell).
pub const LOAD_FAILURE_EXIT: u8 = 255;

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("vision_exercises={log_level},exercise_runner={log_level},median_blur={log_level},rotation_match={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Exit code for a failed run.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let load_failure = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<vision_exercises::Error>())
        .any(vision_exercises::Error::is_load_failure);
    if load_failure {
        ExitCode::from(LOAD_FAILURE_EXIT)
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn load_failures_map_to_the_dedicated_exit_code() {
        let err: anyhow::Result<()> =
            Err(vision_exercises::Error::EmptyImage).context("Failed to run exercise");
        let code = exit_code_for(&err.unwrap_err());
        assert_eq!(code, ExitCode::from(LOAD_FAILURE_EXIT));
    }

    #[test]
    fn other_failures_map_to_generic_failure() {
        let err: anyhow::Result<()> =
            Err(vision_exercises::Error::EvenKernel { size: 2 }).context("Failed to run exercise");
        assert_eq!(exit_code_for(&err.unwrap_err()), ExitCode::FAILURE);
    }
}
