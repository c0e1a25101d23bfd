// THEORY:
// This file is the main entry point for the `vision_exercises` library crate.
//
// It exports two small, self-contained image-processing exercises and the building
// blocks they are made of:
//
// - `median_pipeline`: a hand-written median filter shown next to the library median
//   blur at several kernel sizes.
// - `rotation_pipeline`: a scene built from rotated copies of a template, searched with
//   normalized correlation at each rotation angle.
//
// The building blocks live in `core_modules`. Only the median filter there is written
// out pixel by pixel; the rest are thin wrappers over `image` and `imageproc`.

pub mod core_modules;
pub mod error;
pub mod median_pipeline;
pub mod rotation_pipeline;

pub use error::{Error, Result};
pub use median_pipeline::{MedianDemo, MedianDemoConfig, MedianDemoReport};
pub use rotation_pipeline::{RotationDemo, RotationMatchConfig, RotationMatchReport};
