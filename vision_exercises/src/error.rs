//! Error type shared by every stage of both exercises.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the `vision_exercises` library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An image with zero width or height reached a stage that needs pixels.
    #[error("image is empty")]
    EmptyImage,

    /// Median kernels must have an odd side length.
    #[error("filter size must be odd, got {size}")]
    EvenKernel { size: u32 },

    /// A crop rectangle does not fit inside its source image.
    #[error("region {width}x{height} at ({x}, {y}) exceeds image bounds {image_width}x{image_height}")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// The template does not fit inside the searched image.
    #[error("template {template_width}x{template_height} is larger than image {image_width}x{image_height}")]
    TemplateTooLarge {
        template_width: u32,
        template_height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// The tiled rotations do not fit on the requested canvas.
    #[error("tiled image {tiled_width}x{tiled_height} does not fit canvas {canvas_width}x{canvas_height}")]
    CanvasTooSmall {
        tiled_width: u32,
        tiled_height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error means the input image could not be obtained at all.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Error::ImageLoad { .. } | Error::EmptyImage)
    }
}

/// Result type alias for `vision_exercises` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failures_are_classified() {
        assert!(Error::EmptyImage.is_load_failure());
        assert!(!Error::EvenKernel { size: 4 }.is_load_failure());
    }

    #[test]
    fn even_kernel_message_names_the_size() {
        let message = Error::EvenKernel { size: 6 }.to_string();
        assert_eq!(message, "filter size must be odd, got 6");
    }
}
