// THEORY:
// The comparison baseline for the hand-written filter: `imageproc`'s median filter.
// OpenCV-style kernel sizes (3, 5, 11, 21) are translated into the symmetric radius
// `imageproc` expects, and the same odd-size rule as `median::median_filter` applies.

use crate::error::{Error, Result};
use image::GrayImage;

/// Median blur with a square `filter_size` window, delegated to `imageproc`.
pub fn library_median_blur(image: &GrayImage, filter_size: u32) -> Result<GrayImage> {
    if filter_size <= 1 {
        return Ok(image.clone());
    }
    if filter_size % 2 == 0 {
        return Err(Error::EvenKernel { size: filter_size });
    }
    let radius = filter_size / 2;
    Ok(imageproc::filter::median_filter(image, radius, radius))
}
