// THEORY:
// The median exercise works on a fixed-width copy of whatever photo it is given, so the
// kernel sizes mean the same thing regardless of the camera resolution. The height
// follows from the source aspect ratio, rounded to the nearest pixel.

use crate::error::{Error, Result};
use image::{GrayImage, imageops::FilterType};

/// Height that keeps the `src_width : src_height` ratio at `target_width`.
pub fn height_for_width(src_width: u32, src_height: u32, target_width: u32) -> u32 {
    let aspect_ratio = f64::from(src_width) / f64::from(src_height);
    (f64::from(target_width) / aspect_ratio).round() as u32
}

/// Bilinear resize to `target_width`, preserving the aspect ratio.
pub fn resize_to_width(image: &GrayImage, target_width: u32) -> Result<GrayImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }
    if target_width == 0 {
        return Err(Error::InvalidParameter {
            name: "target_width".into(),
            reason: "must be positive".into(),
        });
    }
    let target_height = height_for_width(width, height, target_width).max(1);
    Ok(image::imageops::resize(image, target_width, target_height, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn height_follows_aspect_ratio() {
        assert_eq!(height_for_width(1600, 1200, 800), 600);
        assert_eq!(height_for_width(1000, 333, 800), 266);
        assert_eq!(height_for_width(3, 2, 800), 533);
    }

    #[test]
    fn resize_produces_target_dimensions() {
        let img = GrayImage::from_pixel(400, 300, Luma([128]));
        let out = resize_to_width(&img, 800).unwrap();
        assert_eq!(out.dimensions(), (800, 600));
        assert!(out.get_pixel(400, 300)[0].abs_diff(128) <= 1);
    }

    #[test]
    fn empty_source_is_rejected() {
        let img = GrayImage::new(0, 10);
        assert!(matches!(resize_to_width(&img, 800), Err(Error::EmptyImage)));
    }
}
