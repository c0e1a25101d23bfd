// Disk I/O for the exercises. Inputs are always read as 8-bit grayscale; outputs are
// encoded by file extension (`.jpg`/`.jpeg` as JPEG, anything else as PNG).

use crate::error::{Error, Result};
use image::{ExtendedColorType, GrayImage, ImageEncoder, RgbImage};
use std::path::Path;

const JPEG_QUALITY: u8 = 95;

/// Loads `path` and converts it to 8-bit grayscale.
///
/// An image that decodes to zero pixels is reported as `Error::EmptyImage`.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = img.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return Err(Error::EmptyImage);
    }
    Ok(gray)
}

pub fn save_gray<P: AsRef<Path>>(path: P, image: &GrayImage) -> Result<()> {
    save(path.as_ref(), image.as_raw(), image.width(), image.height(), ExtendedColorType::L8)
}

pub fn save_rgb<P: AsRef<Path>>(path: P, image: &RgbImage) -> Result<()> {
    save(path.as_ref(), image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
}

fn save(path: &Path, buffer: &[u8], width: u32, height: u32, color: ExtendedColorType) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let output = std::fs::File::create(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();

    let encoded = match extension.as_str() {
        "jpg" | "jpeg" => {
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(output, JPEG_QUALITY);
            encoder.write_image(buffer, width, height, color)
        }
        _ => {
            let encoder = image::codecs::png::PngEncoder::new(output);
            encoder.write_image(buffer, width, height, color)
        }
    };

    encoded.map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}
